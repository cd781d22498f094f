//! Document types used by the demos, with their sample data.

pub mod product;
pub mod subject;

pub use product::Product;
pub use subject::Subject;
