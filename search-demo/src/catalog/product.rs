//! Product catalog documents.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::demo::DemoPlan;
use search_client_shared::{Document, IndexSchema, SearchQuery};

/// Index holding products.
pub const PRODUCT_INDEX: &str = "product";

/// A product listing. Tags are exact-match keywords.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Document for Product {
    fn id(&self) -> i64 {
        self.id
    }

    fn schema() -> IndexSchema {
        IndexSchema::new()
            .long("id")
            .text("title")
            .text("summary")
            .text("description")
            .keyword("tags")
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Product(id={}, title={})", self.id, self.title)
    }
}

/// The single sample product written by the demo.
pub fn sample_products() -> Vec<Product> {
    vec![Product {
        id: 1,
        title: "整體浴室-乾濕分離系列1521AT".to_string(),
        summary: String::new(),
        description: String::new(),
        tags: vec![
            "金奈整體浴室".to_string(),
            "整座浴室".to_string(),
            "139000".to_string(),
        ],
    }]
}

/// Write the sample product, read it back by id, then search by tag.
pub fn plan() -> DemoPlan<Product> {
    DemoPlan {
        index: PRODUCT_INDEX.to_string(),
        label: "products",
        documents: sample_products(),
        lookup_id: Some(1),
        query: SearchQuery::term("tags", "金奈整體浴室"),
    }
}
