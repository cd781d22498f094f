//! The trait implemented by every record stored through the search client.

use serde::{de::DeserializeOwned, Serialize};

use crate::schema::IndexSchema;

/// A record that can be written to and read back from a search index.
///
/// The identifier is the document's identity within an index: writing a
/// second document with the same `id` replaces the first. The schema is
/// declared once per index and must describe every field the serialized
/// form carries.
///
/// # Example
///
/// ```
/// use search_client_shared::{Document, IndexSchema};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Note {
///     id: i64,
///     body: String,
///     labels: Vec<String>,
/// }
///
/// impl Document for Note {
///     fn id(&self) -> i64 {
///         self.id
///     }
///
///     fn schema() -> IndexSchema {
///         IndexSchema::new().long("id").text("body").keyword("labels")
///     }
/// }
/// ```
pub trait Document: Serialize + DeserializeOwned + Send + Sync {
    /// Unique identifier of this document within its index.
    fn id(&self) -> i64;

    /// Field mapping for the index holding documents of this type.
    fn schema() -> IndexSchema;

    /// The identifier as the backend sees it (document ids travel as strings).
    fn document_id(&self) -> String {
        self.id().to_string()
    }
}
