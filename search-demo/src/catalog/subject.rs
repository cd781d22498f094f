//! Film subject documents.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::demo::DemoPlan;
use search_client_shared::{Document, IndexSchema, SearchQuery};

/// Index holding subjects.
pub const SUBJECT_INDEX: &str = "subject";

/// A film with its genres as exact-match keywords.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub genres: Vec<String>,
}

impl Document for Subject {
    fn id(&self) -> i64 {
        self.id
    }

    fn schema() -> IndexSchema {
        IndexSchema::new().long("id").text("title").keyword("genres")
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Subject(id={}, title={}, genres={})",
            self.id,
            self.title,
            self.genres.join(",")
        )
    }
}

pub fn sample_subjects() -> Vec<Subject> {
    vec![
        Subject {
            id: 1,
            title: "肖申克的救赎".to_string(),
            genres: vec!["犯罪".to_string(), "剧情".to_string()],
        },
        Subject {
            id: 2,
            title: "美丽人生".to_string(),
            genres: vec!["剧情".to_string(), "喜剧".to_string()],
        },
    ]
}

/// Write both sample subjects, then search by genre.
pub fn plan() -> DemoPlan<Subject> {
    DemoPlan {
        index: SUBJECT_INDEX.to_string(),
        label: "subjects",
        documents: sample_subjects(),
        lookup_id: None,
        query: SearchQuery::term("genres", "剧情"),
    }
}
