//! The demo flow shared by both binaries.
//!
//! Status lines go to the supplied writer (stdout in the binaries); tracing
//! carries the operational logs.

use std::fmt::Display;
use std::io::Write;

use tracing::{info, instrument};

use crate::DemoError;
use search_client_repository::SearchIndexClient;
use search_client_shared::{Document, SearchQuery};

/// Everything one demo run needs: where to write, what to write, what to
/// look up and what to search for.
#[derive(Debug, Clone)]
pub struct DemoPlan<D> {
    pub index: String,
    /// Plural noun used in the "Found N ..." line.
    pub label: &'static str,
    pub documents: Vec<D>,
    pub lookup_id: Option<i64>,
    pub query: SearchQuery,
}

/// What a run did, for callers that want more than the printed lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoReport {
    pub index_created: bool,
    pub written: usize,
    pub fetched: Option<bool>,
    pub total: u64,
    pub returned_ids: Vec<i64>,
}

/// Run the plan: ensure index, write documents, optional lookup, search.
///
/// Stops at the first error.
#[instrument(skip_all, fields(index = %plan.index))]
pub async fn run<D, W>(
    client: &SearchIndexClient,
    plan: &DemoPlan<D>,
    out: &mut W,
) -> Result<DemoReport, DemoError>
where
    D: Document + Display,
    W: Write,
{
    let index_created = client.ensure_index(&plan.index, &D::schema()).await?;
    info!(created = index_created, "Index ready");

    for document in &plan.documents {
        let receipt = client.upsert_document(&plan.index, document).await?;
        writeln!(out, "Indexed with id={}, index={}", receipt.id, receipt.index)?;
    }

    let fetched = match plan.lookup_id {
        Some(id) => Some(lookup::<D, W>(client, &plan.index, id, out).await?),
        None => None,
    };

    writeln!(out, "Search: {}", plan.query.value)?;
    let result = client.search::<D>(&plan.index, &plan.query).await?;
    writeln!(out, "Found {} {}", result.total, plan.label)?;

    if result.total > 0 {
        for document in result.iter() {
            writeln!(out, "Found: {}", document)?;
        }
    } else {
        writeln!(out, "Not found!")?;
    }

    Ok(DemoReport {
        index_created,
        written: plan.documents.len(),
        fetched,
        total: result.total,
        returned_ids: result.iter().map(|d| d.id()).collect(),
    })
}

async fn lookup<D, W>(
    client: &SearchIndexClient,
    index: &str,
    id: i64,
    out: &mut W,
) -> Result<bool, DemoError>
where
    D: Document + Display,
    W: Write,
{
    match client.get_document::<D>(index, id).await? {
        Some(stored) => {
            writeln!(
                out,
                "Got document {} (version={}, index={})",
                stored.id,
                stored.version.unwrap_or_default(),
                stored.index
            )?;
            writeln!(out, "{}", stored.document)?;
            Ok(true)
        }
        None => {
            writeln!(out, "Document {} not found", id)?;
            Ok(false)
        }
    }
}
