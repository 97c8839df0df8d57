//! Search, filter and dedupe: turns configured queries into candidates.

use crate::classify::Classifier;
use crate::client::PacedClient;
use crate::config::ScanConfig;
use crate::dedupe::dedupe;
use crate::error::ScanError;
use crate::record::Candidate;
use crate::search::{collect_hits, QueryHit};

/// Keeps active, in-scope hits, one per company number, in arrival order.
pub fn select_candidates(hits: Vec<QueryHit>, classifier: &Classifier) -> Vec<Candidate> {
    let admitted = hits.into_iter().filter_map(|QueryHit { query, hit }| {
        let business_type = classifier.admit(&hit)?;
        Some(Candidate {
            hit,
            business_type,
            query_term: query,
        })
    });
    dedupe(admitted, Candidate::company_number)
}

/// Runs every configured search and returns the deduplicated candidates.
pub async fn find_candidates(
    client: &PacedClient,
    config: &ScanConfig,
    classifier: &Classifier,
) -> Result<Vec<Candidate>, ScanError> {
    let hits = collect_hits(client, config).await?;
    let total_hits = hits.len();
    let candidates = select_candidates(hits, classifier);
    tracing::info!(
        "{} search hits, {} unique in-scope candidates",
        total_hits,
        candidates.len()
    );
    Ok(candidates)
}
