//! Search driver: runs every configured phrase and pages through the results.

use companies_house_api::types::SearchHit;
use companies_house_api::{Query, SearchQuery};

use crate::client::PacedClient;
use crate::config::ScanConfig;
use crate::error::ScanError;

/// A search hit tagged with the phrase that produced it.
#[derive(Debug, Clone)]
pub struct QueryHit {
    pub query: String,
    pub hit: SearchHit,
}

/// Runs each query in order, requesting up to `max_pages_per_query` pages of
/// `page_size` results, and returns every hit in arrival order.
///
/// A failure on the very first request of the run aborts with
/// [`ScanError::FirstSearchFailed`]. Later failures end paging for that query
/// only.
pub async fn collect_hits(
    client: &PacedClient,
    config: &ScanConfig,
) -> Result<Vec<QueryHit>, ScanError> {
    let mut hits = Vec::new();
    let mut first_request = true;

    for query in &config.queries {
        let mut fetched = 0usize;
        for page in 0..config.max_pages_per_query {
            let start_index = page as i64 * config.page_size;
            let request = SearchQuery::new(query)
                .with_items_per_page(config.page_size)
                .with_start_index(start_index);

            let result = client.search_companies(&request).await;
            let is_first = std::mem::replace(&mut first_request, false);

            let results = match result {
                Ok(Some(results)) => results,
                Ok(None) => {
                    tracing::warn!("search '{}' page {} returned not found", query, page);
                    break;
                }
                Err(ScanError::Api(e)) if is_first => return Err(ScanError::FirstSearchFailed(e)),
                Err(e) => {
                    tracing::warn!("search '{}' page {} failed: {}", query, page, e);
                    break;
                }
            };

            let page_len = results.items.len();
            fetched += page_len;
            tracing::info!(
                "search '{}' page {}: {} hits ({} total)",
                query,
                page,
                page_len,
                results.total_results
            );
            hits.extend(results.items.into_iter().map(|hit| QueryHit {
                query: query.clone(),
                hit,
            }));

            if page_len == 0 || start_index + config.page_size >= results.total_results {
                break;
            }
        }
        tracing::debug!("query '{}' done, {} hits", query, fetched);
    }

    Ok(hits)
}
