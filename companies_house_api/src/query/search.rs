use url::Url;

use super::{common::QueryCommon, Query};

/// Query for `GET /search/companies`.
///
/// The search phrase is form-encoded, so spaces go over the wire as `+`.
#[derive(Default, Clone, Debug)]
pub struct SearchQuery {
    pub common: QueryCommon,
    pub q: String,
}

impl Query for SearchQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }

    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        url.query_pairs_mut().append_pair("q", &self.q);
        self.common.add_to_url(&url)
    }
}

impl SearchQuery {
    pub fn new(q: &str) -> Self {
        Self {
            q: q.to_string(),
            ..Default::default()
        }
    }
}
