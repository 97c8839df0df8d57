use url::Url;

use super::{common::QueryCommon, Query};

/// Query for `GET /company/{number}/filing-history`. Only paging is supported.
#[derive(Default, Clone, Debug)]
pub struct FilingHistoryQuery {
    pub common: QueryCommon,
}

impl Query for FilingHistoryQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }

    fn add_to_url(&self, url: &Url) -> Url {
        self.common.add_to_url(url)
    }
}
