//! Shared query infrastructure: the [`Query`] trait and the [`QueryCommon`] paging fields.

use url::Url;

/// Trait implemented by all query builders. Provides URL serialization and
/// shared builder methods for the registry's offset-based paging.
pub trait Query {
    /// Appends this query's parameters to the given URL, returning the modified URL.
    fn add_to_url(&self, url: &Url) -> Url;

    /// Returns a mutable reference to the common query fields.
    fn get_common(&mut self) -> &mut QueryCommon;

    /// Sets the number of results per page.
    fn with_items_per_page(mut self, items_per_page: i64) -> Self
    where
        Self: Sized,
    {
        self.get_common().items_per_page = Some(items_per_page);
        self
    }

    /// Sets the zero-based offset of the first result.
    fn with_start_index(mut self, start_index: i64) -> Self
    where
        Self: Sized,
    {
        self.get_common().start_index = Some(start_index);
        self
    }
}

/// Paging fields shared by the list endpoints.
#[derive(Clone, Copy, Default, Debug)]
pub struct QueryCommon {
    /// Results per page. `None` uses the API default.
    pub items_per_page: Option<i64>,
    /// Offset of the first result. `None` starts at zero.
    pub start_index: Option<i64>,
}

impl QueryCommon {
    /// Appends the paging parameters to the URL.
    pub fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        if let Some(items_per_page) = self.items_per_page {
            url.query_pairs_mut()
                .append_pair("items_per_page", &items_per_page.to_string());
        };
        if let Some(start_index) = self.start_index {
            url.query_pairs_mut()
                .append_pair("start_index", &start_index.to_string());
        };
        url
    }
}
