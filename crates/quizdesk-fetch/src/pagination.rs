//! Relay-style cursor pagination state.
//!
//! Exactly one of `after + first` or `before + last` is populated at any time.
//! The page index is a client-side counter moved by navigation; it drifts from
//! the server's real page number if the result set changes between requests.

use serde::Serialize;

/// Cursor variables merged into a connection query
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageVariables {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last: Option<u32>,
    /// Extra pages the server should skip past the cursor; a quiz API
    /// extension sent as `skipPages`, not a standard Relay argument
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_pages: Option<u32>,
}

impl PageVariables {
    fn first_page(page_size: u32) -> PageVariables {
        PageVariables {
            first: Some(page_size),
            ..PageVariables::default()
        }
    }
}

/// A navigation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Paginate {
    /// Back to the first page
    First,
    /// Forward past `cursor`, then `skip_pages` more
    After { cursor: String, skip_pages: u32 },
    /// Backward before `cursor`, then `skip_pages` more
    Before { cursor: String, skip_pages: u32 },
}

impl Paginate {
    pub fn after(cursor: impl Into<String>) -> Paginate {
        Paginate::After {
            cursor: cursor.into(),
            skip_pages: 0,
        }
    }

    pub fn before(cursor: impl Into<String>) -> Paginate {
        Paginate::Before {
            cursor: cursor.into(),
            skip_pages: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayPagination {
    page_size: u32,
    variables: PageVariables,
    page_index: usize,
}

impl RelayPagination {
    pub fn new(page_size: u32) -> RelayPagination {
        RelayPagination {
            page_size,
            variables: PageVariables::first_page(page_size),
            page_index: 0,
        }
    }

    pub const fn page_size(&self) -> u32 {
        self.page_size
    }

    pub const fn variables(&self) -> &PageVariables {
        &self.variables
    }

    pub const fn page_index(&self) -> usize {
        self.page_index
    }

    /// Starts over with a new page size; keeping the same size changes nothing
    pub fn set_page_size(&mut self, page_size: u32) {
        if page_size != self.page_size {
            *self = RelayPagination::new(page_size);
        }
    }

    pub fn paginate(&mut self, request: Paginate) {
        match request {
            Paginate::First => {
                self.variables = PageVariables::first_page(self.page_size);
                self.page_index = 0;
            }
            Paginate::After { cursor, skip_pages } => {
                self.variables = PageVariables {
                    after: Some(cursor),
                    first: Some(self.page_size),
                    skip_pages: (skip_pages > 0).then_some(skip_pages),
                    ..PageVariables::default()
                };
                self.page_index += 1 + skip_pages as usize;
            }
            Paginate::Before { cursor, skip_pages } => {
                self.variables = PageVariables {
                    before: Some(cursor),
                    last: Some(self.page_size),
                    skip_pages: (skip_pages > 0).then_some(skip_pages),
                    ..PageVariables::default()
                };
                self.page_index = self.page_index.saturating_sub(1 + skip_pages as usize);
            }
        }
        tracing::trace!(page_index = self.page_index, variables = ?self.variables, "paginated");
    }
}
