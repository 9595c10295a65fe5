use std::future::Future;

use derive_getters::Getters;
use quizdesk_graphql::{GraphQLClient, Script};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::sync::watch;

use crate::{
    MutationBus, PageVariables, Paginate, PaginationError, Query, QueryResult, RelayPagination,
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    #[serde(default)]
    pub start_cursor: Option<String>,
    #[serde(default)]
    pub end_cursor: Option<String>,
    #[serde(default)]
    pub has_previous_page: bool,
    #[serde(default)]
    pub has_next_page: bool,
    /// Total size of the result set, when the server reports it
    #[serde(default)]
    pub count: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub node: Value,
    #[serde(default)]
    pub cursor: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawConnection {
    #[serde(default)]
    nodes: Option<Vec<Value>>,
    #[serde(default)]
    edges: Vec<Edge>,
    #[serde(default)]
    page_info: PageInfo,
}

/// One page of a Relay connection
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct Connection {
    nodes: Vec<Value>,
    edges: Vec<Edge>,
    page_info: PageInfo,
}

impl Connection {
    /// Reshapes response `data` whose single top-level field is a connection
    pub fn from_data(data: &Value) -> Result<Connection, PaginationError> {
        let fields = data.as_object().ok_or_else(|| {
            PaginationError::NotAConnection("response data is not an object".to_string())
        })?;
        let mut values = fields.values();
        let (Some(field), None) = (values.next(), values.next()) else {
            return Err(PaginationError::NotAConnection(format!(
                "expected exactly one top-level field, found {}",
                fields.len()
            )));
        };

        let raw: RawConnection = serde_json::from_value(field.clone())
            .map_err(|err| PaginationError::NotAConnection(err.to_string()))?;
        let nodes = raw
            .nodes
            .unwrap_or_else(|| raw.edges.iter().map(|edge| edge.node.clone()).collect());
        Ok(Connection {
            nodes,
            edges: raw.edges,
            page_info: raw.page_info,
        })
    }

    pub fn nodes_as<T: DeserializeOwned>(&self) -> Result<Vec<T>, serde_json::Error> {
        self.nodes
            .iter()
            .cloned()
            .map(serde_json::from_value)
            .collect()
    }

    /// The request for the next page, if the server says there is one
    pub fn forwards(&self) -> Option<Paginate> {
        if !self.page_info.has_next_page {
            return None;
        }
        self.page_info.end_cursor.clone().map(Paginate::after)
    }

    /// The request for the previous page, if the server says there is one
    pub fn backwards(&self) -> Option<Paginate> {
        if !self.page_info.has_previous_page {
            return None;
        }
        self.page_info.start_cursor.clone().map(Paginate::before)
    }
}

/// A [`Query`] over a Relay connection, with page navigation
pub struct ConnectionQuery {
    query: Query,
    base_variables: Map<String, Value>,
    pagination: RelayPagination,
}

impl ConnectionQuery {
    /// Issues the first page of `script`.
    ///
    /// The page variables are merged into `base_variables` and take precedence
    /// over keys of the same name.
    pub fn new(
        client: GraphQLClient,
        script: Script,
        base_variables: Map<String, Value>,
        page_size: u32,
    ) -> ConnectionQuery {
        let pagination = RelayPagination::new(page_size);
        let variables = merge(&base_variables, pagination.variables());
        ConnectionQuery {
            query: Query::new(client, Some(script), Some(variables)),
            base_variables,
            pagination,
        }
    }

    pub fn refetch_on(mut self, bus: &MutationBus) -> ConnectionQuery {
        self.query = self.query.refetch_on(bus);
        self
    }

    pub const fn pagination(&self) -> &RelayPagination {
        &self.pagination
    }

    pub const fn page_index(&self) -> usize {
        self.pagination.page_index()
    }

    pub fn result(&self) -> QueryResult {
        self.query.result()
    }

    pub fn subscribe(&self) -> watch::Receiver<QueryResult> {
        self.query.subscribe()
    }

    pub fn settled(&self) -> impl Future<Output = QueryResult> + Send + 'static {
        self.query.settled()
    }

    pub fn retry(&self) {
        self.query.retry()
    }

    /// The current page, or `None` while nothing has loaded
    pub fn connection(&self) -> Option<Result<Connection, PaginationError>> {
        self.result().data().as_ref().map(Connection::from_data)
    }

    /// `None` disables "next": no page is loaded or the server reports no next page
    pub fn forwards(&self) -> Option<Paginate> {
        self.connection()?.ok()?.forwards()
    }

    /// `None` disables "previous": no page is loaded or the server reports no previous page
    pub fn backwards(&self) -> Option<Paginate> {
        self.connection()?.ok()?.backwards()
    }

    /// Navigates and refetches; a request that leaves the page variables as they are is ignored
    pub fn paginate(&mut self, request: Paginate) {
        let mut next = self.pagination.clone();
        next.paginate(request);
        if next.variables() == self.pagination.variables() {
            tracing::trace!(page_index = self.page_index(), "already on the requested page");
            return;
        }
        self.pagination = next;
        self.refresh();
    }

    /// Moves to virtual page `target` in as few requests as possible.
    ///
    /// A jump of more than one page is a single request carrying `skipPages`.
    pub fn paginate_to(&mut self, target: usize) -> Result<(), PaginationError> {
        let current = self.page_index();
        if target == current {
            return Ok(());
        }
        let connection = self.connection().ok_or(PaginationError::NotLoaded)??;
        let info = connection.page_info();

        let request = if target > current {
            let cursor = info
                .end_cursor
                .clone()
                .filter(|_| info.has_next_page)
                .ok_or(PaginationError::NoNextPage)?;
            Paginate::After {
                cursor,
                skip_pages: skip_for(target - current),
            }
        } else {
            let cursor = info
                .start_cursor
                .clone()
                .filter(|_| info.has_previous_page)
                .ok_or(PaginationError::NoPreviousPage)?;
            Paginate::Before {
                cursor,
                skip_pages: skip_for(current - target),
            }
        };
        tracing::debug!(current, target, ?request, "jumping to page");
        self.paginate(request);
        Ok(())
    }

    /// Replaces the non-page variables (filters, search terms) and returns to the first page
    pub fn set_base_variables(&mut self, base_variables: Map<String, Value>) {
        self.base_variables = base_variables;
        self.pagination.paginate(Paginate::First);
        self.refresh();
    }

    /// Returns to the first page with a new page size; an unchanged size is a no-op
    pub fn set_page_size(&mut self, page_size: u32) {
        if page_size != self.pagination.page_size() {
            self.pagination.set_page_size(page_size);
            self.refresh();
        }
    }

    fn refresh(&mut self) {
        let variables = merge(&self.base_variables, self.pagination.variables());
        self.query.set_variables(Some(variables));
    }
}

fn skip_for(delta: usize) -> u32 {
    u32::try_from(delta - 1).unwrap_or(u32::MAX)
}

fn merge(base: &Map<String, Value>, page: &PageVariables) -> Value {
    let mut variables = base.clone();
    if let Ok(Value::Object(page)) = serde_json::to_value(page) {
        variables.extend(page);
    }
    Value::Object(variables)
}
