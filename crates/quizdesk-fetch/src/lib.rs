//! Data-fetching handles built on a [`GraphQLClient`]
//!
//! - [`Query`] fetches whenever its script or variables change and keeps the
//!   latest outcome observable.
//! - [`Mutation`] runs on demand and announces successes on a [`MutationBus`].
//! - [`RelayPagination`] and [`ConnectionQuery`] drive cursor-paginated lists.
//!
//! Every handle takes its client explicitly; nothing here reads ambient state.

mod bus;
mod connection;
mod error;
mod mutation;
mod pagination;
mod query;
mod result;

pub use bus::MutationBus;
pub use connection::{Connection, ConnectionQuery, Edge, PageInfo};
pub use error::{FetchError, PaginationError};
pub use mutation::Mutation;
pub use pagination::{PageVariables, Paginate, RelayPagination};
pub use query::Query;
pub use quizdesk_graphql::GraphQLClient;
pub use result::QueryResult;
