#![cfg_attr(not(test), deny(clippy::panic))]
#![deny(missing_docs)]

//! Client state that outlives a single quizdesk invocation: the signed-in
//! session and most-recently-used lists, kept as JSON files in a config home.

mod config;
mod error;
mod recent;
mod session;
mod store;

pub use config::Config;
pub use error::StoreError;
pub use recent::{RecentList, DEFAULT_CAPACITY};
pub use session::{mask_key, Session};
pub use store::Store;
