pub mod cli;
pub mod command;
mod error;
pub mod utils;

pub use error::{QuizdeskError, QuizdeskErrorSuggestion, QuizdeskResult};

pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Where operations go when neither `--endpoint` nor `QUIZDESK_GRAPHQL_URL` is set
pub const DEFAULT_ENDPOINT: &str = "http://localhost:4000/graphql";
