mod mutate;
mod output;
mod page;
mod query;
mod recent;
mod session;
mod shared;

pub use mutate::Mutate;
pub use output::QuizdeskOutput;
pub use page::Page;
pub use query::Query;
pub use recent::Recent;
pub use session::Session;
pub use shared::ScriptOpts;
