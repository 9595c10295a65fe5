use clap::Parser;
use quizdesk_store::{RecentList, Store};

use crate::command::{shared::RECENT_SCRIPTS, QuizdeskOutput};
use crate::QuizdeskResult;

#[derive(Debug, Parser)]
/// List recently used script files, newest first
pub struct Recent {
    /// Forget the list instead of printing it
    #[arg(long)]
    clear: bool,
}

impl Recent {
    pub fn run(&self, store: &Store) -> QuizdeskResult<QuizdeskOutput> {
        if self.clear {
            RecentList::clear(store, RECENT_SCRIPTS)?;
            return Ok(QuizdeskOutput::Message("Cleared recent scripts.".to_string()));
        }
        let recent = RecentList::load(store, RECENT_SCRIPTS)?;
        Ok(QuizdeskOutput::Recent(recent.entries().to_vec()))
    }
}
