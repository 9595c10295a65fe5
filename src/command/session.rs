use clap::{Parser, Subcommand};
use quizdesk_store::Store;

use crate::command::QuizdeskOutput;
use crate::QuizdeskResult;

#[derive(Debug, Parser)]
pub struct Session {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store a bearer token for later commands
    Login {
        /// API token sent as `Authorization: Bearer <TOKEN>`
        #[arg(long)]
        token: String,

        /// Name to show for this session
        #[arg(long)]
        username: Option<String>,
    },

    /// Forget the stored token
    Logout,

    /// Show the stored session, with the token masked
    Show,
}

impl Session {
    pub fn run(&self, store: &Store) -> QuizdeskResult<QuizdeskOutput> {
        match &self.command {
            Command::Login { token, username } => {
                if token.trim().is_empty() {
                    return Err(anyhow::anyhow!("The token cannot be empty.").into());
                }
                let session = quizdesk_store::Session::new(token.trim(), username.clone());
                session.save(store)?;
                let who = username.as_deref().unwrap_or("the new session");
                Ok(QuizdeskOutput::Message(format!("Signed in as {who}.")))
            }
            Command::Logout => {
                let message = if quizdesk_store::Session::clear(store)? {
                    "Signed out."
                } else {
                    "Not signed in."
                };
                Ok(QuizdeskOutput::Message(message.to_string()))
            }
            Command::Show => Ok(QuizdeskOutput::Session(quizdesk_store::Session::load(store)?)),
        }
    }
}
