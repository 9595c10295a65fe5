use std::io;

use calm_io::{stderrln, stdoutln};
use quizdesk_fetch::PageInfo;
use quizdesk_store::{mask_key, Session};
use serde_json::{json, Value};

use crate::utils::style::Style;

/// QuizdeskOutput defines everything quizdesk prints to `stdout`.
///
/// Commands return one of these instead of printing, so the binary decides
/// where output goes and a closed pipe is handled in one place. Progress and
/// status messages go to `stderr`.
#[derive(Clone, PartialEq, Debug)]
pub enum QuizdeskOutput {
    /// The `data` of a query or mutation
    Data(Value),
    /// One page of a connection
    Page {
        page_index: usize,
        nodes: Vec<Value>,
        page_info: PageInfo,
    },
    Session(Option<Session>),
    Recent(Vec<String>),
    Message(String),
    None,
}

impl QuizdeskOutput {
    pub fn print(&self) -> io::Result<()> {
        match self {
            QuizdeskOutput::Data(data) => {
                stdoutln!("{}", pretty(data))?;
            }
            QuizdeskOutput::Page {
                page_index,
                nodes,
                page_info,
            } => {
                let page = json!({
                    "page": page_index,
                    "nodes": nodes,
                    "pageInfo": page_info,
                });
                stdoutln!("{}", pretty(&page))?;
            }
            QuizdeskOutput::Session(None) => {
                stderrln!("Not signed in.")?;
            }
            QuizdeskOutput::Session(Some(session)) => {
                stdoutln!(
                    "{}: {}",
                    Style::Heading.paint("Username"),
                    session.username.as_deref().unwrap_or("(unknown)")
                )?;
                stdoutln!(
                    "{}: {}",
                    Style::Heading.paint("Token"),
                    Style::Masked.paint(mask_key(&session.token))
                )?;
            }
            QuizdeskOutput::Recent(entries) => {
                if entries.is_empty() {
                    stderrln!("No recent scripts.")?;
                }
                for entry in entries {
                    stdoutln!("{}", entry)?;
                }
            }
            QuizdeskOutput::Message(message) => {
                stderrln!("{}", Style::Success.paint(message))?;
            }
            QuizdeskOutput::None => (),
        }
        Ok(())
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
