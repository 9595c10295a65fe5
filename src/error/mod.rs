mod suggestion;

pub use suggestion::QuizdeskErrorSuggestion;

pub type QuizdeskResult<T> = std::result::Result<T, QuizdeskError>;

use std::fmt::{self, Display};
use std::io;

use calm_io::stderr;

use crate::utils::style::Style;

/// A specialized `Error` type for quizdesk that wraps `anyhow`
/// and, where we can tell what went wrong, a suggestion for the user.
#[derive(Debug)]
pub struct QuizdeskError {
    error: anyhow::Error,
    suggestion: Option<QuizdeskErrorSuggestion>,
}

impl QuizdeskError {
    pub fn new<E>(error: E) -> Self
    where
        E: Into<anyhow::Error>,
    {
        let error = error.into();
        let suggestion = QuizdeskErrorSuggestion::for_error(&error);
        Self { error, suggestion }
    }

    pub fn with_suggestion(mut self, suggestion: QuizdeskErrorSuggestion) -> Self {
        self.suggestion = Some(suggestion);
        self
    }

    pub const fn suggestion(&self) -> Option<&QuizdeskErrorSuggestion> {
        self.suggestion.as_ref()
    }

    pub fn message(&self) -> String {
        self.error.to_string()
    }

    pub fn print(&self) -> io::Result<()> {
        stderr!("{}", self)?;
        Ok(())
    }
}

impl Display for QuizdeskError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let error_descriptor = Style::ErrorPrefix.paint("error:");
        writeln!(formatter, "{} {:#}", error_descriptor, &self.error)?;

        if let Some(suggestion) = &self.suggestion {
            writeln!(formatter, "        {suggestion}")?;
        }
        Ok(())
    }
}

impl<E: Into<anyhow::Error>> From<E> for QuizdeskError {
    fn from(error: E) -> Self {
        Self::new(error)
    }
}
