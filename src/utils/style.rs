use console::style;

/// Terminal styling for human-readable output
pub enum Style {
    Command, // commands, env variable keys
    Path,
    ErrorPrefix, // "error:"
    HintPrefix,
    Heading,
    Success,
    Masked,
}

impl Style {
    pub fn paint<S: AsRef<str>>(&self, message: S) -> String {
        let message = message.as_ref();

        if is_no_color_set() {
            return message.to_string();
        }

        match &self {
            Style::Command => style(message).yellow(),
            Style::Path | Style::Heading => style(message).bold(),
            Style::ErrorPrefix => style(message).red().bold(),
            Style::HintPrefix => style(message).cyan().bold(),
            Style::Success => style(message).green(),
            Style::Masked => style(message).dim(),
        }
        .to_string()
    }
}

pub fn is_no_color_set() -> bool {
    is_bool_env_var_set("NO_COLOR") || is_bool_env_var_set("QUIZDESK_NO_COLOR")
}

fn is_bool_env_var_set(key: &str) -> bool {
    !matches!(
        std::env::var(key).as_deref(),
        Err(..) | Ok("" | "0" | "false" | "False" | "FALSE")
    )
}
