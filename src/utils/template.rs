use quizdesk_graphql::{Script, ScriptError};

/// Splices `${Name}` placeholders in `text` with the spread of the fragment called `Name`.
///
/// Text without placeholders is parsed as-is. An unterminated `${` is left alone.
pub fn interpolate(text: &str, fragments: &[Script]) -> Result<Script, ScriptError> {
    let mut parts = Vec::new();
    let mut args = Vec::new();
    let mut rest = text;

    while let Some(start) = rest.find("${") {
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            break;
        };
        let name = after[..end].trim();
        let fragment = fragments
            .iter()
            .find(|fragment| fragment.name() == name)
            .ok_or_else(|| {
                ScriptError::InvalidArgument(format!("no fragment named `{name}` was provided"))
            })?;
        parts.push(&rest[..start]);
        args.push(fragment);
        rest = &after[end + 1..];
    }
    parts.push(rest);

    Script::build(&parts, args)
}
