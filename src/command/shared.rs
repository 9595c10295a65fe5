use std::fs;

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Args;
use quizdesk_graphql::{Script, ScriptKind};
use quizdesk_store::{RecentList, Store};
use serde_json::Value;

use crate::utils::{style::Style, template};
use crate::{QuizdeskError, QuizdeskResult};

/// Name of the [`RecentList`] that remembers script files
pub const RECENT_SCRIPTS: &str = "scripts";

#[derive(Debug, Clone, Args)]
pub struct ScriptOpts {
    /// Path to a file containing the operation
    #[arg(value_name = "FILE")]
    pub file: Utf8PathBuf,

    /// Variables to send with the operation, as a JSON object
    #[arg(long, value_name = "JSON", value_parser = parse_json)]
    pub variables: Option<Value>,

    /// Fragment files whose names can be spread with `${Name}` in the operation
    #[arg(long = "fragment", value_name = "FILE")]
    pub fragments: Vec<Utf8PathBuf>,
}

impl ScriptOpts {
    /// Reads and parses the operation, which must be a `kind`
    pub fn load(&self, kind: ScriptKind) -> QuizdeskResult<Script> {
        let fragments = self
            .fragments
            .iter()
            .map(|path| {
                let script = Script::parse(read(path)?)
                    .with_context(|| format!("Could not parse {}", Style::Path.paint(path)))?;
                if script.kind() != ScriptKind::Fragment {
                    return Err(QuizdeskError::new(anyhow::anyhow!(
                        "{} is a {}, not a fragment",
                        Style::Path.paint(path),
                        script.kind()
                    )));
                }
                Ok(script)
            })
            .collect::<QuizdeskResult<Vec<_>>>()?;

        let script = template::interpolate(&read(&self.file)?, &fragments)
            .with_context(|| format!("Could not parse {}", Style::Path.paint(&self.file)))?;
        if script.kind() != kind {
            return Err(QuizdeskError::new(anyhow::anyhow!(
                "{} contains a {} `{}`, expected a {}",
                Style::Path.paint(&self.file),
                script.kind(),
                script.name(),
                kind
            )));
        }
        tracing::debug!(operation = script.name(), kind = %script.kind(), "loaded script");
        Ok(script)
    }

    /// Adds the script file to the recent list. Failing to do so is not fatal.
    pub fn remember(&self, store: &Store) {
        let path = self
            .file
            .canonicalize_utf8()
            .unwrap_or_else(|_| self.file.clone());
        let result = RecentList::load(store, RECENT_SCRIPTS).and_then(|mut recent| {
            recent.push(path.as_str());
            recent.save(store)
        });
        if let Err(error) = result {
            tracing::warn!(%error, "could not update recent scripts");
        }
    }
}

fn read(path: &Utf8PathBuf) -> QuizdeskResult<String> {
    Ok(fs::read_to_string(path)
        .with_context(|| format!("Could not read {}", Style::Path.paint(path)))?)
}

pub(crate) fn parse_json(value: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str(value)
}

#[cfg(test)]
mod tests {
    use assert_fs::{prelude::*, TempDir};
    use camino::Utf8PathBuf;
    use indoc::indoc;
    use quizdesk_graphql::ScriptKind;
    use quizdesk_store::{Config, RecentList, Store};
    use serde_json::json;

    use super::{ScriptOpts, RECENT_SCRIPTS};

    fn utf8(path: &std::path::Path) -> Utf8PathBuf {
        Utf8PathBuf::try_from(path.to_path_buf()).unwrap()
    }

    #[test]
    fn it_loads_a_script_with_fragments() {
        let dir = TempDir::new().unwrap();
        let fragment = dir.child("user.graphql");
        fragment
            .write_str("fragment UserFields on User { id username }")
            .unwrap();
        let query = dir.child("me.graphql");
        query
            .write_str(indoc! {r#"
                query Me {
                  me { ...${UserFields} }
                }
            "#})
            .unwrap();

        let opts = ScriptOpts {
            file: utf8(query.path()),
            variables: Some(json!({})),
            fragments: vec![utf8(fragment.path())],
        };
        let script = opts.load(ScriptKind::Query).unwrap();
        assert_eq!(script.name(), "Me");
        assert!(script.text().contains("...on User { id username }"));
    }

    #[test]
    fn it_rejects_the_wrong_kind() {
        let dir = TempDir::new().unwrap();
        let file = dir.child("logout.graphql");
        file.write_str("mutation Logout { logout }").unwrap();
        let opts = ScriptOpts {
            file: utf8(file.path()),
            variables: None,
            fragments: Vec::new(),
        };
        let error = opts.load(ScriptKind::Query).unwrap_err();
        assert!(error.message().contains("mutation `Logout`"));
    }

    #[test]
    fn it_remembers_scripts() {
        let dir = TempDir::new().unwrap();
        let file = dir.child("me.graphql");
        file.write_str("query Me { me { id } }").unwrap();
        let store = Store::new(&Config::new(Some(&utf8(&dir.path().join("home")))).unwrap());
        let opts = ScriptOpts {
            file: utf8(file.path()),
            variables: None,
            fragments: Vec::new(),
        };

        opts.remember(&store);
        opts.remember(&store);

        let recent = RecentList::load(&store, RECENT_SCRIPTS).unwrap();
        assert_eq!(recent.entries().len(), 1);
        assert!(recent.entries()[0].ends_with("me.graphql"));
    }
}
