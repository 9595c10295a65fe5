use std::{fs, io};

use camino::Utf8PathBuf;
use serde::{de::DeserializeOwned, Serialize};

use crate::{Config, StoreError};

/// A directory of JSON documents, one file per key (`<home>/<key>.json`)
#[derive(Debug, Clone)]
pub struct Store {
    home: Utf8PathBuf,
}

impl Store {
    /// Opens the store at the config home. Nothing is created until the first write.
    pub fn new(config: &Config) -> Store {
        Store {
            home: config.home.clone(),
        }
    }

    /// Reads `key`; `None` if it was never written
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let path = self.path(key)?;
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        tracing::debug!(%path, "read stored value");
        serde_json::from_str(&contents)
            .map(Some)
            .map_err(|source| StoreError::Json {
                key: key.to_string(),
                source,
            })
    }

    /// Writes `value` under `key`, replacing whatever was there
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let path = self.path(key)?;
        let data = serde_json::to_string_pretty(value).map_err(|source| StoreError::Json {
            key: key.to_string(),
            source,
        })?;
        fs::create_dir_all(&self.home)?;
        fs::write(&path, data)?;
        tracing::debug!(%path, "wrote stored value");
        Ok(())
    }

    /// Deletes `key`, returning whether it existed
    pub fn remove(&self, key: &str) -> Result<bool, StoreError> {
        let path = self.path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                tracing::debug!(%path, "removed stored value");
                Ok(true)
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    /// Deletes every stored value, leaving any other files in the home alone
    pub fn clear(&self) -> Result<(), StoreError> {
        let entries = match fs::read_dir(&self.home) {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(err) => return Err(err.into()),
        };
        for entry in entries {
            let path = Utf8PathBuf::try_from(entry?.path())?;
            let is_value = path.extension() == Some("json")
                && path.file_stem().is_some_and(valid_key);
            if is_value && path.is_file() {
                fs::remove_file(&path)?;
            }
        }
        Ok(())
    }

    fn path(&self, key: &str) -> Result<Utf8PathBuf, StoreError> {
        if !valid_key(key) {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.home.join(format!("{key}.json")))
    }
}

fn valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use assert_fs::{prelude::*, TempDir};
    use camino::Utf8PathBuf;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};
    use serde::{Deserialize, Serialize};
    use speculoos::prelude::*;

    use super::Store;
    use crate::{Config, StoreError};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Draft {
        title: String,
        tags: Vec<String>,
    }

    #[fixture]
    fn home() -> TempDir {
        TempDir::new().unwrap()
    }

    fn store_in(home: &TempDir) -> Store {
        let path = Utf8PathBuf::try_from(home.path().join("state")).unwrap();
        Store::new(&Config::new(Some(&path)).unwrap())
    }

    #[rstest]
    fn it_round_trips_a_value(home: TempDir) {
        let store = store_in(&home);
        let draft = Draft {
            title: "Capitals".to_string(),
            tags: vec!["geo".to_string()],
        };

        assert_eq!(store.get::<Draft>("draft").unwrap(), None);
        store.set("draft", &draft).unwrap();
        assert!(home.child("state/draft.json").path().is_file());
        assert_eq!(store.get::<Draft>("draft").unwrap(), Some(draft));

        assert!(store.remove("draft").unwrap());
        assert!(!store.remove("draft").unwrap());
        assert_eq!(store.get::<Draft>("draft").unwrap(), None);
    }

    #[rstest]
    #[case::empty("")]
    #[case::path("../escape")]
    #[case::dot("a.b")]
    #[case::space("a b")]
    fn it_rejects_unsafe_keys(home: TempDir, #[case] key: &str) {
        let store = store_in(&home);
        assert_that!(store.set(key, &1))
            .is_err()
            .matches(|err| matches!(err, StoreError::InvalidKey(_)));
    }

    #[rstest]
    fn it_reports_corrupt_values(home: TempDir) {
        let store = store_in(&home);
        home.child("state/broken.json").write_str("{ not json").unwrap();
        assert_that!(store.get::<Draft>("broken"))
            .is_err()
            .matches(|err| matches!(err, StoreError::Json { key, .. } if key == "broken"));
    }

    #[rstest]
    fn clear_only_removes_stored_values(home: TempDir) {
        let store = store_in(&home);
        store.clear().unwrap();

        store.set("one", &1).unwrap();
        store.set("two", &2).unwrap();
        home.child("state/notes.txt").write_str("keep me").unwrap();

        store.clear().unwrap();
        assert_eq!(store.get::<u32>("one").unwrap(), None);
        assert_eq!(store.get::<u32>("two").unwrap(), None);
        home.child("state/notes.txt").assert("keep me");
    }
}
