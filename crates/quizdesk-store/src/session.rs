use serde::{Deserialize, Serialize};

use crate::{Store, StoreError};

const KEY: &str = "session";

/// The signed-in user, persisted between invocations
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Bearer token sent with every request
    pub token: String,
    /// Display name, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &mask_key(&self.token))
            .field("username", &self.username)
            .finish()
    }
}

impl Session {
    /// Creates a session for `token`
    pub fn new(token: impl Into<String>, username: Option<String>) -> Session {
        Session {
            token: token.into(),
            username,
        }
    }

    /// The stored session, if anyone is signed in
    pub fn load(store: &Store) -> Result<Option<Session>, StoreError> {
        store.get(KEY)
    }

    /// Like [`Session::load`], but a missing session is an error
    pub fn require(store: &Store) -> Result<Session, StoreError> {
        Session::load(store)?.ok_or(StoreError::NotSignedIn)
    }

    /// Replaces the stored session
    pub fn save(&self, store: &Store) -> Result<(), StoreError> {
        tracing::info!(username = ?self.username, token = %mask_key(&self.token), "saving session");
        store.set(KEY, self)
    }

    /// Forgets the stored session, returning whether there was one
    pub fn clear(store: &Store) -> Result<bool, StoreError> {
        store.remove(KEY)
    }
}

/// Hides all but the first and last four characters of a secret.
///
/// Secrets of eight characters or fewer are masked entirely.
pub fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let (head, rest) = chars.split_at(4);
    let (middle, tail) = rest.split_at(rest.len() - 4);
    let mut masked: String = head.iter().collect();
    masked.push_str(&"*".repeat(middle.len()));
    masked.extend(tail);
    masked
}

#[cfg(test)]
mod tests {
    use assert_fs::TempDir;
    use camino::Utf8PathBuf;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use speculoos::prelude::*;

    use super::{mask_key, Session};
    use crate::{Config, Store, StoreError};

    #[rstest]
    #[case::long("qd_live_0123456789abcdef", "qd_l****************cdef")]
    #[case::nine("123456789", "1234*6789")]
    #[case::short("secret", "******")]
    #[case::empty("", "")]
    fn it_masks_keys(#[case] key: &str, #[case] expected: &str) {
        assert_eq!(mask_key(key), expected);
    }

    #[test]
    fn debug_output_masks_the_token() {
        let session = Session::new("qd_live_0123456789abcdef", Some("ada".to_string()));
        let debug = format!("{session:?}");
        assert!(!debug.contains("0123456789"));
        assert!(debug.contains("ada"));
    }

    #[test]
    fn it_signs_in_and_out() {
        let tmp = TempDir::new().unwrap();
        let home = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        let store = Store::new(&Config::new(Some(&home)).unwrap());

        assert_eq!(Session::load(&store).unwrap(), None);
        assert_that!(Session::require(&store))
            .is_err()
            .matches(|err| matches!(err, StoreError::NotSignedIn));

        let session = Session::new("token-1234567890", Some("ada".to_string()));
        session.save(&store).unwrap();
        assert_eq!(Session::require(&store).unwrap(), session);

        assert!(Session::clear(&store).unwrap());
        assert_eq!(Session::load(&store).unwrap(), None);
        assert!(!Session::clear(&store).unwrap());
    }
}
