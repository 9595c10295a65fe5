use std::collections::HashMap;
use std::{env, fmt, io};

use heck::ToShoutySnakeCase;

/// QuizdeskEnv reads configuration from environment variables.
///
/// Values inserted with [`QuizdeskEnv::insert`] shadow the process
/// environment, and under `cfg(test)` the process environment is never read
/// at all, so tests can run in parallel without leaking the developer's
/// settings into assertions.
#[derive(Debug, Clone)]
pub struct QuizdeskEnv {
    overrides: HashMap<String, String>,
    read_process_env: bool,
}

impl Default for QuizdeskEnv {
    fn default() -> QuizdeskEnv {
        QuizdeskEnv::new()
    }
}

impl QuizdeskEnv {
    /// creates a new environment variable store
    pub fn new() -> QuizdeskEnv {
        QuizdeskEnv {
            overrides: HashMap::new(),
            read_process_env: !cfg!(test),
        }
    }

    /// returns the value of the environment variable if it exists
    pub fn get(&self, key: QuizdeskEnvKey) -> io::Result<Option<String>> {
        let key_str = key.to_string();
        tracing::trace!("Checking for ${}", &key_str);
        let result = match self.overrides.get(&key_str) {
            Some(value) => Some(value.clone()),
            None if self.read_process_env => match env::var(&key_str) {
                Ok(data) => Some(data),
                Err(env::VarError::NotPresent) => None,
                Err(env::VarError::NotUnicode(_)) => {
                    return Err(io::Error::new(
                        io::ErrorKind::InvalidInput,
                        format!(
                            "The value of the environment variable \"{}\" is not valid Unicode.",
                            &key_str
                        ),
                    ));
                }
            },
            None => None,
        };

        match &result {
            Some(value) => tracing::debug!("read {}", debug_value(key, value)),
            None => tracing::trace!("could not find ${}", &key_str),
        }

        Ok(result)
    }

    /// shadows an environment variable for this store only
    pub fn insert(&mut self, key: QuizdeskEnvKey, value: &str) {
        tracing::debug!("writing {}", debug_value(key, value));
        self.overrides.insert(key.to_string(), value.into());
    }

    /// drops a shadowed value, falling back to the process environment
    pub fn remove(&mut self, key: QuizdeskEnvKey) {
        tracing::debug!("removing {}", key);
        self.overrides.remove(&key.to_string());
    }
}

fn debug_value(key: QuizdeskEnvKey, value: &str) -> String {
    let value = match key {
        QuizdeskEnvKey::Token => quizdesk_store::mask_key(value),
        _ => value.to_string(),
    };
    format!("environment variable ${key} = {value}")
}

/// QuizdeskEnvKey defines all of the environment variables quizdesk respects.
///
/// Each is prefixed with `QUIZDESK_` and the variant name in
/// SHOUTY_SNAKE_CASE, so `QuizdeskEnvKey::ConfigHome` is `QUIZDESK_CONFIG_HOME`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum QuizdeskEnvKey {
    ConfigHome,
    GraphqlUrl,
    TimeoutSecs,
    Token,
}

impl fmt::Display for QuizdeskEnvKey {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let dbg = format!("{self:?}").to_shouty_snake_case();
        write!(fmt, "QUIZDESK_{dbg}")
    }
}
