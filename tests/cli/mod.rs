mod page;
mod query;
mod session;

use assert_cmd::Command;
use assert_fs::{prelude::*, TempDir};
use quizdesk::utils::env::QuizdeskEnvKey;

/// A quizdesk invocation isolated from the developer's environment
pub fn quizdesk(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("quizdesk").unwrap();
    cmd.env(QuizdeskEnvKey::ConfigHome.to_string(), home.path())
        .env_remove(QuizdeskEnvKey::Token.to_string())
        .env_remove(QuizdeskEnvKey::GraphqlUrl.to_string())
        .env_remove(QuizdeskEnvKey::TimeoutSecs.to_string())
        .env("NO_COLOR", "1");
    cmd
}

/// Writes `contents` to `name` inside `dir`, returning its path
pub fn script(dir: &TempDir, name: &str, contents: &str) -> String {
    let file = dir.child(name);
    file.write_str(contents).unwrap();
    file.path().to_string_lossy().into_owned()
}
