use assert_fs::TempDir;
use predicates::prelude::*;

use super::quizdesk;

#[test]
fn it_signs_in_shows_and_signs_out() {
    let home = TempDir::new().unwrap();

    quizdesk(&home)
        .args(["session", "show"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Not signed in."));

    quizdesk(&home)
        .args(["session", "login", "--token", "qd_live_0123456789abcdef"])
        .args(["--username", "ada"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Signed in as ada."));

    quizdesk(&home)
        .args(["session", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ada"))
        .stdout(predicate::str::contains("qd_l****************cdef"))
        .stdout(predicate::str::contains("0123456789").not());

    quizdesk(&home)
        .args(["session", "logout"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Signed out."));
}
