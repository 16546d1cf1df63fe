//! Error reporting specs

use crate::prelude::*;

#[test]
fn invalid_url_fails() {
    sigrec()
        .args(&["request", "not a url"])
        .fails()
        .stderr_has("invalid URL: not a url");
}

#[test]
fn unknown_subcommand_fails() {
    sigrec().args(&["replay"]).fails().stderr_has("replay");
}

#[test]
fn missing_script_fails() {
    let temp = Project::empty();
    temp.sigrec()
        .args(&["script", "missing.toml"])
        .fails()
        .stderr_has("failed to read missing.toml");
}

#[test]
fn malformed_script_fails() {
    let temp = Project::empty();
    temp.file("bad.toml", "[[class]]\nname = \"X\"\ncolour = \"red\"\n");
    temp.sigrec()
        .args(&["script", "bad.toml"])
        .fails()
        .stderr_has("invalid scenario bad.toml");
}

#[test]
fn script_with_wrong_argument_type_fails() {
    let temp = Project::empty();
    temp.file(
        "bad.toml",
        "[[class]]\nname = \"X\"\nsignal = [{ name = \"s\", params = [\"int\"] }]\n\n[[emit]]\nsignal = \"s(int)\"\nargs = [\"x\"]\n",
    );
    temp.sigrec()
        .args(&["script", "bad.toml"])
        .fails()
        .stderr_has("argument 0 of s(int)");
}
