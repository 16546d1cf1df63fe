//! Help output specs

use crate::prelude::*;

#[test]
fn help_lists_subcommands() {
    sigrec()
        .args(&["--help"])
        .passes()
        .stdout_has("request")
        .stdout_has("catalog")
        .stdout_has("script");
}

#[test]
fn request_help_shows_options() {
    sigrec()
        .args(&["request", "--help"])
        .passes()
        .stdout_has("--method")
        .stdout_has("--leaf-only")
        .stdout_has("--format");
}
