//! Script scenario specs
//!
//! Verify overloaded signals are attributed to the overload that fired.

use crate::prelude::*;

#[test]
fn overloads_are_recorded_separately() {
    let temp = Project::empty();
    temp.file("overloaded.toml", OVERLOADED_SCRIPT);

    temp.sigrec()
        .args(&["script", "overloaded.toml"])
        .passes()
        .stdout_eq("overloaded.toml\n---------------\nA(x)\nA(5, y)\ndestroyed(object)\n\n");
}

#[test]
fn exact_attribution_with_exact_indexing() {
    let temp = Project::empty();
    temp.file(
        "exact.toml",
        &format!(
            "indexing = \"exact\"\n\n[inspector]\nattribution = \"exact\"\ninclude_inherited = false\n{}",
            OVERLOADED_SCRIPT
        ),
    );

    temp.sigrec()
        .args(&["script", "exact.toml"])
        .passes()
        .stdout_eq("exact.toml\n----------\nA(x)\nA(5, y)\n\n");
}

#[test]
fn defaulted_overloads_keep_their_own_arity() {
    let temp = Project::empty();
    temp.file(
        "progress.toml",
        r#"
destroy = false

[[class]]
name = "Job"
signal = [{ name = "progress", params = ["int", "string"], defaults = 1 }]

[[emit]]
signal = "progress(int)"
args = [1]

[[emit]]
signal = "progress(int,string)"
args = [2, "half"]

[[emit]]
signal = "progress(int)"
args = [3]
"#,
    );

    temp.sigrec()
        .args(&["script", "progress.toml"])
        .passes()
        .stdout_eq("progress.toml\n-------------\nprogress(1)\nprogress(2, half)\nprogress(3)\n\n");
}
