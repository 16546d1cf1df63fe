//! Request recording specs
//!
//! Verify the signals recorded from a simulated network reply.

use crate::prelude::*;

#[test]
fn status_200_records_lifecycle_and_destruction() {
    sigrec()
        .args(&["request", "http://eu.httpbin.org/status/200"])
        .passes()
        .stdout_eq(
            "GET http://eu.httpbin.org/status/200\n\
             ------------------------------------\n\
             metaDataChanged()\n\
             downloadProgress(0, 0)\n\
             readChannelFinished()\n\
             finished()\n\
             destroyed(object)\n\
             \n",
        );
}

#[test]
fn server_error_uses_short_overload() {
    sigrec()
        .args(&["request", "http://eu.httpbin.org/status/500"])
        .passes()
        .stdout_has("errorOccurred(500)\n")
        .stdout_lacks("errorOccurred(500, ");
}

#[test]
fn client_error_uses_long_overload() {
    sigrec()
        .args(&["request", "http://eu.httpbin.org/status/404"])
        .passes()
        .stdout_has("errorOccurred(404, Not Found)\n");
}

#[test]
fn leaf_only_skips_inherited_signals() {
    sigrec()
        .args(&["request", "--leaf-only", "http://eu.httpbin.org/get"])
        .passes()
        .stdout_has("metaDataChanged()")
        .stdout_has("finished()")
        .stdout_lacks("readyRead()")
        .stdout_lacks("readChannelFinished()")
        .stdout_lacks("destroyed(object)");
}

#[test]
fn post_records_upload_progress() {
    sigrec()
        .args(&[
            "request",
            "-m",
            "post",
            "-b",
            "{ \"random\": \"x\" }",
            "--content-type",
            "application/json",
            "http://eu.httpbin.org/post",
        ])
        .passes()
        .stdout_has("POST http://eu.httpbin.org/post\n")
        .stdout_has("uploadProgress(17, 17)\n")
        .stdout_has("uploadProgress(0, 0)\n")
        .stdout_has("readyRead()\n");
}

#[test]
fn json_output_lists_emissions() {
    let run = sigrec()
        .args(&["request", "-f", "json", "http://eu.httpbin.org/status/200"])
        .passes();
    let json: serde_json::Value = serde_json::from_str(&run.stdout()).unwrap();

    assert_eq!(json["title"], "GET http://eu.httpbin.org/status/200");
    let emissions = json["emissions"].as_array().unwrap();
    assert_eq!(emissions.len(), 5);
    assert_eq!(emissions[0]["event"]["name"], "metaDataChanged");
    assert_eq!(emissions[4]["event"]["name"], "destroyed");
}

#[test]
fn debug_logging_goes_to_stderr() {
    sigrec()
        .env("RUST_LOG", "sigrec_core=debug")
        .args(&["request", "http://eu.httpbin.org/status/200"])
        .passes()
        .stderr_has("inspector attached")
        .stdout_lacks("inspector attached");
}
