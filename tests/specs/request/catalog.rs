//! Catalog specs
//!
//! Verify the signals an inspector subscribes to on a network reply.

use crate::prelude::*;

#[test]
fn leaf_only_catalog_lists_reply_signals() {
    sigrec()
        .args(&["catalog", "--leaf-only"])
        .passes()
        .stdout_eq(
            "  9 NetworkReply:metaDataChanged()\n 10 NetworkReply:finished()\n 11 NetworkReply:errorOccurred(int,string)\n 12 NetworkReply:errorOccurred(int)\n 13 NetworkReply:uploadProgress(int,int)\n 14 NetworkReply:downloadProgress(int,int)\n",
        );
}

#[test]
fn full_catalog_marks_inherited_signals() {
    sigrec()
        .args(&["catalog"])
        .passes()
        .stdout_has("  0 Object:destroyed(object) (inherited)\n")
        .stdout_has("  4 IoDevice:readyRead() (inherited)\n")
        .stdout_has("  9 NetworkReply:metaDataChanged()\n")
        .stdout_lacks("deleteLater")
        .stdout_lacks("abort");
}
