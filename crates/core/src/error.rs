// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Errors raised while cataloging, subscribing and attributing emissions

use crate::introspect::ConnectError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InspectError {
    #[error("target exposes no introspection metadata")]
    IntrospectionUnavailable,
    #[error("emission reported at index {reported} matched no buffered capture")]
    UnattributableEmission { reported: usize },
    #[error("failed to subscribe to {signature}: {source}")]
    Subscribe {
        signature: String,
        #[source]
        source: ConnectError,
    },
}
