//! Build errors for the session engine builder.

use thiserror::Error;

/// Errors that can occur when building a session engine.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("Store not specified. Call .store(store) before .build()")]
    MissingStore,

    #[error("Namespace must not be empty")]
    EmptyNamespace,

    #[error("Namespace '{0}' must not contain ':'")]
    NamespaceContainsSeparator(String),

    #[error("Mistake limit must be at least 1. Use MistakeLimit::Unlimited for no limit")]
    ZeroMistakeLimit,
}
