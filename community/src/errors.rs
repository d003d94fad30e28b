use shared_kernel::http_client::HttpClientError;
use thiserror::Error;

/// Login or registration did not go through. The message is meant to be
/// shown next to the form as is.
#[derive(Error, Debug)]
pub enum AuthFailure {
    #[error("{0}")]
    Rejected(String),
    #[error("{0}")]
    InvalidInput(String),
    #[error("{fallback}")]
    InternalError {
        fallback: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

impl AuthFailure {
    pub(crate) fn from_http(err: HttpClientError, fallback: &'static str) -> Self {
        match err.server_message() {
            Some(message) => AuthFailure::Rejected(message.to_owned()),
            None => match err {
                HttpClientError::Rejected { .. } => AuthFailure::Rejected(fallback.to_owned()),
                other => AuthFailure::InternalError {
                    fallback,
                    source: other.into(),
                },
            },
        }
    }
}

/// An event suggestion was refused. The form stays editable.
#[derive(Error, Debug)]
pub enum SubmissionFailure {
    #[error("{0}")]
    Rejected(String),
    #[error("{0}")]
    InvalidInput(String),
    #[error("{fallback}")]
    InternalError {
        fallback: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

impl SubmissionFailure {
    pub(crate) fn from_http(err: HttpClientError, fallback: &'static str) -> Self {
        match err.server_message() {
            Some(message) => SubmissionFailure::Rejected(message.to_owned()),
            None => match err {
                HttpClientError::Rejected { .. } => SubmissionFailure::Rejected(fallback.to_owned()),
                other => SubmissionFailure::InternalError {
                    fallback,
                    source: other.into(),
                },
            },
        }
    }
}
