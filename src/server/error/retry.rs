use sea_orm::DbErr;

use super::Error;

/// Strategy for handling errors in a retry context
pub enum ErrorRetryStrategy {
    /// Retry with exponential backoff (server errors)
    Retry,
    /// Failed permanently (bad request)
    Fail,
}

impl Error {
    /// Determine error retry strategy based upon application Error type
    pub fn to_retry_strategy(&self) -> ErrorRetryStrategy {
        match self {
            Self::EsiError(eve_esi::Error::ReqwestError(reqwest_error)) => {
                reqwest_retry_strategy(reqwest_error)
            }
            Self::ReqwestError(reqwest_error) => reqwest_retry_strategy(reqwest_error),

            Self::DbErr(db_err) => match db_err {
                // Connection errors are transient
                DbErr::ConnectionAcquire(_) | DbErr::Conn(_) => ErrorRetryStrategy::Retry,
                _ => ErrorRetryStrategy::Fail,
            },

            // ESI errors - other errors, OAuth, parsing, etc
            Self::EsiError(_) => ErrorRetryStrategy::Fail,

            Self::ConfigError(_) => ErrorRetryStrategy::Fail,
            Self::TrustError(_) => ErrorRetryStrategy::Fail,
            Self::ContactsError(_) => ErrorRetryStrategy::Fail,
            Self::IoError(_) => ErrorRetryStrategy::Fail,
        }
    }
}

fn reqwest_retry_strategy(error: &reqwest::Error) -> ErrorRetryStrategy {
    match error.status() {
        // ESI is temporarily unavailable, backoff and retry later
        Some(status) if status.is_server_error() => ErrorRetryStrategy::Retry,
        // Unknown entity or invalid request, retrying won't change the answer
        Some(_) => ErrorRetryStrategy::Fail,
        None if error.is_decode() => ErrorRetryStrategy::Fail,
        // Network error or connection issue
        None => ErrorRetryStrategy::Retry,
    }
}
