use serde::{Deserialize, Serialize};

/// The response when an error occurs with an API request
#[derive(Clone, Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct ErrorDto {
    /// The error message
    pub error: String,
}

/// The response when an API request succeeds without returning a record
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct MessageDto {
    pub message: String,
}

impl MessageDto {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
