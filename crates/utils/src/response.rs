use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// `{ "message": ... }`, the body of every error and of acknowledgements
/// that carry no data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Attach a payload whose fields are flattened next to `message`.
    pub fn with<T: Serialize>(self, data: T) -> DataResponse<T> {
        DataResponse {
            message: self.message,
            data,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataResponse<T> {
    pub message: String,
    #[serde(flatten)]
    pub data: T,
}
