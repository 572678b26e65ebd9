pub mod draw;
pub mod players;
pub mod matches;
pub mod maps;

/// Body of every non-2xx response: `{"error": "..."}`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ErrorResponse
{
    pub error: String,
}

impl ErrorResponse
{
    pub fn new<S>(error: S) -> ErrorResponse
        where S: Into<String>
    {
        ErrorResponse {
            error: error.into(),
        }
    }
}

/// Body of delete-style endpoints that only confirm what happened.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MessageResponse
{
    pub message: String,
}

impl MessageResponse
{
    pub fn new<S>(message: S) -> MessageResponse
        where S: Into<String>
    {
        MessageResponse {
            message: message.into(),
        }
    }
}
