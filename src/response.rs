/// Represents the status of a response from the Dataverse API.
///
/// We distinguish success and error responses with this enum.
/// Once the response is parsed, we can check if it's an error or not
/// and act accordingly.
#[derive(Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub enum Status {
    /// Indicates a successful response
    OK,
    /// Indicates an error response
    ERROR,
}

impl Status {
    /// Returns true if the status is ERROR
    pub fn is_err(&self) -> bool {
        matches!(self, Status::ERROR)
    }
}

/// The envelope every Dataverse response is wrapped in.
///
/// Only `data` is handed back to callers; `status` and `message` decide
/// whether the call counts as failed.
#[derive(Debug, serde::Deserialize, serde::Serialize)]
pub struct Response<T> {
    /// The status of the response (OK or ERROR)
    pub status: Status,

    /// Optional data payload returned by the API
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    /// Optional message providing additional information
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,
}

/// Represents a message that can be either plain text or nested.
///
/// This is a workaround to tackle the issue of having a nested message
/// in the response currently caused by the editMetadata endpoint.
#[derive(Debug, serde::Deserialize, serde::Serialize)]
#[serde(untagged)]
pub enum Message {
    /// A simple string message
    PlainMessage(String),
    /// A message wrapped in a nested structure
    NestedMessage(NestedMessage),
}

impl std::fmt::Display for Message {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Message::PlainMessage(message) => write!(f, "{}", message),
            Message::NestedMessage(nested_message) => write!(f, "{}", nested_message),
        }
    }
}

/// Represents a nested message structure returned by some Dataverse endpoints
#[derive(Debug, serde::Deserialize, serde::Serialize)]
pub struct NestedMessage {
    /// The actual message content
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl std::fmt::Display for NestedMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.message.as_deref().unwrap_or("No message"))
    }
}

/// The `data` of endpoints that only confirm what they did, e.g. deletions.
#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Confirmation {
    pub message: String,
}
