use reqwest::blocking::RequestBuilder;
use serde::Serialize;

use crate::error::Result;

/// The body a request carries.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestType {
    /// A plain request with no body.
    Plain,

    /// A JSON request with a JSON body and the content type set to application/json.
    JSON { body: String },
}

impl RequestType {
    /// Serializes `body` into a JSON request.
    pub fn json<T: Serialize + ?Sized>(body: &T) -> Result<Self> {
        Ok(RequestType::JSON {
            body: serde_json::to_string(body)?,
        })
    }

    /// Convert the request type to a request builder.
    ///
    /// # Arguments
    /// * `self` - The request type.
    /// * `request` - The request builder.
    ///
    /// # Returns
    /// The request builder carrying the body, if any.
    pub fn to_request(self, request: RequestBuilder) -> RequestBuilder {
        match self {
            RequestType::Plain => request,
            RequestType::JSON { body } => Self::build_json_request(body, request),
        }
    }

    fn build_json_request(body: String, request: RequestBuilder) -> RequestBuilder {
        request
            .header("Content-Type", "application/json")
            .body(body)
    }
}
