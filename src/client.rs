use std::time::Duration;

use atty::Stream;
use colored::Colorize;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Method, Url};
use serde::de::DeserializeOwned;

use crate::address::{Address, Provenance};
use crate::error::{DataverseError, Result};
use crate::handle::Handle;
use crate::request::RequestType;
use crate::response::Response;

/// Transport settings for [`BaseClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Total time allowed for a single request.
    pub timeout: Duration,
    /// Time allowed to establish a connection.
    pub connect_timeout: Duration,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            timeout: Duration::from_secs(300),
            connect_timeout: Duration::from_secs(60),
            user_agent: format!("dvscript/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// Defaults, with the request timeout (in seconds) overridable through
    /// the `DATAVERSE_TIMEOUT` environment variable.
    pub fn from_env() -> Self {
        let mut config = ClientConfig::default();
        if let Some(seconds) = std::env::var("DATAVERSE_TIMEOUT")
            .ok()
            .and_then(|v| v.trim().parse::<u64>().ok())
        {
            config.timeout = Duration::from_secs(seconds);
        }
        config
    }
}

/// This is the base client that will be used to make requests to the API.
///
/// It wraps a blocking reqwest client. Unlike a client bound to a single
/// instance, it holds no base URL and no token: both travel with the
/// [`Address`] of each call, so handles returned from one instance can be
/// chained without reconfiguring anything.
#[derive(Debug, Clone)]
pub struct BaseClient {
    client: Client,
}

impl BaseClient {
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::from_env())
    }

    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .default_headers(Self::default_headers(&config))
            .build()
            .map_err(|e| DataverseError::Request {
                status: None,
                uri: String::new(),
                message: format!("Failed to build HTTP client: {e}"),
            })?;

        Ok(BaseClient { client })
    }

    fn default_headers(config: &ClientConfig) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("Accept", HeaderValue::from_static("application/json"));
        headers.insert(
            "User-Agent",
            HeaderValue::from_str(&config.user_agent)
                .unwrap_or(HeaderValue::from_static("dvscript")),
        );
        headers
    }

    /// GET the resource behind `target` and wrap its payload in a handle.
    pub fn get<T: DeserializeOwned>(&self, target: &impl Provenance) -> Result<Handle<T>> {
        self.fetch(Method::GET, &target.address(), RequestType::Plain, None)
    }

    /// DELETE the resource behind `target`.
    pub fn delete<T: DeserializeOwned>(&self, target: &impl Provenance) -> Result<Handle<T>> {
        self.fetch(Method::DELETE, &target.address(), RequestType::Plain, None)
    }

    /// POST a JSON body to `address`.
    ///
    /// `provenance` overrides the address recorded in the returned handle, for
    /// writes whose result lives somewhere other than where it was posted to.
    pub fn post<T: DeserializeOwned>(
        &self,
        address: &Address,
        context: RequestType,
        provenance: Option<Address>,
    ) -> Result<Handle<T>> {
        self.fetch(Method::POST, address, context, provenance)
    }

    /// Dispatches one request, unwraps the envelope and attaches provenance.
    pub fn fetch<T: DeserializeOwned>(
        &self,
        method: Method,
        address: &Address,
        context: RequestType,
        provenance: Option<Address>,
    ) -> Result<Handle<T>> {
        let data = self.perform_request(method, address, context)?;
        Ok(Handle::new(data, provenance.unwrap_or_else(|| address.clone())))
    }

    fn perform_request<T: DeserializeOwned>(
        &self,
        method: Method,
        address: &Address,
        context: RequestType,
    ) -> Result<T> {
        let url = address.uri();
        print_call(&method, url);

        let request = self
            .client
            .request(method, url.clone())
            .header("X-Dataverse-key", address.credential().secret());

        let response =
            context
                .to_request(request)
                .send()
                .map_err(|e| DataverseError::Request {
                    status: e.status().map(|s| s.as_u16()),
                    uri: url.to_string(),
                    message: e.to_string(),
                })?;

        evaluate_response(response, url)
    }
}

/// Checks the HTTP status and the envelope of a response and extracts its `data`.
///
/// A non-2xx status, an `ERROR` envelope, an undecodable body and a missing
/// `data` field are all request errors. None of them is retried.
pub fn evaluate_response<T: DeserializeOwned>(
    response: reqwest::blocking::Response,
    uri: &Url,
) -> Result<T> {
    let status = response.status();
    let request_error = |message: String| DataverseError::Request {
        status: Some(status.as_u16()),
        uri: uri.to_string(),
        message,
    };

    let raw_content = response.text().map_err(|e| request_error(e.to_string()))?;

    if !status.is_success() {
        // Dataverse usually explains itself in the envelope's message
        let message = serde_json::from_str::<Response<serde_json::Value>>(&raw_content)
            .ok()
            .and_then(|envelope| envelope.message)
            .map(|message| message.to_string())
            .unwrap_or(raw_content);
        return Err(request_error(message));
    }

    let envelope = serde_json::from_str::<Response<T>>(&raw_content)
        .map_err(|e| request_error(format!("{e} - {raw_content}")))?;

    if envelope.status.is_err() {
        return Err(request_error(
            envelope
                .message
                .map(|m| m.to_string())
                .unwrap_or_else(|| "The server reported an error".to_string()),
        ));
    }

    envelope
        .data
        .ok_or_else(|| request_error("The response carries no data".to_string()))
}

fn debug_enabled() -> bool {
    std::env::var("DEBUG").is_ok() && atty::is(Stream::Stderr)
}

pub(crate) fn print_debug(topic: &str, message: impl AsRef<str>) {
    if debug_enabled() {
        eprintln!("{}: {}", topic.blue().bold(), message.as_ref());
    }
}

pub(crate) fn print_error(error: impl AsRef<str>) {
    eprintln!("\n{} {}\n", "Error:".red().bold(), error.as_ref());
}

fn print_call(method: &Method, url: &Url) {
    print_debug("Calling", format!("{method} {url}"));
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde::Deserialize;
    use serde_json::json;

    use crate::credential::ApiKey;
    use crate::test_utils::{envelope, mock_address};

    use super::*;

    #[derive(Deserialize, Debug, PartialEq)]
    struct ExampleData {
        id: i64,
        alias: String,
    }

    #[test]
    fn test_get_unwraps_data_and_attaches_provenance() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/dataverses/visus")
                .header("X-Dataverse-key", "secret");
            then.status(200)
                .json_body(envelope(json!({"id": 3, "alias": "visus"})));
        });

        let client = BaseClient::new().unwrap();
        let address = mock_address(&server, "/api/dataverses/visus");

        let handle: Handle<ExampleData> = client.get(&address).expect("Request failed");

        mock.assert();
        assert_eq!(
            handle.data,
            ExampleData {
                id: 3,
                alias: "visus".to_string()
            }
        );
        assert_eq!(handle.request_uri(), address.uri());
        assert_eq!(handle.credential().secret(), "secret");
    }

    #[test]
    fn test_post_sends_json_and_overrides_provenance() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/api/dataverses/visus")
                .header("Content-Type", "application/json")
                .json_body(json!({"alias": "child"}));
            then.status(201)
                .json_body(envelope(json!({"id": 4, "alias": "child"})));
        });

        let client = BaseClient::new().unwrap();
        let parent = mock_address(&server, "/api/dataverses/visus");
        let child = parent.sibling("child").unwrap();
        let context = RequestType::json(&json!({"alias": "child"})).unwrap();

        let handle: Handle<ExampleData> = client
            .post(&parent, context, Some(child.clone()))
            .expect("Request failed");

        mock.assert();
        assert_eq!(handle.request_uri(), child.uri());
    }

    #[test]
    fn test_non_success_status_is_a_request_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/dataverses/missing");
            then.status(404).json_body(json!({
                "status": "ERROR",
                "message": "Can't find dataverse with identifier='missing'"
            }));
        });

        let client = BaseClient::new().unwrap();
        let address = mock_address(&server, "/api/dataverses/missing");

        let result: Result<Handle<ExampleData>> = client.get(&address);

        match result {
            Err(DataverseError::Request {
                status, message, ..
            }) => {
                assert_eq!(status, Some(404));
                assert_eq!(message, "Can't find dataverse with identifier='missing'");
            }
            other => panic!("Expected a request error, got {other:?}"),
        }
    }

    #[test]
    fn test_error_envelope_is_a_request_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/dataverses/odd");
            then.status(200)
                .json_body(json!({"status": "ERROR", "message": "Something broke"}));
        });

        let client = BaseClient::new().unwrap();
        let address = mock_address(&server, "/api/dataverses/odd");

        let result: Result<Handle<ExampleData>> = client.get(&address);
        assert!(matches!(result, Err(DataverseError::Request { .. })));
    }

    #[test]
    fn test_undecodable_body_is_a_request_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/dataverses/html");
            then.status(200).body("<html>maintenance</html>");
        });

        let client = BaseClient::new().unwrap();
        let address = mock_address(&server, "/api/dataverses/html");

        let result: Result<Handle<ExampleData>> = client.get(&address);
        assert!(matches!(
            result,
            Err(DataverseError::Request {
                status: Some(200),
                ..
            })
        ));
    }

    #[test]
    fn test_unreachable_host_is_a_request_error_without_status() {
        let client = BaseClient::with_config(ClientConfig {
            timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(5),
            ..Default::default()
        })
        .unwrap();
        let address =
            Address::from_uri("http://127.0.0.1:1/api/dataverses/root", Some(ApiKey::new("k")))
                .unwrap();

        let result: Result<Handle<serde_json::Value>> = client.get(&address);

        match result {
            Err(DataverseError::Request { status, .. }) => assert_eq!(status, None),
            other => panic!("Expected a request error, got {other:?}"),
        }
    }

    #[test]
    fn test_config_from_env_reads_timeout() {
        std::env::set_var("DATAVERSE_TIMEOUT", "12");
        let config = ClientConfig::from_env();
        std::env::remove_var("DATAVERSE_TIMEOUT");

        assert_eq!(config.timeout, Duration::from_secs(12));
        assert_eq!(config.connect_timeout, Duration::from_secs(60));
    }
}
