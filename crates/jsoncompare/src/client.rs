use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::diff::DifferenceRecord;

/// Opaque token identifying one comparison handshake.
///
/// Returned by the first handshake step and consumed by the second. Plain
/// data: the caller threads it between the calls, the client keeps no
/// session state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Failures while talking to the comparison service.
#[derive(Debug)]
pub enum ClientError {
    /// Transport or decoding failure reported by the HTTP stack.
    Http(reqwest::Error),
    /// The service answered with a non-success HTTP status.
    Status(reqwest::StatusCode),
    /// The service answered but flagged the request as unsuccessful.
    Rejected(&'static str),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Http(error) => write!(f, "{error}"),
            ClientError::Status(status) => write!(f, "HTTP error: status {status}"),
            ClientError::Rejected(endpoint) => {
                write!(f, "comparison service rejected the request to {endpoint}")
            }
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ClientError::Http(error) => Some(error),
            ClientError::Status(_) | ClientError::Rejected(_) => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(error: reqwest::Error) -> Self {
        ClientError::Http(error)
    }
}

const FIRST_PAYLOAD: &str = "/json/first-payload";
const SECOND_PAYLOAD: &str = "/json/second-payload";

#[derive(Serialize)]
struct FirstPayloadRequest<'a> {
    payload: &'a Value,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FirstPayloadResponse {
    success: bool,
    session_id: SessionId,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SecondPayloadRequest<'a> {
    session_id: &'a SessionId,
    payload: &'a Value,
}

#[derive(Deserialize)]
struct SecondPayloadResponse {
    success: bool,
    differences: Vec<DifferenceRecord>,
}

fn check_status(status: reqwest::StatusCode) -> Result<(), ClientError> {
    if status.is_success() {
        Ok(())
    } else {
        Err(ClientError::Status(status))
    }
}

/// Passes `data` through unless the service flagged the request as
/// unsuccessful in the response body.
fn check_accepted<T>(endpoint: &'static str, success: bool, data: T) -> Result<T, ClientError> {
    if success {
        Ok(data)
    } else {
        Err(ClientError::Rejected(endpoint))
    }
}

/// Blocking client for the remote comparison service.
///
/// The service computes differences through a two-step handshake: the first
/// document opens a session, the second document closes it and returns the
/// difference list. The base address is explicit; there is no default
/// endpoint.
///
/// # Examples
///
/// ```no_run
/// use jsoncompare::CompareClient;
/// use serde_json::json;
///
/// # fn main() -> Result<(), jsoncompare::ClientError> {
/// let client = CompareClient::new("http://localhost:3000/api");
/// let differences = client.compare(
///     &json!({"name": "John"}),
///     &json!({"name": "Jane"}),
/// )?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct CompareClient {
    base_url: String,
    http: reqwest::blocking::Client,
}

impl CompareClient {
    /// Creates a client for the service at `base_url`. A trailing `/` is
    /// ignored.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> CompareClient {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        CompareClient {
            base_url,
            http: reqwest::blocking::Client::new(),
        }
    }

    /// Submits the first document, opening a comparison session.
    ///
    /// # Errors
    ///
    /// Fails on transport errors, non-success HTTP statuses, and responses
    /// the service flagged as unsuccessful.
    pub fn send_first_payload(&self, payload: &Value) -> Result<SessionId, ClientError> {
        let response = self
            .http
            .post(format!("{}{FIRST_PAYLOAD}", self.base_url))
            .json(&FirstPayloadRequest { payload })
            .send()?;
        check_status(response.status())?;
        let body: FirstPayloadResponse = response.json()?;
        check_accepted(FIRST_PAYLOAD, body.success, body.session_id)
    }

    /// Submits the second document under an open session, returning the
    /// differences the service computed.
    ///
    /// # Errors
    ///
    /// Fails on transport errors, non-success HTTP statuses, and responses
    /// the service flagged as unsuccessful.
    pub fn send_second_payload(
        &self,
        session: &SessionId,
        payload: &Value,
    ) -> Result<Vec<DifferenceRecord>, ClientError> {
        let response = self
            .http
            .post(format!("{}{SECOND_PAYLOAD}", self.base_url))
            .json(&SecondPayloadRequest {
                session_id: session,
                payload,
            })
            .send()?;
        check_status(response.status())?;
        let body: SecondPayloadResponse = response.json()?;
        check_accepted(SECOND_PAYLOAD, body.success, body.differences)
    }

    /// Runs the two-step handshake end-to-end, threading the session token
    /// from the first response into the second request.
    ///
    /// # Errors
    ///
    /// Fails when either handshake step fails.
    pub fn compare(
        &self,
        first: &Value,
        second: &Value,
    ) -> Result<Vec<DifferenceRecord>, ClientError> {
        let session = self.send_first_payload(first)?;
        self.send_second_payload(&session, second)
    }
}
