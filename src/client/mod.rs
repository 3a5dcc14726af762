//! Client for the external compiler service
//!
//! [`CompileClient`] turns a source snapshot into one `POST /compile` request and
//! hands back a normalized [`CompileResult`]. The network itself sits behind the
//! [`Transport`] trait so the client can run against [`HttpTransport`] in the
//! binary and an in-memory transport in tests.
//!
//! # Failure mapping
//!
//! | What happened                                  | Result                     |
//! |------------------------------------------------|----------------------------|
//! | source is blank                                | [`ClientError::Validation`] |
//! | connection refused, body unreadable            | [`ClientError::Network`]    |
//! | non-2xx status and no parseable envelope       | [`ClientError::Status`]     |
//! | 2xx status, body isn't the envelope            | [`ClientError::Protocol`]   |
//! | envelope with `success: false`                 | `Ok(result)`               |

pub mod envelope;
pub mod errors;
pub mod examples;

pub use envelope::{CompileResult, Instruction, Token};
pub use errors::{ClientError, Result};
pub use examples::apply_example;

use std::time::Duration;
use tracing::{debug, warn};

/// Path of the compile endpoint
pub const COMPILE_PATH: &str = "/compile";

/// Path prefix of the example endpoint
pub const EXAMPLES_PATH: &str = "/examples/";

/// Status and body of one HTTP exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Blocking request/response transport.
///
/// Implementations return `Ok` for any response that arrived, whatever its
/// status; only transport-level failures map to [`ClientError::Network`].
pub trait Transport: Send + Sync {
    /// POST a form-encoded body
    fn post_form(&self, path: &str, body: String) -> Result<HttpResponse>;

    /// GET a resource
    fn get(&self, path: &str) -> Result<HttpResponse>;
}

/// [`Transport`] over HTTP using a shared `ureq` agent
pub struct HttpTransport {
    agent: ureq::Agent,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: &str, connect_timeout: Duration) -> Self {
        HttpTransport {
            agent: ureq::AgentBuilder::new()
                .timeout_connect(connect_timeout)
                .build(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Transport for HttpTransport {
    fn post_form(&self, path: &str, body: String) -> Result<HttpResponse> {
        let result = self
            .agent
            .post(&self.url(path))
            .set("Content-Type", "application/x-www-form-urlencoded")
            .send_string(&body);
        read_response(result)
    }

    fn get(&self, path: &str) -> Result<HttpResponse> {
        read_response(self.agent.get(&self.url(path)).call())
    }
}

fn read_response(
    result: std::result::Result<ureq::Response, ureq::Error>,
) -> Result<HttpResponse> {
    // ureq reports 4xx/5xx as errors; the body may still be a usable envelope
    let response = match result {
        Ok(response) => response,
        Err(ureq::Error::Status(_, response)) => response,
        Err(ureq::Error::Transport(transport)) => {
            return Err(ClientError::Network(transport.to_string()));
        }
    };

    let status = response.status();
    let body = response
        .into_string()
        .map_err(|e| ClientError::Network(format!("failed to read response body: {}", e)))?;

    Ok(HttpResponse { status, body })
}

/// Immutable snapshot of the source at submission time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileRequest {
    source: String,
}

impl CompileRequest {
    /// Snapshot `source`, rejecting blank input
    pub fn new(source: &str) -> Result<Self> {
        if source.trim().is_empty() {
            return Err(ClientError::Validation);
        }
        Ok(CompileRequest {
            source: source.to_string(),
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// `source=<encoded>` form body
    pub fn form_body(&self) -> String {
        format!("source={}", encode_uri_component(&self.source))
    }
}

/// Sends compile requests and example reads through a [`Transport`]
pub struct CompileClient<T: Transport = HttpTransport> {
    transport: T,
}

impl CompileClient<HttpTransport> {
    /// Client for the service at `base_url`
    pub fn connect(base_url: &str, connect_timeout: Duration) -> Self {
        CompileClient::new(HttpTransport::new(base_url, connect_timeout))
    }
}

impl<T: Transport> CompileClient<T> {
    pub fn new(transport: T) -> Self {
        CompileClient { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Validate, send and normalize in one call
    pub fn submit(&self, source: &str) -> Result<CompileResult> {
        let request = CompileRequest::new(source)?;
        self.send(request)
    }

    /// Send an already validated request
    pub fn send(&self, request: CompileRequest) -> Result<CompileResult> {
        let body = request.form_body();
        debug!(bytes = body.len(), "POST {}", COMPILE_PATH);

        let response = self.transport.post_form(COMPILE_PATH, body).map_err(|err| {
            warn!(%err, "compile request failed");
            err
        })?;

        match CompileResult::from_body(&response.body) {
            Ok(result) => {
                debug!(
                    status = response.status,
                    success = result.success,
                    "compile response decoded"
                );
                Ok(result)
            }
            Err(err) if !response.is_success() => {
                warn!(status = response.status, %err, "compile endpoint returned an error status");
                Err(ClientError::Status(response.status))
            }
            Err(err) => {
                warn!(%err, "malformed compile response");
                Err(err)
            }
        }
    }
}

/// Percent-encode like `encodeURIComponent`: everything outside
/// `A-Z a-z 0-9 - _ . ! ~ * ' ( )` becomes `%XX` per UTF-8 byte.
pub fn encode_uri_component(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(byte as char),
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_uri_component() {
        assert_eq!(encode_uri_component("print(42)"), "print(42)");
        assert_eq!(encode_uri_component("let x = 1;\n"), "let%20x%20%3D%201%3B%0A");
        assert_eq!(encode_uri_component("a+b&c"), "a%2Bb%26c");
        assert_eq!(encode_uri_component("é"), "%C3%A9");
    }

    #[test]
    fn test_request_rejects_blank_source() {
        assert_eq!(CompileRequest::new(""), Err(ClientError::Validation));
        assert_eq!(CompileRequest::new(" \n\t "), Err(ClientError::Validation));
    }

    #[test]
    fn test_request_form_body() {
        let request = CompileRequest::new("print x;").unwrap();
        assert_eq!(request.form_body(), "source=print%20x%3B");
        assert_eq!(request.source(), "print x;");
    }

    #[test]
    fn test_status_range() {
        let ok = HttpResponse { status: 204, body: String::new() };
        let missing = HttpResponse { status: 404, body: String::new() };
        assert!(ok.is_success());
        assert!(!missing.is_success());
    }
}
