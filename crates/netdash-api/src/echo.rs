// Caller-address echo client
//
// Asks an ipify-style service which public address the request came
// from. The service answers `{"ip": "a.b.c.d"}`; anything that is not a
// dotted-quad IPv4 address is reported as malformed rather than passed on.

use std::net::Ipv4Addr;

use serde::Deserialize;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Public ipify endpoint returning the caller address as JSON.
pub const DEFAULT_ECHO_URL: &str = "https://api.ipify.org?format=json";

#[derive(Debug, Deserialize)]
struct EchoResponse {
    ip: String,
}

/// HTTP client for a single echo endpoint.
pub struct IpEchoClient {
    http: reqwest::Client,
    url: Url,
    timeout_secs: u64,
}

impl IpEchoClient {
    /// Create a client for `url` from a `TransportConfig`.
    pub fn new(url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self {
            http,
            url,
            timeout_secs: transport.timeout.as_secs(),
        })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, url: Url) -> Self {
        Self {
            http,
            url,
            timeout_secs: 0,
        }
    }

    /// The endpoint this client queries.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Fetch the caller's public IPv4 address.
    ///
    /// One attempt, no retry. The body is validated before it is returned:
    /// a response that decodes but carries an IPv6 address, a hostname or
    /// whitespace-padded junk is an [`Error::MalformedAddress`].
    pub async fn fetch_caller_ip(&self) -> Result<Ipv4Addr, Error> {
        debug!(url = %self.url, "querying caller address echo service");

        let resp = self.http.get(self.url.clone()).send().await.map_err(|e| {
            if e.is_timeout() {
                Error::Timeout {
                    timeout_secs: self.timeout_secs,
                }
            } else {
                Error::Transport(e)
            }
        })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
            });
        }

        let body = resp.text().await?;
        trace!(body = %body, "echo response body");

        let parsed: EchoResponse =
            serde_json::from_str(&body).map_err(|e| Error::Deserialization {
                message: e.to_string(),
                body: body.clone(),
            })?;

        parse_ipv4(&parsed.ip)
    }
}

/// Strict dotted-quad parse; `Ipv4Addr::from_str` already rejects
/// leading zeros, extra octets and surrounding whitespace.
fn parse_ipv4(raw: &str) -> Result<Ipv4Addr, Error> {
    raw.parse::<Ipv4Addr>()
        .map_err(|_| Error::MalformedAddress { raw: raw.to_owned() })
}
