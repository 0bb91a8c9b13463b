// netdash-api: HTTP client for the caller-address echo service

pub mod echo;
pub mod error;
pub mod transport;

pub use echo::{DEFAULT_ECHO_URL, IpEchoClient};
pub use error::Error;
pub use transport::TransportConfig;
