mod account;
mod client;
mod error;
mod http;
mod provider;
mod request;
mod response;
mod state;
mod tokens;

// Core
pub use client::{ClientAuthMethod, OAuth2Client};
pub use error::{ApiErrorKind, Error};
pub use http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
pub use tokens::OAuth2Tokens;

// Provider
pub use account::Account;
pub use provider::BookingSync;
pub use response::check_response;

// Utilities
pub use state::generate_state;

// Default HTTP client (behind feature flag)
#[cfg(feature = "reqwest-client")]
pub use http::ReqwestClient;
