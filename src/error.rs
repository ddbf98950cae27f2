/// Classifies a BookingSync API failure carried by [`Error::Api`].
///
/// All three classes surface through the same variant so callers that only
/// care about "the provider rejected this" can match once; the kind is there
/// for callers (and tests) that need to tell them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// The response body carried a structured, non-empty `errors` list.
    Validation,
    /// Error status code without a structured `errors` list.
    Http,
    /// A profile response contained no usable `accounts` entry.
    MissingAccount,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// OAuth2 error response (HTTP 400/401 with standard error JSON body).
    /// Per RFC 6749 Section 5.2.
    #[error("OAuth2 error: {code}")]
    OAuthRequest {
        code: String,
        description: Option<String>,
        uri: Option<String>,
        state: Option<String>,
    },

    /// Token endpoint returned a non-200/400/401 status.
    #[error("Unexpected HTTP status: {status}")]
    UnexpectedResponse { status: u16 },

    /// Token endpoint returned 400/401 but the body is not valid
    /// OAuth2 error JSON.
    #[error("Unparseable error response (HTTP {status})")]
    UnexpectedErrorBody { status: u16, body: String },

    /// Network / transport error from the HTTP client.
    #[error("HTTP request failed: {0}")]
    Http(#[from] Box<dyn std::error::Error + Send + Sync>),

    /// A required field is missing from the token response JSON.
    #[error("Missing or invalid field: {field}")]
    MissingField { field: &'static str },

    /// The BookingSync API reported a failure. `message` is the formatted
    /// diagnostic, `status` the HTTP status of the response (0 when a
    /// profile response lacked an account), and `body` the raw, undecoded
    /// response text.
    #[error("BookingSync API error: {message}")]
    Api {
        kind: ApiErrorKind,
        message: String,
        status: u16,
        body: String,
    },
}
