use crate::account::Account;
use crate::client::{ClientAuthMethod, OAuth2Client, SCOPE_SEPARATOR};
use crate::error::Error;
use crate::http::HttpClient;
use crate::request::create_api_request;
use crate::response::check_response;
use crate::tokens::OAuth2Tokens;

const AUTHORIZATION_ENDPOINT: &str = "https://www.bookingsync.com/oauth/authorize";
const TOKEN_ENDPOINT: &str = "https://www.bookingsync.com/oauth/token";
const ACCOUNTS_ENDPOINT: &str = "https://www.bookingsync.com/api/v3/accounts";

/// Scopes requested when the caller does not name any.
const DEFAULT_SCOPES: &[&str] = &["public"];

/// OAuth 2.0 client for [BookingSync](https://developers.bookingsync.com/guides/oauth-introduction/).
///
/// BookingSync is a confidential-client provider: the token endpoint expects
/// `client_id` and `client_secret` as form body parameters. Beyond the
/// authorization-code flow and token refresh, this client can fetch the
/// authorized account (the resource owner) from the `/api/v3/accounts`
/// endpoint and expose it as an [`Account`].
///
/// # Setup
///
/// 1. Register an application in the BookingSync developer portal.
/// 2. Set the redirect URI to match the `redirect_uri` you pass to
///    [`BookingSync::new`].
/// 3. Obtain the **Client ID** and **Client Secret** from the application
///    page.
///
/// # Scopes
///
/// BookingSync uses space-separated scopes; when you request none, the
/// default `public` scope is used. Common scopes include:
///
/// | Scope | Description |
/// |-------|-------------|
/// | `public` | Read-only access to public account data (default) |
/// | `bookings_read` | Read bookings |
/// | `bookings_write` | Create and modify bookings |
/// | `rentals_read` | Read rentals |
///
/// # Example
///
/// ```rust
/// use bookingsync_oauth::{BookingSync, ReqwestClient, generate_state};
///
/// # async fn example() -> Result<(), bookingsync_oauth::Error> {
/// let bookingsync = BookingSync::new(
///     "your-client-id",
///     "your-client-secret",
///     "https://example.com/callback",
/// );
///
/// // Step 1: Generate CSRF state and redirect the user.
/// let state = generate_state();
/// let url = bookingsync.authorization_url(&state, &[]);
/// // Store `state` in the user's session, then redirect to `url`.
///
/// // Step 2: In your callback handler, exchange the authorization code.
/// let http = ReqwestClient::new();
/// let tokens = bookingsync
///     .validate_authorization_code(&http, "authorization-code")
///     .await?;
///
/// // Step 3: Fetch the account the token was issued for.
/// let account = bookingsync.fetch_resource_owner(&http, &tokens).await?;
/// println!("Authorized account: {:?}", account.business_name());
///
/// // Step 4 (optional): Refresh an expired access token.
/// let refreshed = bookingsync
///     .refresh_access_token(&http, tokens.refresh_token()?)
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct BookingSync {
    client: OAuth2Client,
    authorization_endpoint: String,
    token_endpoint: String,
    accounts_endpoint: String,
}

impl BookingSync {
    /// Creates a new BookingSync OAuth 2.0 client configured with
    /// production endpoints.
    ///
    /// # Arguments
    ///
    /// * `client_id` - The OAuth 2.0 client ID from the developer portal.
    /// * `client_secret` - The OAuth 2.0 client secret from the developer portal.
    /// * `redirect_uri` - The URI BookingSync will redirect to after
    ///   authorization. Must match the registered redirect URI.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            client: OAuth2Client::new(
                client_id,
                Some(client_secret.into()),
                Some(redirect_uri.into()),
                ClientAuthMethod::RequestBody,
            ),
            authorization_endpoint: AUTHORIZATION_ENDPOINT.to_string(),
            token_endpoint: TOKEN_ENDPOINT.to_string(),
            accounts_endpoint: ACCOUNTS_ENDPOINT.to_string(),
        }
    }
}

#[cfg(any(test, feature = "testing"))]
impl BookingSync {
    /// Creates a BookingSync client with custom endpoint URLs.
    ///
    /// This is useful for integration testing with mock servers (e.g.
    /// [`wiremock`](https://docs.rs/wiremock)). Only available when the
    /// `testing` feature is enabled or in `#[cfg(test)]` builds.
    pub fn with_endpoints(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
        authorization_endpoint: &str,
        token_endpoint: &str,
        accounts_endpoint: &str,
    ) -> Self {
        Self {
            client: OAuth2Client::new(
                client_id,
                Some(client_secret.into()),
                Some(redirect_uri.into()),
                ClientAuthMethod::RequestBody,
            ),
            authorization_endpoint: authorization_endpoint.to_string(),
            token_endpoint: token_endpoint.to_string(),
            accounts_endpoint: accounts_endpoint.to_string(),
        }
    }
}

impl BookingSync {
    /// Returns the provider name (`"BookingSync"`).
    pub fn name(&self) -> &'static str {
        "BookingSync"
    }

    /// Scopes requested when [`BookingSync::authorization_url`] is called
    /// with an empty scope list.
    pub fn default_scopes(&self) -> &'static [&'static str] {
        DEFAULT_SCOPES
    }

    /// Separator used when joining multiple scopes into the `scope`
    /// query value (a single space).
    pub fn scope_separator(&self) -> &'static str {
        SCOPE_SEPARATOR
    }

    /// Builds the BookingSync authorization URL that the user should be
    /// redirected to.
    ///
    /// Your application should store `state` in the user's session before
    /// redirecting and compare it with the callback's `state` parameter.
    /// An empty `scopes` slice requests [`BookingSync::default_scopes`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use bookingsync_oauth::{BookingSync, generate_state};
    ///
    /// let bookingsync = BookingSync::new("client-id", "client-secret", "https://example.com/cb");
    /// let state = generate_state();
    ///
    /// let url = bookingsync.authorization_url(&state, &[]);
    /// assert!(url.as_str().starts_with("https://www.bookingsync.com/oauth/authorize"));
    /// ```
    pub fn authorization_url(&self, state: &str, scopes: &[&str]) -> url::Url {
        let scopes = if scopes.is_empty() {
            DEFAULT_SCOPES
        } else {
            scopes
        };
        self.client
            .create_authorization_url(&self.authorization_endpoint, state, scopes)
    }

    /// Exchanges an authorization code for access and refresh tokens.
    ///
    /// Call this in your redirect URI handler after BookingSync redirects
    /// back with a `code` query parameter.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OAuthRequest`] if BookingSync rejects the code, or
    /// [`Error::Http`] on network failure.
    pub async fn validate_authorization_code(
        &self,
        http_client: &(impl HttpClient + ?Sized),
        code: &str,
    ) -> Result<OAuth2Tokens, Error> {
        self.client
            .validate_authorization_code(http_client, &self.token_endpoint, code)
            .await
    }

    /// Refreshes an expired access token using a refresh token.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OAuthRequest`] if the refresh token is invalid or
    /// revoked, or [`Error::Http`] on network failure.
    pub async fn refresh_access_token(
        &self,
        http_client: &(impl HttpClient + ?Sized),
        refresh_token: &str,
    ) -> Result<OAuth2Tokens, Error> {
        self.client
            .refresh_access_token(http_client, &self.token_endpoint, refresh_token, &[])
            .await
    }

    /// URL of the resource-owner profile for `owner_id`, or of the
    /// accounts collection when the id is unknown. Callers must tolerate
    /// both shapes: the single-resource response and the collection
    /// response carry the same `accounts` array.
    pub fn resource_owner_url(&self, owner_id: Option<u64>) -> String {
        match owner_id {
            Some(id) => format!("{}/{id}", self.accounts_endpoint),
            None => self.accounts_endpoint.clone(),
        }
    }

    /// Fetches the account the given tokens were issued for.
    ///
    /// Performs a bearer-authenticated GET against the accounts endpoint
    /// (using the token's `uid` when present), validates the response, and
    /// wraps the first account record as an [`Account`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Api`] when the API reports a failure or the
    /// response carries no account, [`Error::MissingField`] when the
    /// tokens lack an `access_token`, or [`Error::Http`] on network
    /// failure.
    pub async fn fetch_resource_owner(
        &self,
        http_client: &(impl HttpClient + ?Sized),
        tokens: &OAuth2Tokens,
    ) -> Result<Account, Error> {
        let url = self.resource_owner_url(tokens.resource_owner_id());
        let request = create_api_request(&url, tokens.access_token()?);

        let response = http_client.send(request).await?;
        let data = check_response(response.status, &response.body)?;

        Account::from_response(data, tokens.clone())
    }
}
