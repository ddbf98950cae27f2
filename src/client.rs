use url::Url;

use crate::error::Error;
use crate::http::HttpClient;
use crate::request::{create_oauth2_request, encode_basic_credentials, send_token_request};
use crate::tokens::OAuth2Tokens;

/// Separator used when joining multiple scopes into one query value.
pub(crate) const SCOPE_SEPARATOR: &str = " ";

/// How a confidential client transmits its credentials on token requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientAuthMethod {
    /// `Authorization: Basic <base64(client_id:client_secret)>` header.
    Basic,
    /// `client_id` and `client_secret` as form body parameters. This is
    /// what the BookingSync token endpoint expects.
    RequestBody,
}

/// Generic authorization-code flow engine: builds authorization URLs and
/// performs token exchange and refresh. Provider specifics (endpoints,
/// scopes, response validation) live on top of it.
pub struct OAuth2Client {
    client_id: String,
    /// None for public clients.
    client_secret: Option<String>,
    redirect_uri: Option<String>,
    auth_method: ClientAuthMethod,
}

impl OAuth2Client {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: Option<String>,
        redirect_uri: Option<String>,
        auth_method: ClientAuthMethod,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret,
            redirect_uri,
            auth_method,
        }
    }

    /// Build an authorization URL with standard parameters:
    /// response_type=code, client_id, state, scope (space-joined),
    /// redirect_uri.
    pub fn create_authorization_url(
        &self,
        authorization_endpoint: &str,
        state: &str,
        scopes: &[&str],
    ) -> Url {
        let mut url =
            Url::parse(authorization_endpoint).expect("invalid authorization endpoint URL");

        url.query_pairs_mut()
            .append_pair("response_type", "code")
            .append_pair("client_id", &self.client_id)
            .append_pair("state", state);

        if !scopes.is_empty() {
            url.query_pairs_mut()
                .append_pair("scope", &scopes.join(SCOPE_SEPARATOR));
        }

        if let Some(ref redirect_uri) = self.redirect_uri {
            url.query_pairs_mut()
                .append_pair("redirect_uri", redirect_uri);
        }

        url
    }

    /// Exchange an authorization code for tokens.
    pub async fn validate_authorization_code(
        &self,
        http_client: &(impl HttpClient + ?Sized),
        token_endpoint: &str,
        code: &str,
    ) -> Result<OAuth2Tokens, Error> {
        let mut body = vec![
            ("grant_type".to_string(), "authorization_code".to_string()),
            ("code".to_string(), code.to_string()),
        ];

        if let Some(ref redirect_uri) = self.redirect_uri {
            body.push(("redirect_uri".to_string(), redirect_uri.clone()));
        }

        self.send_with_credentials(http_client, token_endpoint, body)
            .await
    }

    /// Refresh an access token.
    pub async fn refresh_access_token(
        &self,
        http_client: &(impl HttpClient + ?Sized),
        token_endpoint: &str,
        refresh_token: &str,
        scopes: &[&str],
    ) -> Result<OAuth2Tokens, Error> {
        let mut body = vec![
            ("grant_type".to_string(), "refresh_token".to_string()),
            ("refresh_token".to_string(), refresh_token.to_string()),
        ];

        if !scopes.is_empty() {
            body.push(("scope".to_string(), scopes.join(SCOPE_SEPARATOR)));
        }

        self.send_with_credentials(http_client, token_endpoint, body)
            .await
    }

    /// Attach client credentials per the configured placement, then send.
    /// Public clients always send their client_id in the body.
    async fn send_with_credentials(
        &self,
        http_client: &(impl HttpClient + ?Sized),
        token_endpoint: &str,
        mut body: Vec<(String, String)>,
    ) -> Result<OAuth2Tokens, Error> {
        match (&self.client_secret, self.auth_method) {
            (Some(secret), ClientAuthMethod::RequestBody) => {
                body.push(("client_id".to_string(), self.client_id.clone()));
                body.push(("client_secret".to_string(), secret.clone()));
            }
            // Credentials travel in the Authorization header instead.
            (Some(_), ClientAuthMethod::Basic) => {}
            (None, _) => {
                body.push(("client_id".to_string(), self.client_id.clone()));
            }
        }

        let mut request = create_oauth2_request(token_endpoint, &body);

        if let (Some(secret), ClientAuthMethod::Basic) = (&self.client_secret, self.auth_method) {
            request.headers.push((
                "Authorization".to_string(),
                encode_basic_credentials(&self.client_id, secret),
            ));
        }

        send_token_request(http_client, request).await
    }
}
