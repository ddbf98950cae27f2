use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A mock BookingSync server built on `wiremock`. Simulates the token
/// endpoint and the accounts (resource-owner) endpoint with configurable
/// behavior.
pub struct MockBookingSyncServer {
    server: MockServer,
}

impl MockBookingSyncServer {
    /// Start a new mock server on a random available port.
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Base URL of the mock server (e.g. "http://127.0.0.1:PORT").
    pub fn url(&self) -> String {
        self.server.uri()
    }

    /// Mount a handler that returns a successful token response (HTTP 200)
    /// with the given JSON body at `POST /oauth/token`.
    pub async fn mock_token_success(&self, response: serde_json::Value) {
        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&response))
            .mount(&self.server)
            .await;
    }

    /// Mount a handler that returns an OAuth2 error response (HTTP 400)
    /// with standard error JSON at `POST /oauth/token`.
    pub async fn mock_token_error(&self, error_code: &str, description: &str) {
        let body = serde_json::json!({
            "error": error_code,
            "error_description": description,
        });
        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .respond_with(ResponseTemplate::new(400).set_body_json(&body))
            .mount(&self.server)
            .await;
    }

    /// Mount a handler that returns the given status and JSON body at
    /// `GET <accounts_path>`.
    pub async fn mock_accounts_json(
        &self,
        accounts_path: &str,
        status: u16,
        response: serde_json::Value,
    ) {
        Mock::given(method("GET"))
            .and(path(accounts_path))
            .respond_with(ResponseTemplate::new(status).set_body_json(&response))
            .mount(&self.server)
            .await;
    }

    /// Mount a handler that returns the given status and a raw (non-JSON)
    /// body at `GET <accounts_path>`.
    pub async fn mock_accounts_raw(&self, accounts_path: &str, status: u16, body: &str) {
        Mock::given(method("GET"))
            .and(path(accounts_path))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&self.server)
            .await;
    }

    /// Assert that the last request to the mock server contained
    /// the expected form-urlencoded parameters in its body.
    pub async fn verify_token_request(&self, expected_params: &[(&str, &str)]) {
        let requests = self
            .server
            .received_requests()
            .await
            .expect("request recording enabled");
        let last = requests.last().expect("expected at least one request");
        let body_str = String::from_utf8(last.body.clone()).expect("body should be UTF-8");
        let parsed: Vec<(String, String)> = url::form_urlencoded::parse(body_str.as_bytes())
            .into_owned()
            .collect();

        for (key, value) in expected_params {
            let found = parsed.iter().any(|(k, v)| k == key && v == value);
            assert!(
                found,
                "expected form param {}={} in request body, got: {}",
                key, value, body_str
            );
        }
    }

    /// Assert that the last request carried no Authorization header
    /// (BookingSync token requests put credentials in the body).
    pub async fn verify_no_authorization_header(&self) {
        let requests = self
            .server
            .received_requests()
            .await
            .expect("request recording enabled");
        let last = requests.last().expect("expected at least one request");
        assert!(
            last.headers.get("authorization").is_none(),
            "expected no Authorization header"
        );
    }

    /// Assert that the last request was a GET carrying the expected
    /// bearer token.
    pub async fn verify_bearer_request(&self, access_token: &str) {
        let requests = self
            .server
            .received_requests()
            .await
            .expect("request recording enabled");
        let last = requests.last().expect("expected at least one request");
        assert_eq!(last.method.as_str(), "GET");
        let auth_header = last
            .headers
            .get("authorization")
            .expect("expected Authorization header")
            .to_str()
            .expect("header should be ASCII");
        assert_eq!(auth_header, format!("Bearer {access_token}"));
    }
}
