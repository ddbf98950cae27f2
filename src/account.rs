use serde_json::{Map, Value};

use crate::error::{ApiErrorKind, Error};
use crate::tokens::OAuth2Tokens;

/// The resource owner behind a successful authorization: one account
/// record from the BookingSync accounts endpoint, plus the tokens it was
/// fetched with.
///
/// Every profile field is optional on the wire, so every accessor returns
/// an `Option`: a missing key (or an explicit JSON `null`) is `None`,
/// never an error. Accessors are pure projections over the record; nothing
/// here mutates after construction. Fields without a named accessor are
/// reachable through [`Account::data`].
#[derive(Debug, Clone)]
pub struct Account {
    data: Value,
    tokens: OAuth2Tokens,
}

impl Account {
    /// Build an `Account` from a decoded accounts-endpoint response.
    ///
    /// The response must carry an `accounts` key holding a non-empty
    /// array; the view wraps its first element. Anything else fails with
    /// [`Error::Api`] (kind [`ApiErrorKind::MissingAccount`], status 0)
    /// carrying the full response as its body.
    pub fn from_response(response: Value, tokens: OAuth2Tokens) -> Result<Self, Error> {
        let account = response
            .get("accounts")
            .and_then(Value::as_array)
            .and_then(|accounts| accounts.first())
            .cloned();

        match account {
            Some(data) => Ok(Self { data, tokens }),
            None => Err(Error::Api {
                kind: ApiErrorKind::MissingAccount,
                message: "Cannot found account".to_string(),
                status: 0,
                body: response.to_string(),
            }),
        }
    }

    /// Shared lookup rule for all accessors: direct key lookup, with
    /// JSON `null` treated the same as an absent key.
    fn field(&self, key: &str) -> Option<&Value> {
        self.data.get(key).filter(|value| !value.is_null())
    }

    fn text(&self, key: &str) -> Option<&str> {
        self.field(key).and_then(Value::as_str)
    }

    /// Numeric account id.
    pub fn id(&self) -> Option<i64> {
        self.field("id").and_then(Value::as_i64)
    }

    pub fn email(&self) -> Option<&str> {
        self.text("email")
    }

    pub fn business_name(&self) -> Option<&str> {
        self.text("business_name")
    }

    /// Account status, e.g. `"trial"` or `"active"`.
    pub fn status(&self) -> Option<&str> {
        self.text("status")
    }

    pub fn address1(&self) -> Option<&str> {
        self.text("address1")
    }

    pub fn address2(&self) -> Option<&str> {
        self.text("address2")
    }

    pub fn city(&self) -> Option<&str> {
        self.text("city")
    }

    pub fn zip(&self) -> Option<&str> {
        self.text("zip")
    }

    pub fn state(&self) -> Option<&str> {
        self.text("state")
    }

    pub fn country_code(&self) -> Option<&str> {
        self.text("country_code")
    }

    pub fn website(&self) -> Option<&str> {
        self.text("website")
    }

    /// BCP 47-ish locale code, e.g. `"en"`.
    pub fn default_locale(&self) -> Option<&str> {
        self.text("default_locale")
    }

    /// Locales the account publishes content in, as the raw JSON array.
    pub fn selected_locales(&self) -> Option<&Vec<Value>> {
        self.field("selected_locales").and_then(Value::as_array)
    }

    /// Phone numbers keyed by kind (`phone`, `mobile`, `fax`), as the raw
    /// JSON object.
    pub fn phones(&self) -> Option<&Map<String, Value>> {
        self.field("phones").and_then(Value::as_object)
    }

    /// Nested account preferences, as the raw JSON object.
    pub fn preferences(&self) -> Option<&Map<String, Value>> {
        self.field("preferences").and_then(Value::as_object)
    }

    /// RFC 3339 creation timestamp, as sent by the API.
    pub fn created_at(&self) -> Option<&str> {
        self.text("created_at")
    }

    /// RFC 3339 last-update timestamp, as sent by the API.
    pub fn updated_at(&self) -> Option<&str> {
        self.text("updated_at")
    }

    /// The tokens this account was fetched with.
    pub fn tokens(&self) -> &OAuth2Tokens {
        &self.tokens
    }

    /// The raw account record, an escape hatch for fields without a
    /// named accessor.
    pub fn data(&self) -> &Value {
        &self.data
    }
}
