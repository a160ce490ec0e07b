//! Response classification for API-Sports endpoints.
//!
//! [`ApiResponse::from_raw`] turns one raw HTTP exchange into exactly one
//! response variant: a transport-level error, a malformed or API-reported
//! error, or a success wrapping classified [`Data`]. Classification itself is
//! pure; only iterating a paginated data set performs further I/O.

use std::sync::Arc;
use std::sync::OnceLock;

use serde_json::{Map, Value};

use crate::client::{ApiClient, RawHttpResponse};
use crate::data::{Data, DataIter, PagedDataError};
use crate::headers::Headers;

static NONE_DATA: Data = Data::None;

fn empty_errors() -> &'static Map<String, Value> {
    static EMPTY: OnceLock<Map<String, Value>> = OnceLock::new();
    EMPTY.get_or_init(Map::new)
}

/// A classified API response.
///
/// Exactly one variant is chosen per raw result; `ok()` is `true` iff the
/// variant is [`ApiResponse::Success`]. All variants expose the same
/// accessors, so callers can read `errors()`, `error_description()` and
/// `data()` without matching first.
///
/// # Example
///
/// ```rust
/// use std::collections::HashMap;
/// use apisports::{ApiResponse, RawHttpResponse};
///
/// let raw = RawHttpResponse::new(200, HashMap::new(), r#"{"response": [1, 2, 3]}"#);
/// let response = ApiResponse::from_raw(None, raw);
///
/// assert!(response.ok());
/// assert_eq!(response.error_description(), "Success");
/// assert_eq!(response.data().len(), 3);
/// ```
#[derive(Debug)]
pub enum ApiResponse {
    /// The exchange came back with a non-200 status code.
    Http(HttpErrorResponse),
    /// Status 200, but the body was malformed or reported an API error.
    Error(ErrorResponse),
    /// Status 200 with a well-formed body and no reported errors.
    Success(SuccessResponse),
}

impl ApiResponse {
    /// Classifies a raw HTTP exchange into a response variant.
    ///
    /// In priority order:
    ///
    /// 1. A status code other than 200 → [`ApiResponse::Http`], whatever the
    ///    body contains.
    /// 2. A body that fails to parse as JSON → [`ApiResponse::Error`] with an
    ///    empty error mapping and the HTTP reason phrase as description.
    /// 3. A parsed body whose top-level `errors` field is truthy →
    ///    [`ApiResponse::Error`]. A mapping passes through verbatim; any
    ///    other shape is wrapped under a synthetic `"errors"` key so callers
    ///    always see a mapping.
    /// 4. Otherwise → [`ApiResponse::Success`] with the body's payload
    ///    classified into [`Data`]. `client` is captured by paginated data
    ///    sets to fetch follow-up pages during iteration.
    #[must_use]
    pub fn from_raw(client: Option<Arc<dyn ApiClient>>, raw: RawHttpResponse) -> Self {
        if raw.status() != 200 {
            let description = raw.reason().to_string();
            return Self::Http(HttpErrorResponse { raw, description });
        }

        let Ok(body) = serde_json::from_str::<Value>(raw.body()) else {
            let description = raw.reason().to_string();
            return Self::Error(ErrorResponse {
                raw,
                errors: Map::new(),
                description,
            });
        };

        if let Some(reported) = body.get("errors").filter(|value| is_truthy(value)) {
            let errors = normalize_errors(reported);
            let description =
                first_message(&errors).unwrap_or_else(|| raw.reason().to_string());
            return Self::Error(ErrorResponse {
                raw,
                errors,
                description,
            });
        }

        let data = Data::from_body(client, Some(&body));
        Self::Success(SuccessResponse { raw, data })
    }

    /// Returns `true` if the request succeeded.
    #[must_use]
    pub const fn ok(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The reported errors, normalized to a mapping. Empty for successes and
    /// HTTP-level errors.
    #[must_use]
    pub fn errors(&self) -> &Map<String, Value> {
        match self {
            Self::Error(error) => &error.errors,
            Self::Http(_) | Self::Success(_) => empty_errors(),
        }
    }

    /// A short description of the outcome: `"Success"` for successes, the
    /// first reported error message or the HTTP reason phrase otherwise.
    #[must_use]
    pub fn error_description(&self) -> &str {
        match self {
            Self::Http(error) => &error.description,
            Self::Error(error) => &error.description,
            Self::Success(_) => "Success",
        }
    }

    /// The classified payload. [`Data::None`] for every non-success variant.
    #[must_use]
    pub fn data(&self) -> &Data {
        match self {
            Self::Success(success) => &success.data,
            Self::Http(_) | Self::Error(_) => &NONE_DATA,
        }
    }

    /// Consumes the response and returns the classified payload.
    #[must_use]
    pub fn into_data(self) -> Data {
        match self {
            Self::Success(success) => success.data,
            Self::Http(_) | Self::Error(_) => Data::None,
        }
    }

    /// The raw body text.
    #[must_use]
    pub fn text(&self) -> &str {
        self.raw().body()
    }

    /// The HTTP status code.
    #[must_use]
    pub fn status(&self) -> u16 {
        self.raw().status()
    }

    /// Case-insensitive view over the response headers.
    #[must_use]
    pub fn headers(&self) -> Headers<'_> {
        Headers::new(self.raw().headers())
    }

    /// The raw HTTP exchange this response was classified from.
    #[must_use]
    pub const fn raw(&self) -> &RawHttpResponse {
        match self {
            Self::Http(error) => &error.raw,
            Self::Error(error) => &error.raw,
            Self::Success(success) => &success.raw,
        }
    }

    /// Iterates over the payload elements; shorthand for `data().iter()`.
    #[must_use]
    pub fn iter(&self) -> DataIter {
        self.data().iter()
    }
}

impl IntoIterator for &ApiResponse {
    type Item = Result<Value, PagedDataError>;
    type IntoIter = DataIter;

    fn into_iter(self) -> DataIter {
        self.iter()
    }
}

/// Response to an exchange whose HTTP status was not 200.
///
/// Carries no parsed body; the description is the HTTP reason phrase.
#[derive(Debug)]
pub struct HttpErrorResponse {
    raw: RawHttpResponse,
    description: String,
}

impl HttpErrorResponse {
    /// The HTTP reason phrase for the failing status.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The raw HTTP exchange.
    #[must_use]
    pub const fn raw(&self) -> &RawHttpResponse {
        &self.raw
    }
}

/// Response whose body was malformed JSON or reported an API error.
#[derive(Debug)]
pub struct ErrorResponse {
    raw: RawHttpResponse,
    errors: Map<String, Value>,
    description: String,
}

impl ErrorResponse {
    /// The reported errors, normalized to a mapping. Empty when the body
    /// could not be parsed at all.
    #[must_use]
    pub const fn errors(&self) -> &Map<String, Value> {
        &self.errors
    }

    /// The first reported error message, or the HTTP reason phrase when no
    /// message could be derived.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The raw HTTP exchange.
    #[must_use]
    pub const fn raw(&self) -> &RawHttpResponse {
        &self.raw
    }
}

/// Successful response wrapping classified payload data.
#[derive(Debug)]
pub struct SuccessResponse {
    raw: RawHttpResponse,
    data: Data,
}

impl SuccessResponse {
    /// The classified payload.
    #[must_use]
    pub const fn data(&self) -> &Data {
        &self.data
    }

    /// The raw HTTP exchange.
    #[must_use]
    pub const fn raw(&self) -> &RawHttpResponse {
        &self.raw
    }
}

/// Truthiness the API applies to its `errors` field: null, `false`, zero,
/// and empty strings, arrays and objects all mean "no errors reported".
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Normalizes the `errors` value to a mapping. Mappings pass through
/// verbatim; any other shape is wrapped under a synthetic `errors` key.
fn normalize_errors(value: &Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map.clone(),
        other => {
            let mut map = Map::new();
            map.insert("errors".to_string(), other.clone());
            map
        }
    }
}

/// Finds the first non-empty string message in the error mapping,
/// depth-first.
fn first_message(errors: &Map<String, Value>) -> Option<String> {
    fn walk(value: &Value) -> Option<&str> {
        match value {
            Value::String(message) if !message.is_empty() => Some(message),
            Value::Array(items) => items.iter().find_map(walk),
            Value::Object(fields) => fields.values().find_map(walk),
            _ => None,
        }
    }
    errors.values().find_map(walk).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    fn classify(status: u16, body: &str) -> ApiResponse {
        ApiResponse::from_raw(None, RawHttpResponse::new(status, HashMap::new(), body))
    }

    #[test]
    fn test_non_200_status_wins_over_body() {
        // A perfectly valid success body still classifies as an HTTP error.
        let response = classify(404, r#"{"response": [1, 2, 3]}"#);
        let ApiResponse::Http(error) = &response else {
            panic!("expected HttpErrorResponse, got {response:?}");
        };
        assert!(!response.ok());
        assert!(response.errors().is_empty());
        assert!(response.data().is_none());
        assert_eq!(error.description(), "Not Found");
    }

    #[test]
    fn test_created_status_is_not_success() {
        let response = classify(201, r#"{"response": [1]}"#);
        assert!(matches!(response, ApiResponse::Http(_)));
    }

    #[test]
    fn test_invalid_json_is_error_response() {
        let response = classify(200, "-");
        assert!(matches!(response, ApiResponse::Error(_)));
        assert!(!response.ok());
        assert!(response.errors().is_empty());
        assert_eq!(response.error_description(), "OK");
        assert!(response.data().is_none());
    }

    #[test]
    fn test_falsy_errors_are_success() {
        for errors in ["null", "false", "0", "\"\"", "[]", "{}"] {
            let body = format!(r#"{{"errors": {errors}, "response": [7]}}"#);
            let response = classify(200, &body);
            assert!(response.ok(), "expected success for errors = {errors}");
            assert_eq!(response.error_description(), "Success");
            assert_eq!(response.data().len(), 1);
        }
    }

    #[test]
    fn test_error_mapping_passes_through_verbatim() {
        let response = classify(200, r#"{"errors": {"token": "Invalid API key."}}"#);
        let ApiResponse::Error(error) = &response else {
            panic!("expected ErrorResponse");
        };
        assert_eq!(
            Value::Object(error.errors().clone()),
            json!({"token": "Invalid API key."})
        );
        assert_eq!(response.error_description(), "Invalid API key.");
    }

    #[test]
    fn test_error_list_is_wrapped_under_synthetic_key() {
        let response = classify(200, r#"{"errors": [{"message": "value too high"}]}"#);
        assert_eq!(
            Value::Object(response.errors().clone()),
            json!({"errors": [{"message": "value too high"}]})
        );
        assert_eq!(response.error_description(), "value too high");
    }

    #[test]
    fn test_description_falls_back_to_reason_phrase() {
        // No string message anywhere in the mapping.
        let response = classify(200, r#"{"errors": {"count": 3}}"#);
        assert_eq!(response.error_description(), "OK");
    }

    #[test]
    fn test_success_exposes_text_and_headers() {
        let mut headers = HashMap::new();
        headers.insert("Server".to_string(), "api-sports".to_string());
        let raw = RawHttpResponse::new(200, headers, r#"{"response": null}"#);
        let response = ApiResponse::from_raw(None, raw);

        assert!(response.ok());
        assert_eq!(response.status(), 200);
        assert_eq!(response.text(), r#"{"response": null}"#);
        assert_eq!(response.headers().server(), Some("api-sports"));
        assert!(response.data().is_none());
    }

    #[test]
    fn test_classification_is_deterministic() {
        let body = r#"{"response": [1, 2, 3]}"#;
        let first = classify(200, body);
        let second = classify(200, body);
        assert_eq!(first.data(), second.data());
    }

    #[test]
    fn test_truthiness_matrix() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!([])));
        assert!(!is_truthy(&json!({})));
        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!(1)));
        assert!(is_truthy(&json!("x")));
        assert!(is_truthy(&json!([0])));
        assert!(is_truthy(&json!({"a": null})));
    }

    #[test]
    fn test_first_message_digs_into_nested_shapes() {
        let errors = normalize_errors(&json!([{"page": "value too high"}]));
        assert_eq!(first_message(&errors), Some("value too high".to_string()));

        let errors = normalize_errors(&json!({"a": 1, "b": {"deep": "found it"}}));
        assert_eq!(first_message(&errors), Some("found it".to_string()));

        let errors = normalize_errors(&json!({"a": 1}));
        assert_eq!(first_message(&errors), None);
    }
}
