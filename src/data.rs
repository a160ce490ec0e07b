//! Payload classification and the pagination iteration engine.
//!
//! Every successful API body carries a `response` field whose shape varies by
//! endpoint: a single value, a list, or the first page of a paginated list.
//! [`Data::from_body`] classifies the body once into a [`Data`] variant, and
//! every variant supports the same contract: [`Data::len`], [`Data::iter`],
//! and equality against the [`Data::None`] sentinel.
//!
//! Iterating a [`PagedData`] set is the interesting case: elements of the
//! already-fetched first page yield without I/O, and once they are exhausted
//! the iterator issues a blocking GET per remaining page through the client
//! captured at classification time.

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::client::{ApiClient, HttpError, QueryParams};
use crate::response::ApiResponse;

/// Errors raised while iterating a paginated data set.
///
/// The first two variants are integration errors: the data set was built
/// without the state needed to address follow-up pages. They are fatal to the
/// iteration and never retried.
#[derive(Debug, Error)]
pub enum PagedDataError {
    /// The data set was classified without a client, so follow-up pages
    /// cannot be fetched.
    #[error("cannot fetch the next page: no client class known")]
    NoClient,

    /// The response body carried no endpoint echo, so there is no URI to
    /// fetch follow-up pages from.
    #[error("cannot fetch the next page: no request-uri known")]
    NoRequestUri,

    /// The transport failed while fetching a follow-up page.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// A follow-up page came back as an error response.
    #[error("page {page} returned an error response: {description}")]
    ErrorPage {
        /// The page number that failed.
        page: u32,
        /// The error description reported for that page.
        description: String,
    },
}

/// Pagination metadata echoed by the API in the `paging` field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct Paging {
    /// The page the accompanying elements belong to.
    pub current: u32,
    /// Total number of pages in the result set.
    pub total: u32,
}

/// A classified response payload.
///
/// The variant is chosen once by [`Data::from_body`] and never changes.
/// `Data::None` is the absence sentinel; test for it with [`Data::is_none`]
/// or by comparing against `Data::None`.
///
/// # Example
///
/// ```rust
/// use apisports::Data;
/// use serde_json::json;
///
/// let body = json!({"response": [1, 2, 3]});
/// let data = Data::from_body(None, Some(&body));
/// assert_eq!(data.len(), 3);
///
/// let items: Vec<_> = data.iter().collect::<Result<_, _>>().unwrap();
/// assert_eq!(items, vec![json!(1), json!(2), json!(3)]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Data {
    /// Absence of data: an empty, null or missing `response` payload.
    None,
    /// Exactly one value.
    Single(SingleData),
    /// A complete list of values with no further pages.
    Simple(SimpleData),
    /// The first page of a multi-page list.
    Paged(PagedData),
}

impl Data {
    /// Classifies a JSON body into a data variant.
    ///
    /// The decision procedure, in order:
    ///
    /// 1. No body, a non-object body, a missing `response` key, or a null
    ///    `response` → [`Data::None`].
    /// 2. `response` is a list: empty → `None`; one element →
    ///    [`Data::Single`] wrapping that element; two or more elements →
    ///    [`Data::Paged`] when the sibling `paging` object reports more than
    ///    one page, otherwise [`Data::Simple`].
    /// 3. `response` is anything else: an empty object → `None`, otherwise
    ///    [`Data::Single`] wrapping the value directly.
    ///
    /// A paginated variant captures the `get` and `parameters` echoes from
    /// the body together with `client`, which it needs later to fetch
    /// follow-up pages.
    #[must_use]
    pub fn from_body(client: Option<Arc<dyn ApiClient>>, body: Option<&Value>) -> Self {
        let Some(body) = body else {
            return Self::None;
        };
        let Some(response) = body.get("response") else {
            return Self::None;
        };

        match response {
            Value::Null => Self::None,
            Value::Array(items) => Self::from_items(client, body, items),
            Value::Object(fields) if fields.is_empty() => Self::None,
            value => Self::Single(SingleData {
                value: value.clone(),
            }),
        }
    }

    fn from_items(client: Option<Arc<dyn ApiClient>>, body: &Value, items: &[Value]) -> Self {
        match items {
            [] => Self::None,
            [value] => Self::Single(SingleData {
                value: value.clone(),
            }),
            _ => {
                let paging = body
                    .get("paging")
                    .and_then(|p| serde_json::from_value::<Paging>(p.clone()).ok());
                match paging {
                    Some(paging) if paging.total > 1 => Self::Paged(PagedData {
                        items: items.to_vec(),
                        paging,
                        endpoint: body.get("get").and_then(Value::as_str).map(str::to_string),
                        params: parameter_echo(body),
                        per_page: items.len(),
                        client,
                    }),
                    _ => Self::Simple(SimpleData {
                        items: items.to_vec(),
                    }),
                }
            }
        }
    }

    /// Number of elements in the data set.
    ///
    /// For [`Data::Paged`] this is the per-page count times the total page
    /// count, an upper bound: the last page may be partial. The approximation
    /// is deliberate, since it is available without fetching further pages.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::None => 0,
            Self::Single(_) => 1,
            Self::Simple(simple) => simple.items.len(),
            Self::Paged(paged) => paged.per_page.saturating_mul(paged.paging.total as usize),
        }
    }

    /// Returns `true` if the data set has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` for the [`Data::None`] sentinel.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Iterates over the elements in source order.
    ///
    /// Every call returns an independent iterator that starts from the
    /// buffered first page. For [`Data::Paged`] sets, crossing a page
    /// boundary issues a blocking GET through the captured client; pages
    /// beyond the first are re-fetched by each iterator, never cached. An
    /// element that cannot be produced yields an `Err` item, after which the
    /// iterator is exhausted.
    #[must_use]
    pub fn iter(&self) -> DataIter {
        let state = match self {
            Self::None => IterState::Buffered(Vec::new().into_iter()),
            Self::Single(single) => IterState::Buffered(vec![single.value.clone()].into_iter()),
            Self::Simple(simple) => IterState::Buffered(simple.items.clone().into_iter()),
            Self::Paged(paged) => IterState::Paged(PageCursor {
                buffer: paged.items.clone().into_iter(),
                current: paged.paging.current,
                total: paged.paging.total,
                endpoint: paged.endpoint.clone(),
                params: paged.params.clone(),
                client: paged.client.clone(),
                done: false,
            }),
        };
        DataIter { state }
    }

    /// Elements bundled with this variant, without any further fetching.
    fn into_page_items(self) -> Vec<Value> {
        match self {
            Self::None => Vec::new(),
            Self::Single(single) => vec![single.value],
            Self::Simple(simple) => simple.items,
            Self::Paged(paged) => paged.items,
        }
    }
}

impl IntoIterator for &Data {
    type Item = Result<Value, PagedDataError>;
    type IntoIter = DataIter;

    fn into_iter(self) -> DataIter {
        self.iter()
    }
}

// Verify the data family is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Data>();
    assert_send_sync::<DataIter>();
};

/// Recovers the original query parameters from the body's `parameters` echo.
///
/// The API echoes an empty list instead of an empty object when the request
/// had no parameters; anything that is not an object maps to no parameters.
fn parameter_echo(body: &Value) -> QueryParams {
    body.get("parameters")
        .and_then(Value::as_object)
        .map(|fields| {
            fields
                .iter()
                .map(|(name, value)| {
                    let value = value
                        .as_str()
                        .map_or_else(|| value.to_string(), str::to_string);
                    (name.clone(), value)
                })
                .collect()
        })
        .unwrap_or_default()
}

/// A single classified value.
#[derive(Debug, Clone, PartialEq)]
pub struct SingleData {
    value: Value,
}

impl SingleData {
    /// The wrapped value.
    #[must_use]
    pub const fn item(&self) -> &Value {
        &self.value
    }

    /// Consumes the wrapper and returns the value.
    #[must_use]
    pub fn into_item(self) -> Value {
        self.value
    }
}

/// A complete list of values with no further pages to fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleData {
    items: Vec<Value>,
}

impl SimpleData {
    /// The wrapped elements in source order.
    #[must_use]
    pub fn items(&self) -> &[Value] {
        &self.items
    }
}

/// The first page of a multi-page result, plus the state needed to fetch the
/// rest.
///
/// Equality ignores the captured client reference: two `PagedData` values
/// classified from the same body compare equal whether or not a client was
/// attached.
#[derive(Clone)]
pub struct PagedData {
    items: Vec<Value>,
    paging: Paging,
    endpoint: Option<String>,
    params: QueryParams,
    per_page: usize,
    client: Option<Arc<dyn ApiClient>>,
}

impl PagedData {
    /// The page number of the buffered elements.
    #[must_use]
    pub const fn current_page(&self) -> u32 {
        self.paging.current
    }

    /// Total number of pages in the result set.
    #[must_use]
    pub const fn total_pages(&self) -> u32 {
        self.paging.total
    }

    /// The endpoint path follow-up pages are fetched from, if the body
    /// carried one.
    #[must_use]
    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    /// Number of elements in the first page.
    #[must_use]
    pub const fn per_page(&self) -> usize {
        self.per_page
    }

    /// The elements fetched with the original request.
    #[must_use]
    pub fn first_page(&self) -> &[Value] {
        &self.items
    }
}

impl fmt::Debug for PagedData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PagedData")
            .field("items", &self.items)
            .field("paging", &self.paging)
            .field("endpoint", &self.endpoint)
            .field("params", &self.params)
            .field("per_page", &self.per_page)
            .field("client", &self.client.as_ref().map(|_| ".."))
            .finish()
    }
}

impl PartialEq for PagedData {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
            && self.paging == other.paging
            && self.endpoint == other.endpoint
            && self.params == other.params
            && self.per_page == other.per_page
    }
}

/// Iterator over a classified data set.
///
/// Yields `Ok` elements in source order. Only [`Data::Paged`] sets can yield
/// an `Err` item (a missing pagination prerequisite or a failed page fetch),
/// and after the first `Err` the iterator is exhausted.
pub struct DataIter {
    state: IterState,
}

enum IterState {
    Buffered(std::vec::IntoIter<Value>),
    Paged(PageCursor),
}

impl Iterator for DataIter {
    type Item = Result<Value, PagedDataError>;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.state {
            IterState::Buffered(buffer) => buffer.next().map(Ok),
            IterState::Paged(cursor) => cursor.next(),
        }
    }
}

impl std::iter::FusedIterator for DataIter {}

impl fmt::Debug for DataIter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.state {
            IterState::Buffered(buffer) => f
                .debug_struct("DataIter")
                .field("remaining", &buffer.len())
                .finish(),
            IterState::Paged(cursor) => f
                .debug_struct("DataIter")
                .field("current_page", &cursor.current)
                .field("total_pages", &cursor.total)
                .finish_non_exhaustive(),
        }
    }
}

/// Cursor over a paginated result set.
///
/// Lives inside the iterator rather than the data set, so concurrent or
/// repeated iterations never share fetch state.
struct PageCursor {
    buffer: std::vec::IntoIter<Value>,
    current: u32,
    total: u32,
    endpoint: Option<String>,
    params: QueryParams,
    client: Option<Arc<dyn ApiClient>>,
    done: bool,
}

impl PageCursor {
    fn next(&mut self) -> Option<Result<Value, PagedDataError>> {
        if self.done {
            return None;
        }
        loop {
            if let Some(value) = self.buffer.next() {
                return Some(Ok(value));
            }
            if self.current >= self.total {
                self.done = true;
                return None;
            }
            match self.fetch_next_page() {
                Ok(items) => {
                    self.current += 1;
                    self.buffer = items.into_iter();
                }
                Err(err) => {
                    self.done = true;
                    return Some(Err(err));
                }
            }
        }
    }

    /// Fetches the page after `self.current` and returns its elements.
    fn fetch_next_page(&self) -> Result<Vec<Value>, PagedDataError> {
        let client = self.client.as_ref().ok_or(PagedDataError::NoClient)?;
        let endpoint = self.endpoint.as_deref().ok_or(PagedDataError::NoRequestUri)?;

        let page = self.current + 1;
        let mut params = self.params.clone();
        params.insert("page".to_string(), page.to_string());

        tracing::debug!(endpoint, page, "fetching next page");
        let raw = client.get(endpoint, &params)?;
        let response = ApiResponse::from_raw(None, raw);
        if !response.ok() {
            return Err(PagedDataError::ErrorPage {
                page,
                description: response.error_description().to_string(),
            });
        }
        Ok(response.into_data().into_page_items())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn classify(body: &Value) -> Data {
        Data::from_body(None, Some(body))
    }

    #[test]
    fn test_none_data_cases() {
        for body in [
            json!(null),
            json!({}),
            json!({"response": null}),
            json!({"response": []}),
            json!({"response": {}}),
            json!("not an object"),
        ] {
            let data = classify(&body);
            assert!(data.is_none(), "expected NoneData for {body}");
            assert_eq!(data.len(), 0);
            assert_eq!(data.iter().count(), 0);
        }
        assert!(Data::from_body(None, None).is_none());
    }

    #[test]
    fn test_single_data_from_one_element_list() {
        let data = classify(&json!({"response": [42]}));
        let Data::Single(single) = &data else {
            panic!("expected SingleData, got {data:?}");
        };
        assert_eq!(single.item(), &json!(42));
        assert_eq!(data.len(), 1);
    }

    #[test]
    fn test_single_data_from_bare_value() {
        // Falsy scalars still classify as a single value; only null is absent.
        for value in [json!(0), json!(false), json!("test"), json!({"a": 1})] {
            let data = classify(&json!({ "response": value.clone() }));
            let Data::Single(single) = &data else {
                panic!("expected SingleData for {value}");
            };
            assert_eq!(single.item(), &value);
        }
    }

    #[test]
    fn test_simple_data_without_paging() {
        let data = classify(&json!({"response": [1, 2, 3, 4, 5]}));
        assert!(matches!(data, Data::Simple(_)));
        assert_eq!(data.len(), 5);
    }

    #[test]
    fn test_single_page_paging_is_simple() {
        let data = classify(&json!({
            "get": "teams",
            "paging": {"current": 1, "total": 1},
            "results": 2,
            "response": [1, 2],
        }));
        assert!(matches!(data, Data::Simple(_)));
    }

    #[test]
    fn test_paged_data_len_is_an_upper_bound() {
        let data = classify(&json!({
            "get": "fixtures",
            "paging": {"current": 1, "total": 3},
            "results": 3,
            "response": [0, 1, 2],
        }));
        let Data::Paged(paged) = &data else {
            panic!("expected PagedData");
        };
        assert_eq!(paged.current_page(), 1);
        assert_eq!(paged.total_pages(), 3);
        assert_eq!(paged.per_page(), 3);
        assert_eq!(data.len(), 9);
    }

    #[test]
    fn test_malformed_paging_is_simple() {
        let data = classify(&json!({
            "paging": {"current": "x"},
            "response": [1, 2, 3],
        }));
        assert!(matches!(data, Data::Simple(_)));
    }

    #[test]
    fn test_paged_data_captures_parameter_echo() {
        let data = classify(&json!({
            "get": "fixtures",
            "parameters": {"season": "2024", "team": 33},
            "paging": {"current": 1, "total": 2},
            "results": 2,
            "response": [1, 2],
        }));
        let Data::Paged(paged) = data else {
            panic!("expected PagedData");
        };
        assert_eq!(paged.endpoint(), Some("fixtures"));
        assert_eq!(paged.params.get("season"), Some(&"2024".to_string()));
        assert_eq!(paged.params.get("team"), Some(&"33".to_string()));
    }

    #[test]
    fn test_equality_ignores_client_reference() {
        let body = json!({
            "get": "fixtures",
            "paging": {"current": 1, "total": 2},
            "results": 2,
            "response": [1, 2],
        });
        let without_client = classify(&body);
        let with_client = Data::from_body(Some(Arc::new(NeverClient)), Some(&body));
        assert_eq!(without_client, with_client);
    }

    #[test]
    fn test_iteration_is_fused_after_error() {
        let data = classify(&json!({
            "get": "fixtures",
            "paging": {"current": 1, "total": 2},
            "results": 2,
            "response": [1, 2],
        }));
        let mut iter = data.iter();
        assert_eq!(iter.next().unwrap().unwrap(), json!(1));
        assert_eq!(iter.next().unwrap().unwrap(), json!(2));
        assert!(matches!(iter.next(), Some(Err(PagedDataError::NoClient))));
        assert!(iter.next().is_none());
        assert!(iter.next().is_none());
    }

    /// Fails every fetch; classification never calls it.
    struct NeverClient;

    impl ApiClient for NeverClient {
        fn get(
            &self,
            _endpoint: &str,
            _params: &QueryParams,
        ) -> Result<crate::client::RawHttpResponse, HttpError> {
            unreachable!("no fetch expected in this test")
        }
    }
}
