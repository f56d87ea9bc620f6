//! Cursor-based pagination.
//!
//! A cursor encodes a single ordering-key value, never a row identity or an
//! offset. Rows inserted or deleted between requests therefore never shift
//! the rows a cursor reveals, and a cursor stays valid after the row it was
//! derived from is gone.

use base64::prelude::*;
use jiff::Timestamp;
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Maximum number of items per page. Larger limits are clamped.
pub const MAX_LIMIT: i64 = 100;

/// Reasons a cursor token fails to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CursorError {
    /// The token is not URL-safe base64.
    #[error("token is not valid base64")]
    Encoding,
    /// The decoded payload is not UTF-8.
    #[error("token payload is not valid UTF-8")]
    Utf8,
    /// The payload is not an RFC 3339 timestamp.
    #[error("token payload is not a timestamp")]
    Timestamp,
}

/// A position in the ordering of products.
///
/// Encodes to URL-safe, unpadded base64 of the timestamp's RFC 3339 text.
/// Equal timestamps always produce identical tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(into = "String", try_from = "String")]
pub struct Cursor {
    timestamp: Timestamp,
}

impl Cursor {
    /// Creates a new cursor at the given ordering key.
    #[inline]
    pub fn new(timestamp: Timestamp) -> Self {
        Self { timestamp }
    }

    /// Returns the encoded ordering key.
    #[inline]
    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    /// Encodes the cursor as a URL-safe base64 string.
    pub fn encode(&self) -> String {
        BASE64_URL_SAFE_NO_PAD.encode(self.timestamp.to_string())
    }

    /// Decodes a cursor from a URL-safe base64 string.
    pub fn decode(encoded: &str) -> Result<Self, CursorError> {
        let bytes = BASE64_URL_SAFE_NO_PAD
            .decode(encoded)
            .map_err(|_| CursorError::Encoding)?;
        let data = String::from_utf8(bytes).map_err(|_| CursorError::Utf8)?;
        let timestamp = data.parse().map_err(|_| CursorError::Timestamp)?;

        Ok(Self { timestamp })
    }
}

impl std::fmt::Display for Cursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.encode())
    }
}

impl std::str::FromStr for Cursor {
    type Err = CursorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s)
    }
}

impl From<Cursor> for String {
    fn from(cursor: Cursor) -> Self {
        cursor.encode()
    }
}

impl TryFrom<String> for Cursor {
    type Error = CursorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Cursor::decode(&value)
    }
}

impl From<Timestamp> for Cursor {
    fn from(timestamp: Timestamp) -> Self {
        Self::new(timestamp)
    }
}

/// Tokens pointing at the pages adjacent to the current one.
///
/// `prev` is present only when rows exist before the page, `next` only when
/// rows exist after it. An empty page carries neither.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Cursors {
    /// Cursor to the previous page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prev: Option<Cursor>,
    /// Cursor to the next page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<Cursor>,
}

impl Cursors {
    /// Returns cursors for a page with no neighbours.
    #[inline]
    pub fn none() -> Self {
        Self::default()
    }
}

/// Where a cursor-paginated request starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CursorPosition {
    /// The first page in the active order.
    #[default]
    First,
    /// Rows strictly after the cursor.
    Next(Cursor),
    /// Rows strictly before the cursor.
    Prev(Cursor),
}

impl CursorPosition {
    /// Returns the cursor this position navigates from.
    pub fn cursor(&self) -> Option<Cursor> {
        match self {
            Self::First => None,
            Self::Next(cursor) | Self::Prev(cursor) => Some(*cursor),
        }
    }

    /// Returns a short label for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::First => "first",
            Self::Next(_) => "next",
            Self::Prev(_) => "prev",
        }
    }
}

/// How the engine decides whether pages exist on either side of a window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "snake_case")]
pub enum BoundaryStrategy {
    /// One existence query per edge of the window.
    Probe,
    /// Fetch one extra row in the travel direction; probe only the opposite
    /// edge, and only when navigating from a cursor.
    #[default]
    Overfetch,
}

/// Validated cursor pagination parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorPagination {
    /// Maximum number of products to return, within `1..=MAX_LIMIT`.
    pub limit: i64,
    /// Where the page starts.
    pub position: CursorPosition,
    /// How adjacent pages are detected.
    pub strategy: BoundaryStrategy,
}

impl CursorPagination {
    /// Requests the first page.
    pub fn first(limit: i64) -> Result<Self> {
        Self::at(limit, CursorPosition::First)
    }

    /// Requests the page after `cursor`.
    pub fn next(limit: i64, cursor: Cursor) -> Result<Self> {
        Self::at(limit, CursorPosition::Next(cursor))
    }

    /// Requests the page before `cursor`.
    pub fn prev(limit: i64, cursor: Cursor) -> Result<Self> {
        Self::at(limit, CursorPosition::Prev(cursor))
    }

    /// Builds pagination from the raw tokens a client sent.
    ///
    /// Empty tokens are treated as absent. Supplying both tokens, a
    /// non-positive limit or a token that does not decode is rejected.
    pub fn from_tokens(limit: i64, prev: Option<&str>, next: Option<&str>) -> Result<Self> {
        let prev = prev.filter(|token| !token.is_empty());
        let next = next.filter(|token| !token.is_empty());

        let position = match (prev, next) {
            (Some(_), Some(_)) => {
                return Err(Error::invalid_argument(
                    "only one of `prev` and `next` may be set",
                ));
            }
            (Some(token), None) => CursorPosition::Prev(Cursor::decode(token)?),
            (None, Some(token)) => CursorPosition::Next(Cursor::decode(token)?),
            (None, None) => CursorPosition::First,
        };

        Self::at(limit, position)
    }

    fn at(limit: i64, position: CursorPosition) -> Result<Self> {
        if limit <= 0 {
            return Err(Error::invalid_argument(format!(
                "limit must be positive, got {limit}"
            )));
        }

        Ok(Self {
            limit: limit.min(MAX_LIMIT),
            position,
            strategy: BoundaryStrategy::default(),
        })
    }

    /// Selects the boundary detection strategy.
    #[inline]
    pub fn with_strategy(mut self, strategy: BoundaryStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Returns the number of rows to fetch for the window.
    ///
    /// One extra row is fetched under [`BoundaryStrategy::Overfetch`] to
    /// detect whether more rows follow in the travel direction.
    pub fn fetch_limit(&self) -> i64 {
        match self.strategy {
            BoundaryStrategy::Probe => self.limit,
            BoundaryStrategy::Overfetch => self.limit + 1,
        }
    }

    /// Checks if we have a cursor to paginate from.
    #[inline]
    pub fn has_cursor(&self) -> bool {
        self.position.cursor().is_some()
    }
}

/// Cursor pagination parameters as sent by a client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CursorRequest {
    /// Maximum number of products to return.
    pub limit: i64,
    /// Token of the page to go back from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prev: Option<String>,
    /// Token of the page to continue from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    /// Boundary detection strategy.
    #[serde(default)]
    pub strategy: BoundaryStrategy,
}

impl TryFrom<CursorRequest> for CursorPagination {
    type Error = Error;

    fn try_from(request: CursorRequest) -> Result<Self> {
        Self::from_tokens(
            request.limit,
            request.prev.as_deref(),
            request.next.as_deref(),
        )
        .map(|pagination| pagination.with_strategy(request.strategy))
    }
}

/// Result of a cursor-paginated query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CursorPage<T> {
    /// The items in this page, in the requested order.
    pub items: Vec<T>,
    /// Tokens for the adjacent pages.
    pub cursors: Cursors,
}

impl<T> CursorPage<T> {
    /// Creates a new cursor page.
    pub fn new(items: Vec<T>, cursors: Cursors) -> Self {
        Self { items, cursors }
    }

    /// Creates an empty cursor page.
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            cursors: Cursors::none(),
        }
    }

    /// Returns true if there are items after this page.
    #[inline]
    pub fn has_next(&self) -> bool {
        self.cursors.next.is_some()
    }

    /// Returns true if there are items before this page.
    #[inline]
    pub fn has_prev(&self) -> bool {
        self.cursors.prev.is_some()
    }

    /// Maps the items to a different type.
    pub fn map<U, F>(self, f: F) -> CursorPage<U>
    where
        F: FnMut(T) -> U,
    {
        CursorPage {
            items: self.items.into_iter().map(f).collect(),
            cursors: self.cursors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> Timestamp {
        s.parse().unwrap()
    }

    #[test]
    fn cursor_encode_decode_roundtrip() {
        let cursor = Cursor::new(ts("2022-05-27T13:29:16.123456Z"));

        let encoded = cursor.encode();
        let decoded = Cursor::decode(&encoded).expect("decode should succeed");

        assert_eq!(cursor, decoded);
        assert!(!encoded.contains('='));
        assert!(!encoded.contains('+'));
        assert!(!encoded.contains('/'));
    }

    #[test]
    fn cursor_encoding_is_stable() {
        let a = Cursor::new(ts("2022-05-27T13:29:16Z"));
        let b = Cursor::new(ts("2022-05-27T13:29:16Z"));
        assert_eq!(a.encode(), b.encode());
        assert_eq!(a.encode(), "MjAyMi0wNS0yN1QxMzoyOToxNlo");
    }

    #[test]
    fn cursor_decode_invalid() {
        assert_eq!(Cursor::decode("not base64!"), Err(CursorError::Encoding));
        assert_eq!(
            Cursor::decode(&BASE64_URL_SAFE_NO_PAD.encode([0xff, 0xfe])),
            Err(CursorError::Utf8)
        );
        assert_eq!(
            Cursor::decode(&BASE64_URL_SAFE_NO_PAD.encode("yesterday")),
            Err(CursorError::Timestamp)
        );
        assert_eq!(Cursor::decode(""), Err(CursorError::Timestamp));
    }

    #[test]
    fn cursor_serializes_as_token() {
        let cursor = Cursor::new(ts("2022-05-27T13:29:16Z"));
        let json = serde_json::to_string(&cursor).unwrap();
        assert_eq!(json, format!("\"{}\"", cursor.encode()));

        let back: Cursor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cursor);

        assert!(serde_json::from_str::<Cursor>("\"@@@\"").is_err());
    }

    #[test]
    fn cursors_skip_absent_tokens() {
        let cursors = Cursors {
            prev: None,
            next: Some(Cursor::new(ts("2022-05-26T13:29:16Z"))),
        };
        let json = serde_json::to_value(cursors).unwrap();
        assert!(json.get("prev").is_none());
        assert!(json.get("next").is_some());
    }

    #[test]
    fn pagination_rejects_both_cursors() {
        let token = Cursor::new(ts("2022-05-26T13:29:16Z")).encode();
        let error = CursorPagination::from_tokens(5, Some(&token), Some(&token)).unwrap_err();
        assert!(error.is_invalid_argument());
    }

    #[test]
    fn pagination_rejects_non_positive_limit() {
        assert!(CursorPagination::first(0).unwrap_err().is_invalid_argument());
        assert!(CursorPagination::first(-3).unwrap_err().is_invalid_argument());
        assert!(
            CursorPagination::from_tokens(0, None, None)
                .unwrap_err()
                .is_invalid_argument()
        );
    }

    #[test]
    fn pagination_rejects_malformed_token() {
        let error = CursorPagination::from_tokens(5, None, Some("%%%")).unwrap_err();
        assert!(error.is_invalid_argument());
        assert!(matches!(error, Error::MalformedCursor(CursorError::Encoding)));
    }

    #[test]
    fn pagination_from_tokens() {
        let cursor = Cursor::new(ts("2022-05-26T13:29:16Z"));
        let token = cursor.encode();

        let pagination = CursorPagination::from_tokens(5, None, None).unwrap();
        assert_eq!(pagination.position, CursorPosition::First);
        assert!(!pagination.has_cursor());

        let pagination = CursorPagination::from_tokens(5, None, Some(&token)).unwrap();
        assert_eq!(pagination.position, CursorPosition::Next(cursor));

        let pagination = CursorPagination::from_tokens(5, Some(&token), Some("")).unwrap();
        assert_eq!(pagination.position, CursorPosition::Prev(cursor));
    }

    #[test]
    fn pagination_limit_is_clamped() {
        let pagination = CursorPagination::first(500).unwrap();
        assert_eq!(pagination.limit, MAX_LIMIT);
    }

    #[test]
    fn pagination_fetch_limit() {
        let pagination = CursorPagination::first(50).unwrap();
        assert_eq!(pagination.strategy, BoundaryStrategy::Overfetch);
        assert_eq!(pagination.fetch_limit(), 51);

        let pagination = pagination.with_strategy(BoundaryStrategy::Probe);
        assert_eq!(pagination.fetch_limit(), 50);
    }

    #[test]
    fn request_into_pagination() {
        let request: CursorRequest =
            serde_json::from_str(r#"{"limit": 3, "strategy": "probe"}"#).unwrap();
        let pagination = CursorPagination::try_from(request).unwrap();
        assert_eq!(pagination.limit, 3);
        assert_eq!(pagination.strategy, BoundaryStrategy::Probe);
    }

    #[test]
    fn cursor_page_map() {
        let page = CursorPage::new(vec![1, 2, 3], Cursors::none());
        let page = page.map(|n| n * 2);
        assert_eq!(page.items, vec![2, 4, 6]);
        assert!(!page.has_next());
        assert!(!page.has_prev());
    }
}
