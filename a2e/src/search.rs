//! Service catalog search types.
//!
//! Used with `POST /api/v1/open/services/search`.

use serde::{Deserialize, Serialize};

/// Default page requested by [`SearchRequest::new`].
pub const DEFAULT_PAGE: u32 = 1;

/// Default page size requested by [`SearchRequest::new`].
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// A geographic point used to bias search results.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Location {
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
}

impl Location {
    /// Creates a new location.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Search input.
///
/// `type` and `location` are omitted from the wire body when unset. `page`
/// and `size` are always sent; a zero value leaves the choice to the
/// server.
///
/// # Example
///
/// ```rust
/// use a2e::search::{Location, SearchRequest};
///
/// let request = SearchRequest::new("translate")
///     .with_type("nlp")
///     .with_location(Location::new(31.23, 121.47))
///     .with_size(20);
/// assert_eq!(request.page, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Free-text keyword.
    pub keyword: String,

    /// Optional service type filter.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub service_type: Option<String>,

    /// Optional location hint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,

    /// 1-based page number.
    pub page: u32,

    /// Page size.
    pub size: u32,
}

impl SearchRequest {
    /// Creates a request for the first page of ten results.
    #[must_use]
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            service_type: None,
            location: None,
            page: DEFAULT_PAGE,
            size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Restricts results to a service type.
    #[must_use]
    pub fn with_type(mut self, service_type: impl Into<String>) -> Self {
        self.service_type = Some(service_type.into());
        self
    }

    /// Attaches a location hint.
    #[must_use]
    pub const fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// Sets the page number.
    #[must_use]
    pub const fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Sets the page size.
    #[must_use]
    pub const fn with_size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }
}

/// The organisation publishing a service.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Provider {
    /// Provider identity.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Certification label (e.g. `"verified"`).
    pub certification: String,
}

/// A catalog entry returned by search.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Service {
    /// Service identity, used in protocol and execute paths.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Declared service type.
    #[serde(rename = "type")]
    pub service_type: String,
    /// Human-readable description.
    pub description: String,
    /// Free-form tags.
    pub tags: Vec<String>,
    /// Platform certification level.
    pub certification_level: i64,
    /// Publishing provider.
    pub provider: Provider,
}

/// Search output. `list` keeps the order chosen by the server.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchResult {
    /// Total number of matches across all pages.
    pub total: u64,
    /// Services on the requested page.
    pub list: Vec<Service>,
}
