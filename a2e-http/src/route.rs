//! Path construction for each A2E operation.
//!
//! | Operation      | Method | Path                                                   |
//! |----------------|--------|--------------------------------------------------------|
//! | search         | POST   | `/api/v1/open/services/search`                         |
//! | protocol       | GET    | `/api/v1/open/services/{service_id}/protocol`          |
//! | execute        | POST   | `/api/v1/open/services/{service_id}/execute/{endpoint}`|
//! | consumer token | POST   | `/api/v1/open/platform/get_user_token`                 |
//!
//! Interpolated values are inserted as single percent-encoded path
//! segments, so a `/` inside a service ID cannot change the route.

use http::Method;
use url::Url;

use crate::constants::API_PREFIX;
use crate::error::ClientError;

/// A resolved A2E route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route<'a> {
    /// `POST /services/search`
    Search,
    /// `GET /services/{service_id}/protocol`
    Protocol {
        /// Target service.
        service_id: &'a str,
    },
    /// `POST /services/{service_id}/execute/{endpoint}`
    Execute {
        /// Target service.
        service_id: &'a str,
        /// Endpoint name.
        endpoint: &'a str,
    },
    /// `POST /platform/get_user_token`
    ConsumerToken,
}

impl Route<'_> {
    /// Returns the HTTP method of the route.
    #[must_use]
    pub fn method(&self) -> Method {
        match self {
            Self::Protocol { .. } => Method::GET,
            Self::Search | Self::Execute { .. } | Self::ConsumerToken => Method::POST,
        }
    }

    /// Returns a static description used in errors and spans.
    #[must_use]
    pub const fn context(&self) -> &'static str {
        match self {
            Self::Search => "POST /services/search",
            Self::Protocol { .. } => "GET /services/{service_id}/protocol",
            Self::Execute { .. } => "POST /services/{service_id}/execute/{endpoint}",
            Self::ConsumerToken => "POST /platform/get_user_token",
        }
    }

    /// Returns the path segments following the shared `/api/v1/open` prefix.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::EmptyPathSegment`] if an interpolated value is
    /// empty.
    pub fn segments(&self) -> Result<Vec<&str>, ClientError> {
        let context = self.context();
        Ok(match *self {
            Self::Search => vec!["services", "search"],
            Self::Protocol { service_id } => vec![
                "services",
                non_empty(context, "service_id", service_id)?,
                "protocol",
            ],
            Self::Execute {
                service_id,
                endpoint,
            } => vec![
                "services",
                non_empty(context, "service_id", service_id)?,
                "execute",
                non_empty(context, "endpoint", endpoint)?,
            ],
            Self::ConsumerToken => vec!["platform", "get_user_token"],
        })
    }

    /// Joins this route onto a base URL.
    ///
    /// Any path already present on the base is kept as a prefix.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the base URL does not parse, cannot carry
    /// a path, or an interpolated value is empty.
    pub fn url(&self, base_url: &str) -> Result<Url, ClientError> {
        let context = self.context();
        let segments = self.segments()?;
        let mut url =
            Url::parse(base_url).map_err(|source| ClientError::UrlParse { context, source })?;
        url.path_segments_mut()
            .map_err(|()| ClientError::CannotBeABase {
                context,
                base_url: base_url.to_owned(),
            })?
            .pop_if_empty()
            .extend(API_PREFIX)
            .extend(segments);
        Ok(url)
    }
}

fn non_empty<'s>(
    context: &'static str,
    field: &'static str,
    value: &'s str,
) -> Result<&'s str, ClientError> {
    if value.is_empty() {
        Err(ClientError::EmptyPathSegment { context, field })
    } else {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://api.a2e-platform.com";

    #[test]
    fn test_fixed_paths() {
        assert_eq!(
            Route::Search.url(BASE).unwrap().as_str(),
            "https://api.a2e-platform.com/api/v1/open/services/search"
        );
        assert_eq!(
            Route::ConsumerToken.url(BASE).unwrap().as_str(),
            "https://api.a2e-platform.com/api/v1/open/platform/get_user_token"
        );
    }

    #[test]
    fn test_interpolated_paths() {
        let protocol = Route::Protocol { service_id: "s1" };
        assert_eq!(protocol.url(BASE).unwrap().path(), "/api/v1/open/services/s1/protocol");

        let execute = Route::Execute {
            service_id: "s1",
            endpoint: "get_menu",
        };
        assert_eq!(
            execute.url(BASE).unwrap().path(),
            "/api/v1/open/services/s1/execute/get_menu"
        );
    }

    #[test]
    fn test_methods() {
        assert_eq!(Route::Search.method(), Method::POST);
        assert_eq!(Route::Protocol { service_id: "s1" }.method(), Method::GET);
        assert_eq!(Route::ConsumerToken.method(), Method::POST);
    }

    #[test]
    fn test_base_with_path_prefix() {
        let url = Route::Search.url("http://localhost:9000/gateway").unwrap();
        assert_eq!(url.path(), "/gateway/api/v1/open/services/search");
    }

    #[test]
    fn test_segments_are_percent_encoded() {
        let url = Route::Protocol {
            service_id: "a/b c",
        }
        .url(BASE)
        .unwrap();
        assert_eq!(url.path(), "/api/v1/open/services/a%2Fb%20c/protocol");
    }

    #[test]
    fn test_empty_segments_rejected() {
        let err = Route::Protocol { service_id: "" }.url(BASE).unwrap_err();
        assert!(matches!(
            err,
            ClientError::EmptyPathSegment {
                field: "service_id",
                ..
            }
        ));

        let err = Route::Execute {
            service_id: "s1",
            endpoint: "",
        }
        .url(BASE)
        .unwrap_err();
        assert!(matches!(
            err,
            ClientError::EmptyPathSegment {
                field: "endpoint",
                ..
            }
        ));
    }

    #[test]
    fn test_invalid_base_urls() {
        assert!(matches!(
            Route::Search.url("not a url").unwrap_err(),
            ClientError::UrlParse { .. }
        ));
        assert!(matches!(
            Route::Search.url("mailto:ops@example.com").unwrap_err(),
            ClientError::CannotBeABase { .. }
        ));
    }
}
