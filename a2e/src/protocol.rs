//! Protocol document types.
//!
//! A protocol document is the machine-readable contract of one service,
//! fetched with `GET /api/v1/open/services/{service_id}/protocol`. An agent
//! reads it to learn what the service does, how a user authenticates,
//! which permissions are needed, and which endpoints can be executed with
//! what input.
//!
//! All types decode leniently: absent fields take their empty value.

use serde::{Deserialize, Serialize};

use crate::execute::{ExecuteError, JsonMap};
use crate::search::Provider;

/// The full descriptor of one service.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProtocolDocument {
    /// Protocol version string.
    pub version: String,
    /// Service identity.
    pub service: ServiceInfo,
    /// Semantic description for agents.
    pub semantic: Semantic,
    /// Authentication requirements.
    pub authentication: Authentication,
    /// Permission requirements.
    pub permissions: Permissions,
    /// Callable endpoints, in declaration order.
    pub endpoints: Vec<Endpoint>,
    /// Known error codes.
    pub error_handling: ErrorHandling,
}

/// Identity of the described service.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceInfo {
    /// Service identity.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Declared service type.
    #[serde(rename = "type")]
    pub service_type: String,
    /// Publishing provider.
    pub provider: Provider,
}

/// What the service does, phrased for an agent.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Semantic {
    /// Free-text description.
    pub description: String,
    /// Search keywords.
    pub keywords: Vec<String>,
    /// Declared capabilities.
    pub capabilities: Vec<String>,
    /// Declared constraints (opening hours, delivery radius, ...).
    pub constraints: Vec<String>,
}

/// Authentication requirements.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Authentication {
    /// Whether a consumer token is required to execute endpoints.
    pub required: bool,
    /// Supported methods, in order of preference.
    pub methods: Vec<AuthMethod>,
}

/// One way of obtaining an authorization code.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthMethod {
    /// Method tag, passed as `auth_type` when requesting a consumer token.
    #[serde(rename = "type")]
    pub method_type: String,
    /// Human-readable description.
    pub description: String,
    /// Where to obtain credentials for this method.
    pub endpoint: String,
}

/// Required and optional permissions.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Permissions {
    /// Permissions the service cannot work without.
    pub required: Vec<Permission>,
    /// Permissions that unlock extra behavior.
    pub optional: Vec<Permission>,
}

/// A single permission.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Permission {
    /// Permission name.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    /// Where to request the permission.
    pub endpoint: String,
}

/// An independently invocable capability of the service.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoint {
    /// Endpoint name, used in the execute path.
    pub name: String,
    /// Path on the provider's own API.
    pub path: String,
    /// HTTP method on the provider's own API.
    pub method: String,
    /// Human-readable description.
    pub description: String,
    /// Whether calling this endpoint incurs a payment.
    pub requires_payment: bool,
    /// JSON-schema-shaped description of the expected input.
    pub input_schema: JsonMap,
    /// JSON-schema-shaped description of the produced output.
    pub output_schema: JsonMap,
    /// Free-text description of the output.
    pub output_description: String,
}

/// Error-handling section of the descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorHandling {
    /// Known error codes.
    pub codes: Vec<ErrorCode>,
}

/// A documented error code with remediation advice.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorCode {
    /// Error code as reported by the service.
    pub code: String,
    /// What the code means.
    pub description: String,
    /// What the caller should do about it.
    pub suggestion: String,
}

impl ProtocolDocument {
    /// Looks up an endpoint by name.
    #[must_use]
    pub fn endpoint(&self, name: &str) -> Option<&Endpoint> {
        self.endpoints.iter().find(|e| e.name == name)
    }

    /// Returns whether the named endpoint requires payment, or `None` if
    /// the endpoint is not advertised.
    #[must_use]
    pub fn requires_payment(&self, name: &str) -> Option<bool> {
        self.endpoint(name).map(|e| e.requires_payment)
    }

    /// Looks up an authentication method by its type tag.
    #[must_use]
    pub fn auth_method(&self, method_type: &str) -> Option<&AuthMethod> {
        self.authentication
            .methods
            .iter()
            .find(|m| m.method_type == method_type)
    }

    /// Looks up a permission by name, required permissions first.
    #[must_use]
    pub fn permission(&self, name: &str) -> Option<&Permission> {
        self.permissions
            .required
            .iter()
            .chain(&self.permissions.optional)
            .find(|p| p.name == name)
    }

    /// Looks up a documented error code.
    #[must_use]
    pub fn error_code(&self, code: &str) -> Option<&ErrorCode> {
        self.error_handling.codes.iter().find(|c| c.code == code)
    }

    /// Resolves remediation text for an execution failure.
    ///
    /// Prefers the suggestion sent with the failure itself and falls back
    /// to the one documented for its code.
    #[must_use]
    pub fn suggestion_for<'a>(&'a self, error: &'a ExecuteError) -> Option<&'a str> {
        if !error.suggestion.is_empty() {
            return Some(error.suggestion.as_str());
        }
        self.error_code(&error.code)
            .map(|c| c.suggestion.as_str())
            .filter(|s| !s.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_document() -> ProtocolDocument {
        serde_json::from_value(json!({
            "version": "1.0",
            "service": {
                "id": "s1",
                "name": "Tea House",
                "type": "food",
                "provider": {"id": "p1", "name": "Acme", "certification": "verified"}
            },
            "semantic": {
                "description": "Bubble tea ordering",
                "keywords": ["tea"],
                "capabilities": ["menu", "order"],
                "constraints": ["09:00-22:00"]
            },
            "authentication": {
                "required": true,
                "methods": [
                    {"type": "oauth", "description": "OAuth login", "endpoint": "https://auth.example/oauth"},
                    {"type": "sms", "description": "SMS code", "endpoint": "https://auth.example/sms"}
                ]
            },
            "permissions": {
                "required": [{"name": "phone", "description": "Contact number", "endpoint": "/perm/phone"}],
                "optional": [{"name": "location", "description": "Delivery", "endpoint": "/perm/location"}]
            },
            "endpoints": [
                {
                    "name": "get_menu",
                    "path": "/api/menu",
                    "method": "GET",
                    "description": "List drinks",
                    "requires_payment": false,
                    "input_schema": {},
                    "output_schema": {"type": "object"},
                    "output_description": "Menu items"
                },
                {
                    "name": "create_order",
                    "path": "/api/orders",
                    "method": "POST",
                    "description": "Place an order",
                    "requires_payment": true,
                    "input_schema": {"type": "object", "required": ["items"]},
                    "output_schema": {"type": "object"},
                    "output_description": "Order number"
                }
            ],
            "error_handling": {
                "codes": [
                    {"code": "E_SOLD_OUT", "description": "Item sold out", "suggestion": "pick another item"},
                    {"code": "E_CLOSED", "description": "Shop closed", "suggestion": ""}
                ]
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_decodes_full_document() {
        let doc = sample_document();
        assert_eq!(doc.version, "1.0");
        assert_eq!(doc.service.service_type, "food");
        assert!(doc.authentication.required);
        assert_eq!(doc.authentication.methods[1].method_type, "sms");
        assert_eq!(doc.endpoints.len(), 2);
        assert_eq!(doc.endpoints[1].input_schema["required"], json!(["items"]));
    }

    #[test]
    fn test_endpoint_lookup() {
        let doc = sample_document();
        assert_eq!(doc.endpoint("get_menu").map(|e| e.method.as_str()), Some("GET"));
        assert!(doc.endpoint("refund").is_none());
        assert_eq!(doc.requires_payment("create_order"), Some(true));
        assert_eq!(doc.requires_payment("get_menu"), Some(false));
        assert_eq!(doc.requires_payment("refund"), None);
    }

    #[test]
    fn test_auth_and_permission_lookup() {
        let doc = sample_document();
        assert_eq!(
            doc.auth_method("oauth").map(|m| m.endpoint.as_str()),
            Some("https://auth.example/oauth")
        );
        assert!(doc.permission("phone").is_some());
        assert!(doc.permission("location").is_some());
        assert!(doc.permission("camera").is_none());
    }

    #[test]
    fn test_suggestion_prefers_execution_error() {
        let doc = sample_document();
        let err = ExecuteError::new("E_SOLD_OUT", "sold out").with_suggestion("try tomorrow");
        assert_eq!(doc.suggestion_for(&err), Some("try tomorrow"));
    }

    #[test]
    fn test_suggestion_falls_back_to_document() {
        let doc = sample_document();
        let err = ExecuteError::new("E_SOLD_OUT", "sold out");
        assert_eq!(doc.suggestion_for(&err), Some("pick another item"));

        let closed = ExecuteError::new("E_CLOSED", "closed");
        assert_eq!(doc.suggestion_for(&closed), None);

        let unknown = ExecuteError::new("E_UNKNOWN", "?");
        assert_eq!(doc.suggestion_for(&unknown), None);
    }

    #[test]
    fn test_empty_object_decodes_to_default() {
        let doc: ProtocolDocument = serde_json::from_value(json!({})).unwrap();
        assert_eq!(doc, ProtocolDocument::default());
    }
}
