//! HTTP-specific constants for the A2E protocol.

use std::time::Duration;

/// Default platform base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.a2e-platform.com";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Header carrying the application ID when identity is configured.
pub const APP_ID_HEADER: &str = "X-App-ID";

/// Path segments shared by every open-platform route.
pub const API_PREFIX: [&str; 3] = ["api", "v1", "open"];

/// Environment variable overriding the base URL.
pub const ENV_BASE_URL: &str = "A2E_BASE_URL";

/// Environment variable holding the application ID.
pub const ENV_APP_ID: &str = "A2E_APP_ID";

/// Environment variable holding the application secret.
pub const ENV_APP_SECRET: &str = "A2E_APP_SECRET";

/// Environment variable overriding the timeout, in whole seconds.
pub const ENV_TIMEOUT: &str = "A2E_TIMEOUT";
