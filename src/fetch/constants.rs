//! Constants for the fetch module (timeouts, retry defaults).

use std::time::Duration;

/// Default HTTP connect timeout (30 seconds).
pub const CONNECT_TIMEOUT_SECS: u64 = 30;

/// TCP keep-alive interval for pooled connections (30 seconds).
pub const KEEP_ALIVE_SECS: u64 = 30;

/// Default number of attempts per fetch, including the first one.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default delay between attempts (none).
pub const DEFAULT_RETRY_DELAY: Duration = Duration::ZERO;

/// Maximum number of response body bytes kept for diagnostics on non-2xx responses.
pub const MAX_ERROR_BODY_BYTES: usize = 512;
