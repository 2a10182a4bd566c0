/**
 * Rate Limiting Middleware
 *
 * Fixed-window request counting per source address. The auth router is
 * wrapped with this layer so credential endpoints cannot be brute forced.
 *
 * # Source Address
 *
 * 1. `ConnectInfo<SocketAddr>` when the server was started with connect info
 * 2. the first `X-Forwarded-For` entry
 * 3. `"unknown"`, shared by every request without an address
 */

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};

use crate::backend::error::BackendError;

/// Length of one counting window
pub const RATE_LIMIT_WINDOW: Duration = Duration::from_secs(10 * 60);

/// Expired windows are swept once the table grows past this size
const SWEEP_THRESHOLD: usize = 10_000;

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    count: u32,
}

/// Shared request counters, one window per source address
#[derive(Debug, Clone)]
pub struct RateLimiter {
    windows: Arc<Mutex<HashMap<String, Window>>>,
    max_requests: u32,
    window: Duration,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            windows: Arc::new(Mutex::new(HashMap::new())),
            max_requests,
            window,
        }
    }

    pub fn max_requests(&self) -> u32 {
        self.max_requests
    }

    /// Count a request from `key`; `false` once the window's cap is exceeded
    pub fn check(&self, key: &str) -> bool {
        self.check_at(key, Instant::now())
    }

    fn check_at(&self, key: &str, now: Instant) -> bool {
        let mut windows = self.windows.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

        if windows.len() > SWEEP_THRESHOLD {
            let window = self.window;
            windows.retain(|_, w| now.duration_since(w.started) < window);
        }

        let entry = windows.entry(key.to_string()).or_insert(Window { started: now, count: 0 });
        if now.duration_since(entry.started) >= self.window {
            *entry = Window { started: now, count: 0 };
        }

        entry.count = entry.count.saturating_add(1);
        entry.count <= self.max_requests
    }
}

/// Source address used as the rate-limit key
pub fn client_key(request: &Request) -> String {
    if let Some(ConnectInfo(addr)) = request.extensions().get::<ConnectInfo<SocketAddr>>() {
        return addr.ip().to_string();
    }

    request
        .headers()
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| "unknown".to_string())
}

/// Reject requests beyond the per-address cap with 429
pub async fn rate_limit_middleware(
    State(limiter): State<RateLimiter>,
    request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let key = client_key(&request);

    if !limiter.check(&key) {
        tracing::warn!("Rate limit of {} exceeded for {}", limiter.max_requests(), key);
        return Err(BackendError::RateLimited);
    }

    Ok(next.run(request).await)
}
