use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, instrument, warn};

use crate::config::RateLimitConfig;
use crate::shared::AppError;

/// Backing store for the sliding-window hit log
#[async_trait]
pub trait RateLimitStore: Send + Sync {
    /// Drops hits for `key` at or before `now - window`, then records a hit at
    /// `now` if fewer than `max_requests` remain. Returns whether the hit was recorded.
    async fn try_acquire(
        &self,
        key: &str,
        now: DateTime<Utc>,
        window: Duration,
        max_requests: usize,
    ) -> Result<bool, AppError>;
}

/// Process-local hit log. Every replica keeps its own counts.
///
/// Keys whose hits have all aged out are swept at most once per window, so
/// the map only holds keys seen within roughly the last two windows.
#[derive(Default)]
pub struct InMemoryRateLimitStore {
    state: Mutex<HitLog>,
}

#[derive(Default)]
struct HitLog {
    hits: HashMap<String, VecDeque<DateTime<Utc>>>,
    last_sweep: Option<DateTime<Utc>>,
}

impl HitLog {
    fn sweep_if_due(&mut self, now: DateTime<Utc>, window: Duration) {
        if self.last_sweep.is_some_and(|last| now - last < window) {
            return;
        }
        let cutoff = now - window;
        let before = self.hits.len();
        self.hits.retain(|_, log| log.back().is_some_and(|&t| t > cutoff));
        self.last_sweep = Some(now);

        let removed = before - self.hits.len();
        if removed > 0 {
            debug!(removed, remaining = self.hits.len(), "Swept idle rate limit keys");
        }
    }
}

impl InMemoryRateLimitStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently tracked
    pub async fn tracked_keys(&self) -> usize {
        self.state.lock().await.hits.len()
    }
}

#[async_trait]
impl RateLimitStore for InMemoryRateLimitStore {
    async fn try_acquire(
        &self,
        key: &str,
        now: DateTime<Utc>,
        window: Duration,
        max_requests: usize,
    ) -> Result<bool, AppError> {
        let cutoff = now - window;
        let mut state = self.state.lock().await;
        state.sweep_if_due(now, window);

        let log = state.hits.entry(key.to_string()).or_default();
        while log.front().is_some_and(|&t| t <= cutoff) {
            log.pop_front();
        }

        if log.len() >= max_requests {
            if log.is_empty() {
                state.hits.remove(key);
            }
            return Ok(false);
        }

        log.push_back(now);
        Ok(true)
    }
}

/// Fixed-quota sliding-window limiter
pub struct RateLimiter {
    store: Arc<dyn RateLimitStore>,
    max_requests: usize,
    window: Duration,
}

impl RateLimiter {
    pub fn new(store: Arc<dyn RateLimitStore>, config: &RateLimitConfig) -> Self {
        Self {
            store,
            max_requests: config.max_requests,
            window: Duration::seconds(config.window_secs.min(u64::from(u32::MAX)) as i64),
        }
    }

    /// Admits or rejects one request for `key`.
    /// Store failures admit the request.
    #[instrument(skip(self))]
    pub async fn check(&self, key: &str) -> Result<(), AppError> {
        self.check_at(key, Utc::now()).await
    }

    pub async fn check_at(&self, key: &str, now: DateTime<Utc>) -> Result<(), AppError> {
        match self
            .store
            .try_acquire(key, now, self.window, self.max_requests)
            .await
        {
            Ok(true) => Ok(()),
            Ok(false) => {
                debug!(key, max_requests = self.max_requests, "Rate limit exceeded");
                Err(AppError::RateLimitExceeded)
            }
            Err(e) => {
                warn!(key, error = %e, "Rate limit store unavailable, allowing request");
                Ok(())
            }
        }
    }
}
