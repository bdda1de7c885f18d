use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::{AppError, Result};

/// Fixed-window request counter for a single limiter key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitWindow {
    /// Requests admitted in the current window
    pub requests: u32,
    /// Unix timestamp when the counter resets
    pub reset_at: i64,
}

impl RateLimitWindow {
    /// Create a new window starting at `now`
    pub fn new(now: i64, window_secs: i64) -> Self {
        Self {
            requests: 0,
            reset_at: now + window_secs,
        }
    }

    /// Admit one request if the window still has room
    ///
    /// An expired window is reset before counting.
    pub fn check_and_increment(
        &mut self,
        now: i64,
        max_requests: u32,
        window_secs: i64,
    ) -> Result<()> {
        if now >= self.reset_at {
            self.requests = 0;
            self.reset_at = now + window_secs;
        }

        if self.requests >= max_requests {
            let retry_after_secs = u64::try_from(self.reset_at - now).unwrap_or(0);
            return Err(AppError::RateLimitExceeded { retry_after_secs });
        }

        self.requests += 1;
        Ok(())
    }
}

/// Process-wide limiter shared through `AppState`
#[derive(Debug)]
pub struct RateLimiter {
    max_requests: u32,
    window_secs: i64,
    windows: Mutex<HashMap<String, RateLimitWindow>>,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window_secs: i64::try_from(window_secs).unwrap_or(i64::MAX),
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Count one request for `key` at time `now`
    ///
    /// Returns the requests still available in the key's window.
    pub fn check(&self, key: &str, now: i64) -> Result<u32> {
        let mut windows = self.windows.lock().unwrap_or_else(|e| e.into_inner());

        // Drop windows that have already expired so idle keys do not accumulate
        windows.retain(|_, window| window.reset_at > now);

        let window = windows
            .entry(key.to_string())
            .or_insert_with(|| RateLimitWindow::new(now, self.window_secs));

        if let Err(e) = window.check_and_increment(now, self.max_requests, self.window_secs) {
            tracing::warn!(
                "Rate limit exceeded for {}: {}/{}",
                key,
                window.requests,
                self.max_requests
            );
            return Err(e);
        }

        Ok(self.max_requests.saturating_sub(window.requests))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINDOW: i64 = 900;

    #[test]
    fn test_new_window() {
        let now = 1000000;
        let window = RateLimitWindow::new(now, WINDOW);

        assert_eq!(window.requests, 0);
        assert_eq!(window.reset_at, now + WINDOW);
    }

    #[test]
    fn test_window_limit() {
        let now = 1000000;
        let mut window = RateLimitWindow::new(now, WINDOW);

        for _ in 0..3 {
            assert!(window.check_and_increment(now, 3, WINDOW).is_ok());
        }

        assert!(matches!(
            window.check_and_increment(now + 10, 3, WINDOW),
            Err(AppError::RateLimitExceeded {
                retry_after_secs: 890
            })
        ));
    }

    #[test]
    fn test_window_reset() {
        let now = 1000000;
        let mut window = RateLimitWindow::new(now, WINDOW);

        for _ in 0..3 {
            assert!(window.check_and_increment(now, 3, WINDOW).is_ok());
        }

        let after_reset = now + WINDOW;
        assert!(window.check_and_increment(after_reset, 3, WINDOW).is_ok());
        assert_eq!(window.requests, 1);
        assert_eq!(window.reset_at, after_reset + WINDOW);
    }

    #[test]
    fn test_limiter_keys_are_independent() {
        let limiter = RateLimiter::new(2, 900);
        let now = 1000000;

        assert_eq!(limiter.check("10.0.0.1", now).unwrap(), 1);
        assert_eq!(limiter.check("10.0.0.1", now).unwrap(), 0);
        assert!(limiter.check("10.0.0.1", now).is_err());

        assert_eq!(limiter.check("10.0.0.2", now).unwrap(), 1);
    }

    #[test]
    fn test_limiter_admits_after_window() {
        let limiter = RateLimiter::new(1, 900);
        let now = 1000000;

        assert_eq!(limiter.check("client", now).unwrap(), 0);
        assert!(limiter.check("client", now + 899).is_err());
        assert_eq!(limiter.check("client", now + 900).unwrap(), 0);
    }

    #[test]
    fn test_limiter_counts_down_remaining() {
        let limiter = RateLimiter::new(3, 900);
        let now = 1000000;

        let remaining: Vec<u32> = (0..3)
            .map(|_| limiter.check("client", now).unwrap())
            .collect();
        assert_eq!(remaining, vec![2, 1, 0]);

        // A rejected request is not counted against a fresh window
        assert!(limiter.check("client", now).is_err());
        assert_eq!(limiter.check("client", now + 900).unwrap(), 2);
    }
}
