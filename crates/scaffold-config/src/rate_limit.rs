//! Rate limiting configuration for `/api` endpoints.
//!
//! One limiter is shared by the whole process: every request under `/api`
//! draws from the same budget regardless of who sent it.
//!
//! # Configuration
//!
//! - `RATE_LIMIT_MAX`: Requests allowed per window (default: 100)
//! - `RATE_LIMIT_WINDOW_SECS`: Window length in seconds (default: 900)
//!
//! # Rate Limiting Strategy
//!
//! The limiter is `governor`'s GCRA, an equivalent of a token bucket:
//!
//! - The bucket holds up to `max_requests` tokens and starts full
//! - One token is replenished every `window / max_requests`
//! - Each request consumes one token
//! - Requests are rejected when no tokens are available

use std::num::NonZeroU32;
use std::time::Duration;

use governor::Quota;

pub const DEFAULT_MAX_REQUESTS: u32 = 100;
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(15 * 60);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub max_requests: u32,
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: DEFAULT_MAX_REQUESTS,
            window: DEFAULT_WINDOW,
        }
    }
}

impl RateLimitConfig {
    /// Reads the limit through `lookup`, falling back to defaults for
    /// values that are missing, unparsable or zero.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            max_requests: lookup("RATE_LIMIT_MAX")
                .and_then(|v| v.parse().ok())
                .filter(|v| *v > 0)
                .unwrap_or(DEFAULT_MAX_REQUESTS),
            window: lookup("RATE_LIMIT_WINDOW_SECS")
                .and_then(|v| v.parse().ok())
                .filter(|v| *v > 0)
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_WINDOW),
        }
    }

    /// Builds the `governor` quota for this configuration.
    ///
    /// The burst equals `max_requests`, so a fresh limiter admits exactly
    /// that many requests before it starts rejecting.
    #[must_use]
    pub fn quota(&self) -> Quota {
        let burst = NonZeroU32::new(self.max_requests).unwrap_or(NonZeroU32::MIN);
        let replenish_every = self.window / burst.get();

        Quota::with_period(replenish_every)
            .unwrap_or_else(|| Quota::per_second(burst))
            .allow_burst(burst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RateLimitConfig::from_lookup(|_| None);
        assert_eq!(config.max_requests, 100);
        assert_eq!(config.window, Duration::from_secs(900));
    }

    #[test]
    fn test_reads_env_values() {
        let config = RateLimitConfig::from_lookup(|key| match key {
            "RATE_LIMIT_MAX" => Some("5".to_string()),
            "RATE_LIMIT_WINDOW_SECS" => Some("60".to_string()),
            _ => None,
        });
        assert_eq!(config.max_requests, 5);
        assert_eq!(config.window, Duration::from_secs(60));
    }

    #[test]
    fn test_zero_values_fall_back() {
        let config = RateLimitConfig::from_lookup(|key| match key {
            "RATE_LIMIT_MAX" => Some("0".to_string()),
            "RATE_LIMIT_WINDOW_SECS" => Some("0".to_string()),
            _ => None,
        });
        assert_eq!(config, RateLimitConfig::default());
    }

    #[test]
    fn test_quota_spreads_window_over_requests() {
        let quota = RateLimitConfig::default().quota();
        assert_eq!(quota.burst_size().get(), 100);
        assert_eq!(quota.replenish_interval(), Duration::from_secs(9));
    }

    #[test]
    fn test_quota_with_tiny_window_still_builds() {
        let config = RateLimitConfig {
            max_requests: 10,
            window: Duration::ZERO,
        };
        let quota = config.quota();
        assert_eq!(quota.burst_size().get(), 10);
    }
}
