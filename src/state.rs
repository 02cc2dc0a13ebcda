use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use governor::{DefaultDirectRateLimiter, RateLimiter};
use scaffold_config::AppConfig;

use crate::modules::auth::session::{SessionIssuer, StaticSessionIssuer};
use crate::modules::users::repository::{InMemoryUserRepository, UserRepository};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub users: Arc<dyn UserRepository>,
    pub sessions: Arc<dyn SessionIssuer>,
    pub rate_limiter: Arc<DefaultDirectRateLimiter>,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        users: Arc<dyn UserRepository>,
        sessions: Arc<dyn SessionIssuer>,
    ) -> Self {
        let rate_limiter = Arc::new(RateLimiter::direct(config.rate_limit.quota()));
        Self {
            config: Arc::new(config),
            users,
            sessions,
            rate_limiter,
            started_at: Instant::now(),
        }
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("started_at", &self.started_at)
            .finish_non_exhaustive()
    }
}

/// State wired with the seeded in-memory repository and the stub session issuer.
pub fn init_app_state(config: AppConfig) -> AppState {
    AppState::new(
        config,
        Arc::new(InMemoryUserRepository::seeded()),
        Arc::new(StaticSessionIssuer::default()),
    )
}
