use axum::{Router, extract::DefaultBodyLimit, middleware};
use tower_http::{catch_panic::CatchPanicLayer, compression::CompressionLayer};

use crate::logging::logging_middleware;
use crate::middleware::error_handler::{
    ErrorHandlerConfig, capture_path_params, error_handler, handle_panic, not_found,
};
use crate::middleware::rate_limit::rate_limit;
use crate::middleware::security::{cors_layer, with_security_headers};
use crate::modules::auth::router::init_auth_router;
use crate::modules::system::router::{init_health_router, init_index_router};
use crate::modules::users::router::init_users_router;
use crate::state::AppState;

/// Full application: `/health`, the rate-limited `/api` tree and the
/// request pipeline around them. Unknown paths and unsupported methods on
/// known paths both answer with the 404 envelope.
///
/// Layers are listed innermost first. A request passes, in order, through
/// panic recovery, security headers, CORS, compression, request logging,
/// the error handler and the body limit before reaching a route.
pub fn init_router(state: AppState) -> Router {
    let config = state.config.clone();

    let api = Router::new()
        .merge(init_index_router())
        .nest("/auth", init_auth_router())
        .nest(
            "/users",
            init_users_router().route_layer(middleware::from_fn(capture_path_params)),
        )
        .fallback(not_found)
        .method_not_allowed_fallback(not_found)
        .layer(middleware::from_fn_with_state(
            state.rate_limiter.clone(),
            rate_limit,
        ));

    let app = Router::new()
        .merge(init_health_router())
        .nest("/api", api)
        .fallback(not_found)
        .method_not_allowed_fallback(not_found)
        .with_state(state)
        .layer(DefaultBodyLimit::max(config.body_limit))
        .layer(middleware::from_fn_with_state(
            ErrorHandlerConfig {
                environment: config.environment,
                body_limit: config.body_limit,
            },
            error_handler,
        ))
        .layer(middleware::from_fn_with_state(
            config.environment,
            logging_middleware,
        ))
        .layer(CompressionLayer::new())
        .layer(cors_layer(&config));

    with_security_headers(app).layer(CatchPanicLayer::custom(handle_panic))
}
