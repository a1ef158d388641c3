use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    middleware::{from_fn, from_fn_with_state},
    routing::{delete, get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::config::{AppConfig, SecurityConfig};
use crate::error::ApiError;
use crate::handlers::{elevated, protected, public};
use crate::middleware::{jwt_auth_middleware, require_admin_middleware};
use crate::state::AppState;

/// Build the full router: public, protected and elevated tiers plus global layers
pub fn app(state: AppState, config: &AppConfig) -> Router {
    let mut router = Router::new()
        .merge(public_routes())
        .merge(protected_routes(&state))
        .merge(elevated_routes(&state))
        .fallback(fallback)
        .with_state(state);

    if config.security.enable_cors {
        router = router.layer(cors_layer(&config.security));
    }

    let trace_level = if config.api.enable_request_logging {
        Level::INFO
    } else {
        Level::DEBUG
    };

    router.layer(
        ServiceBuilder::new()
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(DefaultMakeSpan::new().level(trace_level))
                    .on_response(DefaultOnResponse::new().level(trace_level)),
            )
            .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes)),
    )
}

fn public_routes() -> Router<AppState> {
    use public::{auth, courts, reviews, status};

    Router::new()
        .route("/", get(status::root_get))
        .route("/health", get(status::health_get))
        // Token acquisition
        .route("/users", post(auth::register_post))
        .route("/users/login", post(auth::login_post))
        // Anonymous reads
        .route("/courts", get(courts::court_list))
        .route("/courts/:id", get(courts::court_get))
        .route("/courts/:id/reviews", get(reviews::review_list))
}

fn protected_routes(state: &AppState) -> Router<AppState> {
    use protected::{courts, me, reviews};

    Router::new()
        .route("/courts", post(courts::court_post))
        .route("/courts/:id", put(courts::court_put).delete(courts::court_delete))
        .route("/courts/:id/reviews", post(reviews::review_post))
        .route("/reviews/:id", put(reviews::review_put).delete(reviews::review_delete))
        .route("/users/me", get(me::me_get).put(me::me_put))
        .route("/users/me/courts", get(me::my_courts_get))
        .route("/users/me/reviews", get(me::my_reviews_get))
        .route_layer(from_fn_with_state(state.clone(), jwt_auth_middleware))
}

fn elevated_routes(state: &AppState) -> Router<AppState> {
    use elevated::users;

    // Layers run outermost-last: token check first, then the role check
    Router::new()
        .route("/admin/users", get(users::user_list))
        .route("/admin/users/:id", delete(users::user_delete))
        .route_layer(from_fn(require_admin_middleware))
        .route_layer(from_fn_with_state(state.clone(), jwt_auth_middleware))
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    let origins = if security.cors_origins.iter().any(|o| o == "*") {
        AllowOrigin::from(Any)
    } else {
        let parsed: Vec<HeaderValue> = security
            .cors_origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!("Ignoring invalid CORS origin {:?}", origin);
                    None
                }
            })
            .collect();
        AllowOrigin::list(parsed)
    };

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}

async fn fallback() -> ApiError {
    ApiError::not_found("Route not found")
}
