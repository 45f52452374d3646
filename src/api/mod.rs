//! API handlers for Bookshelf REST endpoints

pub mod books;
pub mod health;
pub mod openapi;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderValue, Method},
    routing::get,
    routing::post,
    Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::{error::AppError, AppState};

/// Session request counter, already incremented for this request.
///
/// `jar` holds the re-issued session cookie and must be part of the
/// response for the next request to see the new value.
pub struct RequestCounter {
    pub value: i64,
    pub jar: CookieJar,
}

#[async_trait]
impl FromRequestParts<AppState> for RequestCounter {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let session = &state.services.session;
        let jar = CookieJar::from_headers(&parts.headers);

        let (value, token) = session.increment(jar.get(session.cookie_name()).map(|c| c.value()))?;

        let cookie = Cookie::build((session.cookie_name().to_string(), token))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .max_age(time::Duration::seconds(session.max_age_seconds()))
            .build();

        Ok(RequestCounter {
            value,
            jar: jar.add(cookie),
        })
    }
}

/// CORS for the configured origins. Credentials are allowed so browsers
/// send the session cookie, which rules out a wildcard origin.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.server.cors_allowed_origins);

    let api_v1 = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Books
        .route("/books", get(books::list_books).post(books::create_book))
        .route("/books/:id", get(books::get_book))
        .route("/books/:id/check-in", post(books::check_in).put(books::check_in))
        .route("/books/:id/check-out", post(books::check_out).put(books::check_out))
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
