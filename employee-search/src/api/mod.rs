//! API routes

pub mod health;
pub mod search;

use axum::Router;
use axum::middleware;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use http::{HeaderName, HeaderValue, Method};
use shared::error::{AppError, ErrorCode};
use std::any::Any;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, Any as CorsAny, CorsLayer};
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use uuid::Uuid;

use crate::config::CorsOrigins;
use crate::middleware::{logging_middleware, search_rate_limit};
use crate::state::AppState;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

fn cors_layer(origins: &CorsOrigins) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(CorsAny);
    match origins {
        CorsOrigins::Any => layer.allow_origin(CorsAny),
        CorsOrigins::List(list) => layer.allow_origin(AllowOrigin::list(list.iter().cloned())),
    }
}

/// Panics inside a handler end that request only
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "non-string panic payload"
    };
    tracing::error!(panic = %detail, "Request handler panicked");
    AppError::new(ErrorCode::InternalError).into_response()
}

async fn fallback() -> AppError {
    AppError::not_found()
}

/// Create the application router with all middleware
pub fn create_router(state: AppState, cors: &CorsOrigins) -> Router {
    // Rate limited
    let search = Router::new()
        .route("/search-employees", get(search::search_employees))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            search_rate_limit,
        ));

    Router::new()
        .route("/health", get(health::health_check))
        .merge(search)
        .fallback(fallback)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(middleware::from_fn(logging_middleware))
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            REQUEST_ID_HEADER,
        )))
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static(REQUEST_ID_HEADER),
            XRequestId,
        ))
        .layer(cors_layer(cors))
        .with_state(state)
}
