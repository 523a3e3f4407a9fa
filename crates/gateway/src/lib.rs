//! Folio API Gateway
//!
//! The HTTP surface of the archive: a static routing table dispatching
//! URL paths to handlers. The table itself carries no business logic —
//! handlers delegate to the repository, the cart store, the print client,
//! and the session layer. Unmatched paths fall through to a 404.

pub mod handlers;
pub mod middleware;

use axum::{
    extract::{FromRef, Request},
    middleware::{from_fn, Next},
    routing::{delete, get, post},
    Router,
};
use folio_common::{
    auth::SessionManager,
    cache::CartStore,
    config::AppConfig,
    db::{DbPool, Repository},
    printing::PrintBackend,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

/// Application state shared across handlers
#[derive(Clone, FromRef)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub db: DbPool,
    pub repo: Repository,
    pub carts: Arc<CartStore>,
    pub printer: Arc<dyn PrintBackend>,
    pub sessions: Arc<SessionManager>,
}

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Request ID propagation
    let request_id = SetRequestIdLayer::x_request_id(MakeRequestUuid);
    let propagate_id = PropagateRequestIdLayer::x_request_id();

    // The /data routing table; first match wins, handlers are external
    // collaborators as far as the table is concerned
    let data_routes = Router::new()
        // Lectures
        .route(
            "/lectures",
            get(handlers::lectures::list_lectures).post(handlers::lectures::create_lecture),
        )
        .route("/lectures/{id}", delete(handlers::lectures::delete_lecture))
        .route(
            "/lectures/{id}/documents",
            get(handlers::lectures::documents_of_lecture),
        )
        // Examinants
        .route(
            "/examinants",
            get(handlers::examinants::list_examinants).post(handlers::examinants::create_examinant),
        )
        .route("/examinants/{id}", delete(handlers::examinants::delete_examinant))
        .route(
            "/examinants/{id}/documents",
            get(handlers::examinants::documents_of_examinant),
        )
        // Documents
        .route("/documents", post(handlers::documents::submit_document))
        .route(
            "/documents/{id}",
            get(handlers::documents::get_document).delete(handlers::documents::delete_document),
        )
        .route(
            "/documents/{id}/validate",
            post(handlers::documents::validate_document),
        )
        // Folders
        .route(
            "/folders",
            get(handlers::folders::list_folders).post(handlers::folders::create_folder),
        )
        .route(
            "/folders/{id}",
            get(handlers::folders::get_folder).delete(handlers::folders::delete_folder),
        )
        // Carts
        .route(
            "/carts",
            get(handlers::carts::list_carts).post(handlers::carts::create_cart),
        )
        .route(
            "/carts/{id}",
            get(handlers::carts::get_cart)
                .put(handlers::carts::update_cart)
                .delete(handlers::carts::delete_cart),
        )
        // Session management
        .route("/login", post(handlers::auth::login))
        .route("/logout", post(handlers::auth::logout))
        .route("/user", get(handlers::auth::user))
        // Printing
        .route("/print", post(handlers::print::print_job))
        .route(
            "/log_erroneous_copies",
            post(handlers::print::log_erroneous_copies),
        )
        // Deposits
        .route(
            "/deposits",
            get(handlers::deposits::list_deposits).post(handlers::deposits::create_deposit),
        )
        .route(
            "/deposits/{id}",
            get(handlers::deposits::get_deposit).delete(handlers::deposits::settle_deposit),
        );

    let data_routes = if state.config.rate_limit.enabled {
        let limiter = middleware::rate_limit::create_rate_limiter(
            state.config.rate_limit.requests_per_second,
            state.config.rate_limit.burst,
        );
        data_routes.layer(from_fn(move |request: Request, next: Next| {
            let limiter = limiter.clone();
            async move {
                middleware::rate_limit::rate_limit_middleware(request, next, limiter).await
            }
        }))
    } else {
        data_routes
    };

    // Compose the app
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/ready", get(handlers::health::ready))
        .route("/admin", get(handlers::admin::overview))
        .nest("/data", data_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(request_id)
        .layer(propagate_id)
        .with_state(state)
}
