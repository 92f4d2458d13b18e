// src/bin/api_server.rs

use moodfood::app::ReviewService;
use moodfood::infra::kakao::{KakaoPlaceClient, PlaceSearch};
use moodfood::infra::{config, init_logging};
use moodfood::transport;
use moodfood::{KvStore, MemoryKvStore, PostgresKvStore};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    init_logging();

    // --- Store Initialization ---
    let store: Arc<dyn KvStore> = match config::database_url() {
        Some(url) => {
            info!("Connecting KV store to Postgres...");
            Arc::new(PostgresKvStore::connect(&url).await?)
        }
        None => {
            warn!("DATABASE_URL not set, reviews are kept in memory and lost on restart");
            Arc::new(MemoryKvStore::new())
        }
    };

    // --- Place Search Initialization ---
    let places: Option<Arc<dyn PlaceSearch>> = match KakaoPlaceClient::from_env()? {
        Some(client) => Some(Arc::new(client)),
        None => {
            warn!("KAKAO_REST_API_KEY not set, restaurant search endpoints are disabled");
            None
        }
    };

    let app_state = transport::http::AppState {
        reviews: ReviewService::new(store),
        places,
    };

    // --- API Server Initialization ---
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    let app = transport::http::create_router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", transport::http::ApiDoc::openapi()))
        .layer(cors);

    let address = config::listen_addr();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!("API server listening on http://{}", address);
    info!("Swagger UI available at http://{}/swagger-ui", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received (Ctrl+C)");
        })
        .await?;

    Ok(())
}
