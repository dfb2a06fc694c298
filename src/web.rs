use crate::{
    config::Config,
    errors::ApiError,
    video::{
        self,
        extractor::{ExtractError, MetadataExtractor, YtDlpExtractor},
        VideoMetadata,
    },
};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tokio::signal;
use tower_http::cors::CorsLayer;

struct SharedState {
    extractor: Box<dyn MetadataExtractor>,
}

async fn start_app(config: Config) {
    let shared_state = Arc::new(SharedState {
        extractor: Box::new(YtDlpExtractor::new(config.extractor.clone())),
    });

    async fn shutdown_signal() {
        let ctrl_c = async {
            signal::ctrl_c()
                .await
                .expect("failed to install Ctrl+C handler");
        };

        let terminate = async {
            signal::unix::signal(signal::unix::SignalKind::terminate())
                .expect("failed to install signal handler")
                .recv()
                .await;
        };

        tokio::select! {
            _ = ctrl_c => {},
            _ = terminate => {},
        }
    }

    let app = Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/video", get(video_get).post(video_post))
        .layer(CorsLayer::permissive())
        .layer(
            tower_http::trace::TraceLayer::new_for_http()
                .make_span_with(
                    tower_http::trace::DefaultMakeSpan::new().level(tracing::Level::INFO),
                )
                .on_response(
                    tower_http::trace::DefaultOnResponse::new().level(tracing::Level::INFO),
                ),
        )
        .with_state(shared_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    log::info!("listening on {addr}");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();
}

pub fn start_daemon(config: Config) {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(async { start_app(config).await });
}

// Make our own error that wraps `ApiError`.
#[derive(Debug)]
struct HttpError(ApiError);

// Tell axum how to convert `ApiError` into a response. Every failure uses
// the same envelope shape the success path does.
impl IntoResponse for HttpError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self.0 {
            ApiError::InvalidUrl(_) => StatusCode::BAD_REQUEST,
            ApiError::Extraction(ExtractError::Unavailable(_)) => StatusCode::NOT_FOUND,
            ApiError::Extraction(ExtractError::Upstream(_)) => {
                log::error!("{self:?}");
                StatusCode::BAD_GATEWAY
            }
            ApiError::IO(_) | ApiError::Other(_) => {
                log::error!("{self:?}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (
            status,
            Json(VideoEnvelope {
                success: false,
                data: None,
                error: Some(self.0.to_string()),
            }),
        )
            .into_response()
    }
}

// This enables using `?` on functions that return `Result<_, ApiError>` to
// turn them into `Result<_, HttpError>`. That way you don't need to do that
// manually.
impl<E> From<E> for HttpError
where
    E: Into<ApiError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VideoEnvelope {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<VideoMetadata>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VideoQuery {
    pub url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VideoRequest {
    pub url: String,
}

async fn root() -> Json<serde_json::Value> {
    Json(json!({
        "message": "YouTube Video Scraper API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "GET /video": "Get video data by URL query parameter",
            "POST /video": "Get video data by URL in request body",
            "GET /health": "Health check endpoint",
        }
    }))
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({"status": "healthy"}))
}

async fn video_get(
    State(state): State<Arc<SharedState>>,
    Query(query): Query<VideoQuery>,
) -> Result<Json<VideoEnvelope>, HttpError> {
    let url = query
        .url
        .ok_or_else(|| ApiError::InvalidUrl("missing url query parameter".to_string()))?;
    lookup(state, url).await
}

// The url may arrive in the query string, the body, or both; the query
// string wins.
async fn video_post(
    State(state): State<Arc<SharedState>>,
    Query(query): Query<VideoQuery>,
    Json(payload): Json<VideoRequest>,
) -> Result<Json<VideoEnvelope>, HttpError> {
    let url = query.url.unwrap_or(payload.url);
    lookup(state, url).await
}

async fn lookup(state: Arc<SharedState>, url: String) -> Result<Json<VideoEnvelope>, HttpError> {
    log::debug!("url: {url:?}");

    tokio::task::block_in_place(move || {
        let data = video::fetch_video(&url, state.extractor.as_ref())?;
        Ok(Json(VideoEnvelope {
            success: true,
            data: Some(data),
            error: None,
        }))
    })
}
