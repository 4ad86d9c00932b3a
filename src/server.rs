use std::net::SocketAddr;

use anyhow::Result;
use askama::Template;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Json};
use axum::routing::{get, post};
use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::compose::AnswerService;
use crate::config::AppConfig;
use crate::models::{AskRequest, ExamplesResponse, RenderRequest, RenderedAnswer};
use crate::render::IndexTemplate;

#[derive(Clone)]
struct AppState {
    config: AppConfig,
    service: AnswerService,
}

pub async fn run_server(config: AppConfig, service: AnswerService) -> Result<()> {
    let addr: SocketAddr = config.bind_addr.parse()?;
    let static_dir = config.static_dir.clone();
    let state = AppState { config, service };

    let app = Router::new()
        .route("/", get(index_page))
        .route("/api/ask", post(ask_handler))
        .route("/api/render", post(render_handler))
        .route("/api/examples", get(get_examples))
        .route("/healthz", get(healthz))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    tracing::info!("listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn index_page(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let conversation_id = Uuid::new_v4().to_string();

    let template = IndexTemplate {
        app_title: state.config.ui.app_title.clone(),
        app_subtitle: state.config.ui.app_subtitle.clone(),
        conversation_id,
        example_questions: state.config.ui.example_questions.clone(),
    };
    let body = template.render().map_err(ApiError::from)?;

    Ok(Html(body))
}

async fn ask_handler(
    State(state): State<AppState>,
    Json(request): Json<AskRequest>,
) -> Result<Json<RenderedAnswer>, ApiError> {
    if request.question.trim().is_empty() {
        return Err(ApiError::bad_request("question must not be empty".to_string()));
    }

    let answer = state.service.ask(request).await?;
    Ok(Json(answer))
}

async fn render_handler(
    State(state): State<AppState>,
    Json(request): Json<RenderRequest>,
) -> Result<Json<RenderedAnswer>, ApiError> {
    let answer = state.service.render(request)?;
    Ok(Json(answer))
}

async fn get_examples(State(state): State<AppState>) -> Json<ExamplesResponse> {
    Json(ExamplesResponse {
        examples: state.config.ui.example_questions.clone(),
    })
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: String) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message,
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(value: anyhow::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: value.to_string(),
        }
    }
}

impl From<askama::Error> for ApiError {
    fn from(value: askama::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: value.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let body = serde_json::json!({ "error": self.message });
        (self.status, Json(body)).into_response()
    }
}
