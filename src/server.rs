use crate::config::AppConfig;
use crate::observability::{extract_or_generate_request_id, insert_request_id_header};
use crate::store::TaskStore;
use crate::tasks;
use axum::extract::Request;
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::routing::{get, put};
use axum::{Router, response::IntoResponse};
use http::header::CONTENT_TYPE;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Instant;
use tower_http::services::{ServeDir, ServeFile};
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub store: TaskStore,
}

pub fn build_app(store: TaskStore, static_dir: &str) -> Router {
    let static_dir = PathBuf::from(static_dir);
    Router::new()
        .route("/healthz", get(healthz_handler))
        .route(
            "/api/tasks",
            get(tasks::list_tasks_handler).post(tasks::create_task_handler),
        )
        .route(
            "/api/tasks/{id}",
            put(tasks::update_task_handler).delete(tasks::delete_task_handler),
        )
        .route_service("/", ServeFile::new(static_dir.join("index.html")))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(middleware::from_fn(request_log_layer))
        .with_state(AppState { store })
}

pub async fn run_server(config: &AppConfig) -> Result<(), String> {
    let listen_addr: SocketAddr = config
        .listen
        .parse()
        .map_err(|err| format!("invalid listen address `{}`: {err}", config.listen))?;

    let store = TaskStore::open(&config.db_path)
        .await
        .map_err(|err| format!("failed to open database `{}`: {err}", config.db_path))?;

    let listener = tokio::net::TcpListener::bind(listen_addr)
        .await
        .map_err(|err| format!("failed to bind `{listen_addr}`: {err}"))?;

    info!(listen = %listen_addr, db_path = %config.db_path, "task service listening");

    let app = build_app(store, &config.static_dir);

    axum::serve(listener, app)
        .await
        .map_err(|err| format!("server error: {err}"))
}

async fn healthz_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        [(CONTENT_TYPE, "application/json")],
        r#"{"status":"ok"}"#,
    )
}

async fn request_log_layer(request: Request, next: Next) -> axum::response::Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let request_id = extract_or_generate_request_id(request.headers());
    let started = Instant::now();

    let mut response = next.run(request).await;
    insert_request_id_header(response.headers_mut(), &request_id);

    info!(
        %method,
        path = %path,
        status = response.status().as_u16(),
        latency_ms = started.elapsed().as_millis() as u64,
        request_id = %request_id,
        "request handled"
    );
    response
}
