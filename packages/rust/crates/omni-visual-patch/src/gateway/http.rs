//! HTTP gateway: POST /tools/{tool} → edit instruction → JSON outcome.
//!
//! The executor is synchronous (file I/O plus a rayon scan), so each call runs
//! on the blocking pool under a per-request timeout. A request that times out
//! cancels its pending write, so a 504 never hides a modified file. CORS headers are added to
//! every response and `OPTIONS` preflights short-circuit with 200.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, Request, State},
    http::{HeaderValue, Method, StatusCode, header},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Serialize;
use serde_json::{Value, json};
use tokio::net::TcpListener;

use omni_edit::WriteGate;
use omni_types::{EditInstruction, EditOutcome};

use crate::executor::EditExecutor;
use crate::tools::{EDIT_INSTRUCTION_TOOL, ToolsResponse, tool_registry};

const ALLOWED_HEADERS: &str = "Origin, X-Requested-With, Content-Type, Accept";

/// Shared state for the HTTP server: executor + per-request timeout.
#[derive(Clone)]
pub struct GatewayState {
    pub executor: Arc<EditExecutor>,
    pub request_timeout_secs: u64,
}

/// Response body for the health endpoint.
#[derive(Debug, Serialize)]
pub struct GatewayHealthResponse {
    pub status: &'static str,
    pub project_root: String,
    pub request_timeout_secs: u64,
}

async fn handle_tools() -> Json<ToolsResponse> {
    Json(ToolsResponse {
        tools: tool_registry(),
    })
}

async fn handle_tool(
    State(state): State<GatewayState>,
    Path(tool): Path<String>,
    body: Bytes,
) -> Result<Json<EditOutcome>, (StatusCode, Json<Value>)> {
    if tool != EDIT_INSTRUCTION_TOOL {
        tracing::info!(tool = %tool, "tool not found");
        return Err((
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Tool not found" })),
        ));
    }
    let instruction: EditInstruction = serde_json::from_slice(&body).map_err(|e| {
        tracing::info!(tool = %tool, error = %e, "invalid instruction body");
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": format!("Invalid instruction: {e}") })),
        )
    })?;
    tracing::info!(
        tool = %tool,
        prop = %instruction.prop,
        old_value = %instruction.old_value,
        new_value = %instruction.new_value,
        "request received"
    );

    let timeout_secs = state.request_timeout_secs;
    let executor = Arc::clone(&state.executor);
    let gate = WriteGate::new();
    let task_gate = gate.clone();
    let mut task =
        tokio::task::spawn_blocking(move || executor.execute_gated(&instruction, task_gate));

    let waited = tokio::time::timeout(Duration::from_secs(timeout_secs), &mut task).await;
    let joined = match waited {
        Ok(joined) => joined,
        Err(_) if gate.cancel() => {
            tracing::warn!(tool = %tool, timeout_secs, "request timed out; write cancelled");
            return Err((
                StatusCode::GATEWAY_TIMEOUT,
                Json(json!({ "error": format!("edit timed out after {timeout_secs}s") })),
            ));
        }
        Err(_) => {
            // The write was committed before the deadline hit; report it.
            tracing::info!(tool = %tool, timeout_secs, "deadline passed mid-write; awaiting result");
            task.await
        }
    };

    match joined {
        Ok(outcome) => {
            tracing::info!(
                tool = %tool,
                status = %outcome.status,
                file = outcome.file.as_deref().unwrap_or("-"),
                "request finished"
            );
            Ok(Json(outcome))
        }
        Err(e) => {
            tracing::error!(tool = %tool, error = %e, "executor task failed");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            ))
        }
    }
}

async fn handle_health(State(state): State<GatewayState>) -> Json<GatewayHealthResponse> {
    Json(GatewayHealthResponse {
        status: "healthy",
        project_root: state.executor.config().project_root.display().to_string(),
        request_timeout_secs: state.request_timeout_secs,
    })
}

async fn cors(request: Request, next: Next) -> Response {
    let mut response = if request.method() == Method::OPTIONS {
        StatusCode::OK.into_response()
    } else {
        next.run(request).await
    };
    let headers = response.headers_mut();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOWED_HEADERS),
    );
    response
}

/// Build the gateway router (GET /tools, POST /tools/{tool}, GET /health).
pub fn router(executor: EditExecutor, request_timeout_secs: u64) -> Router {
    let state = GatewayState {
        executor: Arc::new(executor),
        request_timeout_secs,
    };
    Router::new()
        .route("/health", get(handle_health))
        .route("/tools", get(handle_tools))
        .route("/tools/{tool}", post(handle_tool))
        .with_state(state)
        .layer(middleware::from_fn(cors))
}

/// Run the HTTP server; binds to `bind_addr` (e.g. `127.0.0.1:3333`).
/// Graceful shutdown on Ctrl+C (SIGINT) and SIGTERM (Unix).
pub async fn run_http(
    executor: EditExecutor,
    bind_addr: &str,
    request_timeout_secs: u64,
) -> Result<()> {
    let project_root = executor.config().project_root.display().to_string();
    let app = router(executor, request_timeout_secs);
    let listener = TcpListener::bind(bind_addr).await?;
    tracing::info!(
        "visual-patch listening on http://{} (root={}, request_timeout={}s, Ctrl+C/SIGTERM to stop)",
        bind_addr,
        project_root,
        request_timeout_secs
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("visual-patch stopped");
    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};
        let ctrl_c = tokio::signal::ctrl_c();
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => {}
                    _ = sigterm.recv() => {}
                }
            }
            Err(error) => {
                tracing::warn!(error = %error, "failed to listen for SIGTERM; Ctrl+C only");
                let _ = ctrl_c.await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
