use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::{
    path::PathBuf,
    sync::atomic::{AtomicU64, Ordering as AtomicOrdering},
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};
use tokio::time::Instant;
use tower_http::services::{ServeDir, ServeFile};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_STATIC_DIR: &str = "dist";
const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;
const PORT_BOUNDS: (u16, u16) = (1, u16::MAX);
const REQUEST_ID_HEADER: &str = "x-request-id";

static REQUEST_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum LogLevel {
    Debug,
    Info,
    Warn,
}

impl LogLevel {
    fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
        }
    }

    fn for_status(status: StatusCode) -> Self {
        if status.is_server_error() {
            Self::Warn
        } else {
            Self::Info
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
struct ServerConfig {
    port: u16,
    static_dir: PathBuf,
    log_level: LogLevel,
}

impl ServerConfig {
    fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = lookup("PORT")
            .and_then(|value| value.trim().parse::<u16>().ok())
            .filter(|value| (PORT_BOUNDS.0..=PORT_BOUNDS.1).contains(value))
            .unwrap_or(DEFAULT_PORT);
        let static_dir = non_empty(lookup("STATIC_DIR"))
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR));
        let log_level = parse_log_level(lookup("LOG_LEVEL"), DEFAULT_LOG_LEVEL);

        Self {
            port,
            static_dir,
            log_level,
        }
    }

    fn index_file(&self) -> PathBuf {
        self.static_dir.join("index.html")
    }
}

#[derive(Clone)]
struct AppState {
    config: Arc<ServerConfig>,
}

#[derive(Serialize)]
struct HealthPayload {
    ok: bool,
}

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env();
    let bind_address = format!("0.0.0.0:{}", config.port);
    let state = AppState {
        config: Arc::new(config),
    };

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    log_event(
        &state.config,
        LogLevel::Info,
        "server_listening",
        serde_json::json!({
            "address": bind_address,
            "static_dir": state.config.static_dir.display().to_string(),
        }),
    );
    axum::serve(listener, app(state)).await?;
    Ok(())
}

fn app(state: AppState) -> Router {
    let static_service = ServeDir::new(&state.config.static_dir)
        .not_found_service(ServeFile::new(state.config.index_file()));

    Router::new()
        .route("/healthz", get(healthz))
        .fallback_service(static_service)
        .layer(middleware::from_fn_with_state(state.clone(), log_requests))
        .with_state(state)
}

async fn healthz() -> impl IntoResponse {
    (
        [(header::CACHE_CONTROL, HeaderValue::from_static("no-store"))],
        Json(HealthPayload { ok: true }),
    )
}

async fn log_requests(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let request_started_at = Instant::now();
    let request_id = resolve_request_id(request.headers());
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    log_event(
        &state.config,
        LogLevel::Debug,
        "request_start",
        serde_json::json!({
            "request_id": request_id.as_str(),
            "method": method.as_str(),
            "path": path.as_str(),
        }),
    );

    let mut response = next.run(request).await;
    let status = response.status();

    log_event(
        &state.config,
        LogLevel::for_status(status),
        "request_complete",
        serde_json::json!({
            "request_id": request_id.as_str(),
            "method": method.as_str(),
            "path": path,
            "status": status.as_u16(),
            "duration_ms": request_started_at.elapsed().as_millis(),
        }),
    );

    if let Ok(request_id_header) = HeaderValue::from_str(&request_id) {
        response
            .headers_mut()
            .insert(REQUEST_ID_HEADER, request_id_header);
    }
    response
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_log_level(value: Option<String>, default: LogLevel) -> LogLevel {
    match non_empty(value)
        .unwrap_or_else(|| default.as_str().to_string())
        .to_ascii_lowercase()
        .as_str()
    {
        "debug" => LogLevel::Debug,
        "info" => LogLevel::Info,
        "warn" => LogLevel::Warn,
        _ => default,
    }
}

fn now_unix_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|value| value.as_millis())
        .unwrap_or(0)
}

fn now_unix_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|value| value.as_secs())
        .unwrap_or(0)
}

fn generate_request_id() -> String {
    let counter = REQUEST_ID_COUNTER.fetch_add(1, AtomicOrdering::Relaxed);
    format!("req-{}-{counter}", now_unix_millis())
}

fn resolve_request_id(headers: &HeaderMap) -> String {
    let value = headers
        .get(REQUEST_ID_HEADER)
        .and_then(|raw| raw.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(ToString::to_string);

    value.unwrap_or_else(generate_request_id)
}

fn log_line(
    config: &ServerConfig,
    level: LogLevel,
    event: &str,
    fields: serde_json::Value,
) -> Option<String> {
    if level < config.log_level {
        return None;
    }

    let mut line = serde_json::json!({
        "ts": now_unix_seconds(),
        "level": level.as_str(),
        "event": event,
    });
    if let (Some(line), serde_json::Value::Object(extra)) = (line.as_object_mut(), fields) {
        line.extend(extra);
    }

    Some(line.to_string())
}

fn log_event(config: &ServerConfig, level: LogLevel, event: &str, fields: serde_json::Value) {
    if let Some(line) = log_line(config, level, event, fields) {
        println!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    fn config_from(pairs: &[(&str, &str)]) -> ServerConfig {
        let values: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        ServerConfig::from_lookup(|name| values.get(name).cloned())
    }

    #[test]
    fn config_defaults_when_unset() {
        let config = config_from(&[]);
        assert_eq!(config.port, 8080);
        assert_eq!(config.static_dir, PathBuf::from("dist"));
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.index_file(), PathBuf::from("dist/index.html"));
    }

    #[test]
    fn config_rejects_out_of_range_port() {
        assert_eq!(config_from(&[("PORT", "0")]).port, 8080);
        assert_eq!(config_from(&[("PORT", "70000")]).port, 8080);
        assert_eq!(config_from(&[("PORT", " 3000 ")]).port, 3000);
    }

    #[test]
    fn config_reads_dir_and_level() {
        let config = config_from(&[("STATIC_DIR", "public"), ("LOG_LEVEL", "DEBUG")]);
        assert_eq!(config.static_dir, PathBuf::from("public"));
        assert_eq!(config.log_level, LogLevel::Debug);

        let blank = config_from(&[("STATIC_DIR", "  "), ("LOG_LEVEL", "verbose")]);
        assert_eq!(blank.static_dir, PathBuf::from("dist"));
        assert_eq!(blank.log_level, LogLevel::Info);
    }

    #[test]
    fn log_lines_below_threshold_are_dropped() {
        let config = config_from(&[]);
        assert!(log_line(&config, LogLevel::Debug, "noise", serde_json::json!({})).is_none());

        let line = log_line(
            &config,
            LogLevel::Warn,
            "request_complete",
            serde_json::json!({"status": 503}),
        )
        .expect("warn passes info threshold");
        let parsed: serde_json::Value = serde_json::from_str(&line).expect("valid JSON line");
        assert_eq!(parsed["level"], "warn");
        assert_eq!(parsed["event"], "request_complete");
        assert_eq!(parsed["status"], 503);
    }

    #[test]
    fn request_id_prefers_incoming_header() {
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_static(" abc-123 "));
        assert_eq!(resolve_request_id(&headers), "abc-123");

        let generated = resolve_request_id(&HeaderMap::new());
        assert!(generated.starts_with("req-"));
    }

    #[test]
    fn server_errors_log_as_warn() {
        assert_eq!(LogLevel::for_status(StatusCode::OK), LogLevel::Info);
        assert_eq!(LogLevel::for_status(StatusCode::NOT_FOUND), LogLevel::Info);
        assert_eq!(LogLevel::for_status(StatusCode::BAD_GATEWAY), LogLevel::Warn);
    }

    #[tokio::test]
    async fn healthz_reports_ok() {
        let response = healthz().await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CACHE_CONTROL),
            Some(&HeaderValue::from_static("no-store"))
        );

        let body = axum::body::to_bytes(response.into_body(), 1024)
            .await
            .expect("health body");
        assert_eq!(&body[..], br#"{"ok":true}"#);
    }

    #[tokio::test]
    async fn router_serves_health_over_tcp() {
        let state = AppState {
            config: Arc::new(config_from(&[("STATIC_DIR", "/nonexistent-static-dir")])),
        };
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind ephemeral port");
        let address = listener.local_addr().expect("local address");
        tokio::spawn(async move {
            let _ = axum::serve(listener, app(state)).await;
        });

        let mut stream = tokio::net::TcpStream::connect(address)
            .await
            .expect("connect");
        stream
            .write_all(
                b"GET /healthz HTTP/1.1\r\nHost: localhost\r\nx-request-id: trace-1\r\nConnection: close\r\n\r\n",
            )
            .await
            .expect("write request");
        let mut raw = String::new();
        stream.read_to_string(&mut raw).await.expect("read response");

        assert!(raw.starts_with("HTTP/1.1 200"), "{raw}");
        assert!(raw.to_ascii_lowercase().contains("x-request-id: trace-1"));
        assert!(raw.ends_with(r#"{"ok":true}"#));
    }
}
