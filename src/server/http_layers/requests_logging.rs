//! Request logging middleware

use super::super::config::ServerConfig;
use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::{header, HeaderMap, Request, Response, StatusCode};
use axum::middleware::Next;
use axum::response::IntoResponse;
use std::time::Instant;
use tracing::{error, info};

#[derive(PartialEq, PartialOrd, Clone, Debug, Default, clap::ValueEnum)]
pub enum RequestsLoggingLevel {
    None,
    #[default]
    Path,
    Headers,
    Body,
}

impl std::fmt::Display for RequestsLoggingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

const MAX_LOGGABLE_BODY_LENGTH: usize = 1024;

/// Why a body is not printed.
#[derive(Debug, PartialEq, Eq)]
enum SkipReason {
    NoLength,
    BadLength,
    /// Multipart form bodies carry image bytes.
    Multipart(usize),
    TooBig(usize),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::NoLength => write!(f, "Content-length not set."),
            SkipReason::BadLength => write!(f, "Could not parse Content-length."),
            SkipReason::Multipart(size) => {
                write!(f, "Multipart form ({:#})", byte_unit::Byte::from(*size))
            }
            SkipReason::TooBig(size) => {
                write!(f, "Too big to log ({:#})", byte_unit::Byte::from(*size))
            }
        }
    }
}

/// Returns the body size when it is small enough to print.
fn loggable_length(headers: &HeaderMap) -> Result<usize, SkipReason> {
    let size = headers
        .get(header::CONTENT_LENGTH)
        .ok_or(SkipReason::NoLength)?
        .to_str()
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .ok_or(SkipReason::BadLength)?;

    let is_multipart = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("multipart/"));
    if is_multipart {
        return Err(SkipReason::Multipart(size));
    }
    if size >= MAX_LOGGABLE_BODY_LENGTH {
        return Err(SkipReason::TooBig(size));
    }
    Ok(size)
}

fn log_headers(label: &str, headers: &HeaderMap) {
    info!("  {} Headers:", label);
    for (name, value) in headers.iter() {
        info!("    {:?}: {:?}", name, value);
    }
}

/// Buffers and prints a small body, handing back an equivalent one.
/// None if the body could not be read.
async fn log_body(label: &str, headers: &HeaderMap, body: Body) -> Option<Body> {
    let size = match loggable_length(headers) {
        Ok(size) => size,
        Err(reason) => {
            info!("  {} Body: {}", label, reason);
            return Some(body);
        }
    };

    let bytes: Bytes = match axum::body::to_bytes(body, size).await {
        Ok(bytes) => bytes,
        Err(err) => {
            error!("Failed to read {} body: {:?}", label.to_lowercase(), err);
            return None;
        }
    };
    info!("  {} Body:\n{}", label, String::from_utf8_lossy(&bytes));
    Some(Body::from(bytes))
}

pub async fn log_requests(
    State(config): State<ServerConfig>,
    request: Request<Body>,
    next: Next,
) -> impl IntoResponse {
    let level = config.requests_logging_level;
    if level == RequestsLoggingLevel::None {
        return next.run(request).await;
    }
    let start = Instant::now();

    info!(">>> {} {}", request.method(), request.uri());

    let mut request = request;
    if level >= RequestsLoggingLevel::Headers {
        log_headers("Req", request.headers());
    }
    if level >= RequestsLoggingLevel::Body {
        let (parts, body) = request.into_parts();
        let Some(body) = log_body("Req", &parts.headers, body).await else {
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        };
        request = Request::from_parts(parts, body);
    }

    let mut response = next.run(request).await;

    if level >= RequestsLoggingLevel::Headers {
        log_headers("Resp", response.headers());
    }
    if level >= RequestsLoggingLevel::Body {
        let (parts, body) = response.into_parts();
        let Some(body) = log_body("Resp", &parts.headers, body).await else {
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        };
        response = Response::from_parts(parts, body);
    }

    info!(
        "<<< {} ({}ms)",
        response.status().as_u16(),
        start.elapsed().as_millis()
    );
    response
}
