use axum::{http::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{Instrument, info, info_span, warn};
use uuid::Uuid;

use super::request_tracking::RequestId;

const SLOW_REQUEST_MS: u64 = 1000;

pub async fn logger<B>(req: Request<B>, next: Next<B>) -> Response {
    // 没有经过请求追踪中间件时，生成 trace_id
    let trace_id = req
        .extensions()
        .get::<RequestId>()
        .map(|id| id.0.clone())
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    let method = req.method().clone();
    let uri = req.uri().clone();
    let start = Instant::now();

    let span = info_span!("request", trace_id = %trace_id, method = %method, uri = %uri);
    let response = next.run(req).instrument(span).await;

    let status = response.status();
    let elapsed = start.elapsed().as_millis() as u64;

    if status.is_server_error() {
        warn!(trace_id = %trace_id, method = %method, uri = %uri, status = status.as_u16(), elapsed_ms = elapsed, "Request failed");
    } else {
        info!(trace_id = %trace_id, method = %method, uri = %uri, status = status.as_u16(), elapsed_ms = elapsed, "Request log");
    }

    if elapsed > SLOW_REQUEST_MS {
        warn!(trace_id = %trace_id, method = %method, uri = %uri, elapsed_ms = elapsed, "Slow request detected");
    }
    response
}
