use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use tracing::{info, Instrument};

/// Wraps each request in an `http.request` span and logs the outcome.
pub(crate) async fn request_tracing(request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let route = request.uri().path().to_string();
    let span = tracing::info_span!("http.request", method = %method, route = %route);

    async move {
        let started = std::time::Instant::now();
        let response = next.run(request).await;
        info!(
            status = response.status().as_u16(),
            duration_ms = started.elapsed().as_millis() as u64,
            "Request completed"
        );
        response
    }
    .instrument(span)
    .await
}
