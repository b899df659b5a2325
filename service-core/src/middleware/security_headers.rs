use axum::{extract::Request, http::header, middleware::Next, response::IntoResponse};

/// Policy for HTML pages: same-origin assets, inline page script, and the
/// Razorpay checkout script and frame.
pub const PAGE_CONTENT_SECURITY_POLICY: &str = "default-src 'self'; \
     script-src 'self' 'unsafe-inline' https://checkout.razorpay.com; \
     style-src 'self' 'unsafe-inline'; \
     img-src 'self' data: https://*.razorpay.com; \
     frame-src https://api.razorpay.com https://checkout.razorpay.com; \
     connect-src 'self' https://*.razorpay.com";

/// Policy for JSON and operational endpoints.
pub const API_CONTENT_SECURITY_POLICY: &str = "default-src 'none'; frame-ancestors 'none'";

pub async fn security_headers_middleware(req: Request, next: Next) -> impl IntoResponse {
    let mut response = next.run(req).await;

    let is_html = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("text/html"));

    let headers = response.headers_mut();

    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        header::HeaderValue::from_static("nosniff"),
    );
    headers.insert(
        header::STRICT_TRANSPORT_SECURITY,
        header::HeaderValue::from_static("max-age=31536000; includeSubDomains"),
    );
    headers.insert(
        header::X_FRAME_OPTIONS,
        header::HeaderValue::from_static("DENY"),
    );

    let policy = if is_html {
        PAGE_CONTENT_SECURITY_POLICY
    } else {
        API_CONTENT_SECURITY_POLICY
    };
    headers.insert(
        header::CONTENT_SECURITY_POLICY,
        header::HeaderValue::from_static(policy),
    );

    response
}
