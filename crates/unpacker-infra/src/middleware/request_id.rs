use axum::http::HeaderValue;
use axum::{extract::Request, middleware::Next, response::Response};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "X-Request-ID";

/// Request ID extension type
#[derive(Clone, Debug)]
pub struct RequestId(pub String);

/// Reuses an inbound `X-Request-ID` or generates one, stores it in the request
/// extensions and echoes it on the response.
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    request
        .extensions_mut()
        .insert(RequestId(request_id.clone()));

    let mut response = next.run(request).await;

    if let Ok(header_value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, header_value);
    }

    response
}

/// Request ID stored by [`request_id_middleware`], if it ran for this request.
pub fn get_request_id<B>(request: &axum::http::Request<B>) -> Option<String> {
    request
        .extensions()
        .get::<RequestId>()
        .map(|id| id.0.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{routing::get, Extension, Router};
    use axum_test::TestServer;

    fn server() -> TestServer {
        let app = Router::new()
            .route("/", get(|Extension(id): Extension<RequestId>| async move { id.0 }))
            .layer(axum::middleware::from_fn(request_id_middleware));
        TestServer::new(app).unwrap()
    }

    #[tokio::test]
    async fn test_generates_request_id() {
        let response = server().get("/").await;
        let header = response.header(REQUEST_ID_HEADER);
        let id = header.to_str().unwrap();
        assert!(Uuid::parse_str(id).is_ok());
        assert_eq!(response.text(), id);
    }

    #[tokio::test]
    async fn test_get_request_id_reads_extension() {
        let app = Router::new()
            .route(
                "/",
                get(|request: Request| async move { get_request_id(&request).unwrap_or_default() }),
            )
            .layer(axum::middleware::from_fn(request_id_middleware));
        let response = TestServer::new(app)
            .unwrap()
            .get("/")
            .add_header(REQUEST_ID_HEADER, "req-7")
            .await;
        assert_eq!(response.text(), "req-7");

        let bare = axum::http::Request::new(());
        assert_eq!(get_request_id(&bare), None);
    }

    #[tokio::test]
    async fn test_reuses_inbound_request_id() {
        let response = server()
            .get("/")
            .add_header(REQUEST_ID_HEADER, "abc-123")
            .await;
        assert_eq!(response.header(REQUEST_ID_HEADER), "abc-123");
        assert_eq!(response.text(), "abc-123");
    }
}
