use crate::error::ErrorResponse;
use axum::{
    Json,
    body::Body,
    http::{Response, StatusCode},
    response::IntoResponse,
};
use std::any::Any;
use tower_http::catch_panic::{CatchPanicLayer, ResponseForPanic};

/// Turns a handler panic into the standard 500 error envelope.
///
/// The panic payload is only echoed back when `expose_details` is set, which
/// callers tie to a non-production environment.
#[derive(Clone, Copy, Debug)]
pub struct PanicResponse {
    expose_details: bool,
}

impl PanicResponse {
    pub fn new(expose_details: bool) -> Self {
        Self { expose_details }
    }
}

impl ResponseForPanic for PanicResponse {
    type ResponseBody = Body;

    fn response_for_panic(&mut self, err: Box<dyn Any + Send + 'static>) -> Response<Body> {
        let detail = if let Some(s) = err.downcast_ref::<String>() {
            s.clone()
        } else if let Some(s) = err.downcast_ref::<&str>() {
            s.to_string()
        } else {
            "Unknown panic".to_string()
        };

        tracing::error!(panic = %detail, "Handler panicked");

        let error = if self.expose_details {
            detail
        } else {
            "Internal server error".to_string()
        };

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new("Something went wrong!", Some(error))),
        )
            .into_response()
    }
}

pub fn catch_panic_layer(expose_details: bool) -> CatchPanicLayer<PanicResponse> {
    CatchPanicLayer::custom(PanicResponse::new(expose_details))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, http::Request, routing::get};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    async fn boom() -> &'static str {
        panic!("quote table exploded")
    }

    async fn call(expose_details: bool) -> (StatusCode, serde_json::Value) {
        let app = Router::new()
            .route("/boom", get(boom))
            .layer(catch_panic_layer(expose_details));

        let response = app
            .oneshot(Request::builder().uri("/boom").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn development_exposes_panic_text() {
        let (status, body) = call(true).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Something went wrong!");
        assert_eq!(body["error"], "quote table exploded");
    }

    #[tokio::test]
    async fn production_hides_panic_text() {
        let (_, body) = call(false).await;
        assert_eq!(body["error"], "Internal server error");
    }
}
