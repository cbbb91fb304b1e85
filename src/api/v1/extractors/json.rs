/*
 * Responsibility
 * - JSON body を受ける extractor
 * - 壊れた JSON / 型不一致は axum 既定のテキストではなく AppError (422) で返す
 * - Content-Type 不一致 (415) や body 読み込み失敗は axum の status のまま返す
 */
use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;

use crate::error::AppError;

pub struct ValidJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(into_app_error(rejection)),
        }
    }
}

fn into_app_error(rejection: JsonRejection) -> AppError {
    match rejection {
        JsonRejection::JsonDataError(err) => AppError::unprocessable(err.body_text()),
        JsonRejection::JsonSyntaxError(err) => AppError::unprocessable(err.body_text()),
        other => AppError::rejected(other.status(), other.body_text()),
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode, header},
        routing::post,
    };
    use serde::Deserialize;
    use tower::ServiceExt;

    use super::*;

    #[derive(Deserialize)]
    struct Named {
        name: String,
    }

    async fn handler(ValidJson(body): ValidJson<Named>) -> String {
        body.name
    }

    async fn call(content_type: Option<&str>, body: &'static str) -> StatusCode {
        let app = Router::new().route("/", post(handler));
        let mut req = Request::post("/");
        if let Some(content_type) = content_type {
            req = req.header(header::CONTENT_TYPE, content_type);
        }
        app.oneshot(req.body(Body::from(body)).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn well_formed_body_is_accepted() {
        let status = call(Some("application/json"), r#"{"name":"Big"}"#).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn bad_json_or_wrong_shape_is_422() {
        let status = call(Some("application/json"), r#"{"name":"#).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let status = call(Some("application/json"), r#"{"name":12}"#).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn missing_content_type_keeps_415() {
        let status = call(None, r#"{"name":"Big"}"#).await;
        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }
}
