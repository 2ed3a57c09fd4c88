use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use tracing::warn;

use shared_config::AppConfig;
use shared_models::auth::User;
use shared_models::error::AppError;

use crate::jwt::validate_token;

/// The identity substituted when demo mode is on and no valid token was
/// presented.
pub fn demo_user() -> User {
    User {
        id: "demo-patient".to_string(),
        email: Some("demo@medirdv.example".to_string()),
        role: Some("patient".to_string()),
        created_at: None,
    }
}

/// Authentication middleware: verifies the bearer token and inserts the
/// resulting `User` into request extensions. With `demo_mode` set, any
/// authentication failure degrades to the demo identity instead of a 401;
/// the degradation is always logged.
pub async fn auth_middleware(
    State(config): State<Arc<AppConfig>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let user = match bearer_user(&request, &config) {
        Ok(user) => user,
        Err(err) => {
            if config.demo_mode {
                warn!("Demo mode: substituting demo identity after auth failure: {}", err);
                demo_user()
            } else {
                return Err(err);
            }
        }
    };

    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

fn bearer_user(request: &Request<Body>, config: &AppConfig) -> Result<User, AppError> {
    let auth_header = request
        .headers()
        .get("Authorization")
        .ok_or_else(|| AppError::Auth("Missing authorization header".to_string()))?;

    let auth_value = auth_header
        .to_str()
        .map_err(|_| AppError::Auth("Invalid authorization header format".to_string()))?;

    if !auth_value.starts_with("Bearer ") {
        return Err(AppError::Auth("Invalid authorization header format".to_string()));
    }

    let token = &auth_value[7..];

    validate_token(token, &config.jwt_secret).map_err(AppError::Auth)
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
        middleware,
        routing::get,
        Extension, Router,
    };
    use tower::ServiceExt;

    use crate::test_utils::{JwtTestUtils, TestConfig, TestUser};

    async fn whoami(Extension(user): Extension<User>) -> String {
        user.id
    }

    fn app(config: AppConfig) -> Router {
        Router::new()
            .route("/", get(whoami))
            .layer(middleware::from_fn_with_state(Arc::new(config), auth_middleware))
    }

    fn request(auth_header: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri("/");
        if let Some(value) = auth_header {
            builder = builder.header("Authorization", value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn valid_token_reaches_the_handler_as_its_user() {
        let config = TestConfig::default();
        let test_user = TestUser::patient("auth@example.com");
        let token = JwtTestUtils::create_test_token(&test_user, &config.jwt_secret, None);

        let response = app(config.to_app_config())
            .oneshot(request(Some(&format!("Bearer {}", token))))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], test_user.id.as_bytes());
    }

    #[tokio::test]
    async fn missing_token_is_unauthorized() {
        let response = app(TestConfig::default().to_app_config())
            .oneshot(request(None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn garbage_token_is_unauthorized() {
        let response = app(TestConfig::default().to_app_config())
            .oneshot(request(Some("Bearer not.a.token")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn demo_mode_substitutes_the_demo_identity_on_missing_token() {
        let mut config = TestConfig::default().to_app_config();
        config.demo_mode = true;

        let response = app(config).oneshot(request(None)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"demo-patient");
    }

    #[tokio::test]
    async fn demo_mode_substitutes_the_demo_identity_on_bad_token() {
        let mut config = TestConfig::default().to_app_config();
        config.demo_mode = true;

        let response = app(config)
            .oneshot(request(Some("Bearer not.a.token")))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"demo-patient");
    }
}
