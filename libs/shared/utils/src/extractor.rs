use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use axum_extra::TypedHeader;
use headers::{authorization::Bearer, Authorization};
use tracing::debug;

use shared_config::AppConfig;
use shared_models::auth::AccessToken;
use shared_models::error::AppError;

/// Resolves the token forwarded upstream: the caller's bearer token, or the
/// dashboard's configured token when the caller sent none.
pub async fn access_token_middleware(
    State(config): State<Arc<AppConfig>>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = match bearer {
        Some(TypedHeader(auth)) if !auth.token().trim().is_empty() => {
            AccessToken::new(auth.token())
        }
        _ => {
            let configured = config
                .access_token
                .as_deref()
                .ok_or_else(|| AppError::Auth("Missing authorization header".to_string()))?;
            debug!("No bearer token on request, using configured access token");
            AccessToken::new(configured)
        }
    };

    request.extensions_mut().insert(token);

    Ok(next.run(request).await)
}
