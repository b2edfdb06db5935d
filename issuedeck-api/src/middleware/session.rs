/// Session authentication middleware
///
/// Validates the session token from the `Authorization` header or the
/// session cookie and inserts a [`SessionContext`] into the request
/// extensions. Requests without a valid session get 401 before reaching
/// the handler.

use crate::{app::AppState, error::ApiError};
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use issuedeck_shared::auth::middleware::{authenticate, SessionContext};

pub async fn session_auth_layer(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let session: SessionContext = authenticate(req.headers(), state.session_secret())
        .map_err(|e| {
            tracing::debug!(error = %e, path = %req.uri().path(), "Rejected unauthenticated request");
            e
        })?;

    req.extensions_mut().insert(session);

    Ok(next.run(req).await)
}
