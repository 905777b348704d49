use common::endpoints;
use common::error::{ApiError, ApiResult};
use common::requests::{LoginRequest, LoginResponse};
use common::session::{decode_claims, SessionUser, TOKEN_KEY};

use super::{ApiClient, Backend};
use crate::storage;

/// Signs in and stores the returned token.
pub async fn login(api: &ApiClient, request: &LoginRequest) -> ApiResult<SessionUser> {
    let response: LoginResponse = api.post(Backend::General, endpoints::LOGIN, request).await?;
    storage::set(TOKEN_KEY, &response.token);
    let mut user = SessionUser::from(&response);
    if user.roles.is_empty() {
        if let Ok(claims) = decode_claims(&response.token) {
            user.roles = claims.to_user().roles;
        }
    }
    Ok(user)
}

/// Tells the backend and forgets the token even when that call fails.
pub async fn logout(api: &ApiClient) {
    if let Err(err) = api
        .post_no_content(Backend::General, endpoints::LOGOUT, &())
        .await
    {
        gloo_console::warn!(format!("Logout call failed: {}", err));
    }
    storage::remove(TOKEN_KEY);
}

/// Restores the session from a stored token. Any failure means anonymous.
pub async fn restore(api: &ApiClient) -> ApiResult<SessionUser> {
    let token = storage::get(TOKEN_KEY).ok_or(ApiError::Unauthorized)?;
    let claims = decode_claims(&token)?;
    let now_secs = (js_sys::Date::now() / 1000.0) as u64;
    if claims.is_expired(now_secs) {
        return Err(ApiError::Unauthorized);
    }
    api.check(Backend::General, endpoints::VALIDATE_SESSION).await?;
    Ok(claims.to_user())
}
