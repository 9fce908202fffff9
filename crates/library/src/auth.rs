//! Session endpoints: log in, log out, and read the current profile.

use gamebox_protocol::constants::{LOGIN_PATH, LOGOUT_PATH, USER_PROFILE_PATH};
use gamebox_protocol::{LoginRequest, LoginResponse, LogoutResponse, UserInfo, UserProfile};
use tracing::{debug, info, warn};

use crate::error::LibraryError;
use crate::response;
use crate::session::Session;
use crate::transport::{ApiRequest, Method, Transport};

/// Logs in and returns `session` carrying the new cookie, plus the user.
///
/// Failed logins surface the server's message (including on 401, where
/// the backend explains why the credentials were refused).
pub async fn login(
    transport: &dyn Transport,
    session: &Session,
    credentials: &LoginRequest,
) -> Result<(Session, UserInfo), LibraryError> {
    let request = ApiRequest::with_json(Method::Post, LOGIN_PATH, credentials)?;
    let response = transport.send(request).await.map_err(|e| {
        warn!(error = %e, "login request failed");
        LibraryError::from(e)
    })?;

    if !response.is_success() {
        let err = response::rejection_message(&response);
        warn!(status = response.status, error = %err, "login refused");
        return Err(err);
    }

    let body: LoginResponse = response::decode(&response)?;
    if !body.success {
        return Err(LibraryError::ValidationRejected {
            status: response.status,
            message: body.message,
        });
    }

    let user = body.user.ok_or_else(|| {
        LibraryError::ConnectivityFailure("login response carried no user".into())
    })?;
    let cookie = response
        .set_cookie
        .as_deref()
        .and_then(session_cookie)
        .ok_or_else(|| {
            LibraryError::ConnectivityFailure("login response set no session cookie".into())
        })?;

    info!(user_id = user.id, username = %user.username, "logged in");
    Ok((session.clone().with_cookie(cookie), user))
}

/// Ends the session server-side. The caller drops its cookie either way.
pub async fn logout(transport: &dyn Transport) -> Result<(), LibraryError> {
    let response = transport
        .send(ApiRequest::new(Method::Post, LOGOUT_PATH))
        .await?;
    let body: LogoutResponse = response::expect_json(&response)?;
    if body.success {
        info!("logged out");
    }
    Ok(())
}

/// Profile of the session's user. A 401 means the session is not logged in.
pub async fn profile(transport: &dyn Transport) -> Result<UserProfile, LibraryError> {
    let response = transport
        .send(ApiRequest::new(Method::Get, USER_PROFILE_PATH))
        .await?;
    let profile: UserProfile = response::expect_json(&response)?;
    debug!(user_id = ?profile.id, "profile fetched");
    Ok(profile)
}

/// `name=value` part of a `Set-Cookie` header.
fn session_cookie(header: &str) -> Option<&str> {
    let pair = header.split(';').next()?.trim();
    let (name, _) = pair.split_once('=')?;
    (!name.trim().is_empty()).then_some(pair)
}
