//! Authentication procedures: signIn, signUp, getSession, signOut

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, HeaderValue};
use axum::Json;
use tracing::{error, warn};

use super::dto::{
    GetSessionResponse, SignInRequest, SignInResponse, SignOutResponse, SignUpRequest,
    SignUpResponse,
};
use crate::application::identity::transport::{clear_session_cookie, session_cookie};
use crate::application::{Identity, SignUpInput};
use crate::interfaces::http::common::{RpcError, ValidatedJson};
use crate::interfaces::http::context::RequestContext;
use crate::interfaces::http::dto::{SessionView, UserView};
use crate::interfaces::http::state::AppState;

fn cookie_headers(value: String) -> HeaderMap {
    let mut headers = HeaderMap::new();
    match HeaderValue::from_str(&value) {
        Ok(v) => {
            headers.insert(SET_COOKIE, v);
        }
        Err(e) => warn!(error = %e, "Session cookie is not a valid header value"),
    }
    headers
}

#[utoipa::path(
    post,
    path = "/rpc/auth/signIn",
    tag = "Authentication",
    request_body = SignInRequest,
    responses(
        (status = 200, description = "Signed in; session cookie set", body = SignInResponse),
        (status = 400, description = "Input validation failed", body = RpcError),
        (status = 401, description = "Invalid credentials", body = RpcError)
    )
)]
pub async fn sign_in(
    State(state): State<AppState>,
    context: RequestContext,
    ValidatedJson(input): ValidatedJson<SignInRequest>,
) -> Result<(HeaderMap, Json<SignInResponse>), RpcError> {
    let identity = match (input.email.as_deref(), input.username.as_deref()) {
        (Some(email), _) => Identity::Email(email),
        (None, Some(username)) => Identity::Username(username),
        (None, None) => {
            return Err(RpcError::bad_request("Either email or username is required"));
        }
    };

    let invalid = || RpcError::unauthorized("Invalid credentials");

    let outcome = state
        .credentials
        .sign_in(identity, &input.password, &context.headers)
        .await
        .map_err(|e| {
            error!(error = %e, "Sign-in error");
            invalid()
        })?;

    // Read the new session back through the normal lookup path.
    let (session, user) = match state.credentials.confirm_session(&outcome).await {
        Ok(Some(found)) => found,
        Ok(None) => {
            error!(session_id = %outcome.session.id, "Fresh session could not be read back");
            return Err(invalid());
        }
        Err(e) => {
            error!(error = %e, "Sign-in error");
            return Err(invalid());
        }
    };

    let config = state.credentials.config();
    let cookie = session_cookie(
        &config.cookie_name,
        &outcome.token,
        config.session_ttl.num_seconds().max(0),
        config.secure_cookies,
    );

    Ok((
        cookie_headers(cookie),
        Json(SignInResponse {
            success: true,
            message: "Sign-in successful".to_string(),
            user: UserView::from(&user),
            session: SessionView::from(&session),
            token: outcome.token,
        }),
    ))
}

#[utoipa::path(
    post,
    path = "/rpc/auth/signUp",
    tag = "Authentication",
    request_body = SignUpRequest,
    responses(
        (status = 200, description = "Account created; no session is opened", body = SignUpResponse),
        (status = 400, description = "Input validation failed or sign-up rejected", body = RpcError)
    )
)]
pub async fn sign_up(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<SignUpRequest>,
) -> Result<Json<SignUpResponse>, RpcError> {
    let user = state
        .credentials
        .sign_up(SignUpInput {
            name: input.name,
            email: input.email,
            password: input.password,
            username: input.username,
        })
        .await
        .map_err(|e| {
            error!(error = %e, "Sign-up error");
            RpcError::bad_request("Sign-up failed")
        })?;

    Ok(Json(SignUpResponse {
        success: true,
        message: "Sign-up successful".to_string(),
        user: UserView::from(&user),
    }))
}

#[utoipa::path(
    post,
    path = "/rpc/auth/getSession",
    tag = "Authentication",
    responses((status = 200, description = "Current session, or nulls when signed out", body = GetSessionResponse))
)]
pub async fn get_session(context: RequestContext) -> Json<GetSessionResponse> {
    Json(GetSessionResponse {
        session: context.session.as_ref().map(SessionView::from),
        user: context.user.as_ref().map(UserView::from),
    })
}

#[utoipa::path(
    post,
    path = "/rpc/auth/signOut",
    tag = "Authentication",
    responses(
        (status = 200, description = "Session closed (or there was none); cookie cleared", body = SignOutResponse),
        (status = 500, description = "Sign-out failed", body = RpcError)
    )
)]
pub async fn sign_out(
    State(state): State<AppState>,
    context: RequestContext,
) -> Result<(HeaderMap, Json<SignOutResponse>), RpcError> {
    state
        .credentials
        .sign_out(&context.headers)
        .await
        .map_err(|e| {
            error!(error = %e, "Sign-out error");
            RpcError::internal("Sign-out failed")
        })?;

    let cookie = clear_session_cookie(&state.credentials.config().cookie_name);
    Ok((
        cookie_headers(cookie),
        Json(SignOutResponse {
            success: true,
            message: "Sign-out successful".to_string(),
        }),
    ))
}
