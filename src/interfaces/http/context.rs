//! Per-request context.
//!
//! Built once by [`context_middleware`] from the request headers and stored
//! in the request extensions. Handlers receive it through the
//! [`RequestContext`] extractor; nothing mutates it afterwards.

use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::{debug, error};

use super::common::RpcError;
use super::state::AppState;
use crate::application::CredentialService;
use crate::domain::{DomainResult, Session, User};

/// `{session, user, headers}` for one request. `session` and `user` are
/// both present or both absent.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub session: Option<Session>,
    pub user: Option<User>,
    pub headers: HeaderMap,
}

impl RequestContext {
    pub fn anonymous(headers: HeaderMap) -> Self {
        Self {
            session: None,
            user: None,
            headers,
        }
    }
}

/// Asks the credential service for the caller's session. A request without
/// a usable token yields an anonymous context, not an error.
pub async fn create_context(
    credentials: &CredentialService,
    headers: &HeaderMap,
) -> DomainResult<RequestContext> {
    let context = match credentials.get_session(headers).await? {
        Some((session, user)) => RequestContext {
            session: Some(session),
            user: Some(user),
            headers: headers.clone(),
        },
        None => RequestContext::anonymous(headers.clone()),
    };
    Ok(context)
}

pub async fn context_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    debug!(method = %request.method(), path = %request.uri().path(), "RPC request");

    let context = match create_context(&state.credentials, request.headers()).await {
        Ok(context) => context,
        Err(e) => {
            error!(error = %e, "Failed to resolve request session");
            return RpcError::internal("Internal server error").into_response();
        }
    };

    request.extensions_mut().insert(context);
    next.run(request).await
}

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = RpcError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<RequestContext>()
            .cloned()
            .ok_or_else(|| {
                error!("Request context missing; is context_middleware installed?");
                RpcError::internal("Internal server error")
            })
    }
}
