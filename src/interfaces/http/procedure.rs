//! Public/protected procedure gate.
//!
//! Protected routes get [`require_session`] as a route layer. It rejects
//! anonymous callers with `UNAUTHORIZED` before the handler runs and hands
//! the handler an [`Authenticated`] context with the session unwrapped.

use axum::extract::{FromRequestParts, Request};
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use super::common::RpcError;
use super::context::RequestContext;
use crate::domain::{Session, User};

/// Context of a caller that passed the session gate.
#[derive(Debug, Clone)]
pub struct Authenticated {
    pub session: Session,
    pub user: User,
    pub headers: HeaderMap,
}

impl Authenticated {
    fn from_context(context: RequestContext) -> Option<Self> {
        match (context.session, context.user) {
            (Some(session), Some(user)) => Some(Self {
                session,
                user,
                headers: context.headers,
            }),
            _ => None,
        }
    }
}

pub async fn require_session(mut request: Request, next: Next) -> Response {
    let context = request.extensions().get::<RequestContext>().cloned();

    let Some(authenticated) = context.and_then(Authenticated::from_context) else {
        return RpcError::unauthorized("Unauthorized").into_response();
    };

    request.extensions_mut().insert(authenticated);
    next.run(request).await
}

impl<S> FromRequestParts<S> for Authenticated
where
    S: Send + Sync,
{
    type Rejection = RpcError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Authenticated>()
            .cloned()
            .ok_or_else(|| RpcError::unauthorized("Unauthorized"))
    }
}
