//! Liveness and diagnostic procedures

use axum::Json;
use tracing::debug;

use super::dto::{
    MessageResponse, PrivateDataResponse, ReceivedInput, SimpleTestInput, TestInputRequest,
    TestInputResponse,
};
use crate::interfaces::http::common::{RpcError, ValidatedJson};
use crate::interfaces::http::dto::UserView;
use crate::interfaces::http::procedure::Authenticated;

#[utoipa::path(
    post,
    path = "/rpc/healthCheck",
    tag = "System",
    responses((status = 200, description = "Service is up", body = String))
)]
pub async fn health_check() -> Json<&'static str> {
    Json("OK")
}

#[utoipa::path(
    post,
    path = "/rpc/simpleTest",
    tag = "System",
    request_body = SimpleTestInput,
    responses(
        (status = 200, description = "Greeting", body = MessageResponse),
        (status = 400, description = "Input is not a JSON string", body = RpcError)
    )
)]
pub async fn simple_test(
    ValidatedJson(SimpleTestInput(input)): ValidatedJson<SimpleTestInput>,
) -> Json<MessageResponse> {
    debug!(%input, "simpleTest");
    Json(MessageResponse {
        message: format!("Hello {}", input),
    })
}

#[utoipa::path(
    post,
    path = "/rpc/testInput",
    tag = "System",
    request_body = TestInputRequest,
    responses(
        (status = 200, description = "Echo of the accepted input", body = TestInputResponse),
        (status = 400, description = "Input validation failed", body = RpcError)
    )
)]
pub async fn test_input(
    ValidatedJson(input): ValidatedJson<TestInputRequest>,
) -> Json<TestInputResponse> {
    debug!(email = %input.email, "testInput");
    Json(TestInputResponse {
        received: ReceivedInput { email: input.email },
    })
}

#[utoipa::path(
    post,
    path = "/rpc/privateData",
    tag = "System",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Caller is signed in", body = PrivateDataResponse),
        (status = 401, description = "No session", body = RpcError)
    )
)]
pub async fn private_data(auth: Authenticated) -> Json<PrivateDataResponse> {
    Json(PrivateDataResponse {
        message: "This is private".to_string(),
        user: UserView::from(&auth.user),
    })
}
