//! RPC router with Swagger UI
//!
//! Every procedure lives under `/rpc/<path>`. Procedures without input
//! answer GET and POST; procedures with input take a JSON body via POST.

use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{middleware, Json, Router};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use super::common::{RpcError, RpcErrorCode};
use super::context::context_middleware;
use super::dto::{SessionView, UserView};
use super::modules::request_id::request_id_middleware;
use super::modules::{academic, auth, system};
use super::procedure::require_session;
use super::state::AppState;

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Session token from signIn (also sent as a cookie)"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // System
        system::health_check,
        system::simple_test,
        system::test_input,
        system::private_data,
        // Auth
        auth::sign_in,
        auth::sign_up,
        auth::get_session,
        auth::sign_out,
        // Academic
        academic::list_departments,
        academic::upsert_department,
        academic::list_levels,
        academic::upsert_level,
        academic::list_programs,
        academic::upsert_program,
        academic::list_classrooms,
        academic::upsert_classroom,
        academic::list_courses,
        academic::upsert_course,
        academic::list_teachers,
        academic::list_students,
        // Roles
        academic::list_roles,
    ),
    components(
        schemas(
            RpcError,
            RpcErrorCode,
            UserView,
            SessionView,
            system::SimpleTestInput,
            system::MessageResponse,
            system::TestInputRequest,
            system::TestInputResponse,
            system::ReceivedInput,
            system::PrivateDataResponse,
            auth::SignInRequest,
            auth::SignInResponse,
            auth::SignUpRequest,
            auth::SignUpResponse,
            auth::GetSessionResponse,
            auth::SignOutResponse,
            academic::UpsertDepartmentRequest,
            academic::UpsertLevelRequest,
            academic::UpsertProgramRequest,
            academic::UpsertClassroomRequest,
            academic::UpsertCourseRequest,
            academic::DepartmentView,
            academic::LevelView,
            academic::ProgramView,
            academic::ClassroomView,
            academic::CourseView,
            academic::TeacherView,
            academic::StudentView,
            academic::RolePermissionView,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "System", description = "Liveness and diagnostic procedures"),
        (name = "Authentication", description = "Sign-in, sign-up, session lookup and sign-out"),
        (name = "Academic", description = "Departments, levels, programs, classrooms, courses and profiles (session required)"),
        (name = "Roles", description = "Stored role permission records (session required)"),
    ),
    info(
        title = "MSL School RPC API",
        version = "0.1.0",
        description = "Authentication, sessions and academic records for the MSL school system"
    )
)]
pub struct ApiDoc;

/// Response for any path no procedure matches.
async fn handler_not_matched() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Handler did not match" })),
    )
}

fn cors_layer(origin: &str) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true);

    match origin.parse::<HeaderValue>() {
        Ok(value) if !origin.is_empty() => cors.allow_origin(value),
        _ => {
            warn!(origin, "No usable CORS origin configured; cross-origin requests are refused");
            cors
        }
    }
}

fn rpc_routes(state: AppState) -> Router {
    let public = Router::new()
        .route(
            "/healthCheck",
            get(system::health_check).post(system::health_check),
        )
        .route("/simpleTest", post(system::simple_test))
        .route("/testInput", post(system::test_input))
        .route("/auth/signIn", post(auth::sign_in))
        .route("/auth/signUp", post(auth::sign_up))
        .route(
            "/auth/getSession",
            get(auth::get_session).post(auth::get_session),
        )
        .route("/auth/signOut", get(auth::sign_out).post(auth::sign_out));

    let protected = Router::new()
        .route(
            "/privateData",
            get(system::private_data).post(system::private_data),
        )
        .route(
            "/academic/departments/list",
            get(academic::list_departments).post(academic::list_departments),
        )
        .route(
            "/academic/departments/upsert",
            post(academic::upsert_department),
        )
        .route(
            "/academic/levels/list",
            get(academic::list_levels).post(academic::list_levels),
        )
        .route("/academic/levels/upsert", post(academic::upsert_level))
        .route(
            "/academic/programs/list",
            get(academic::list_programs).post(academic::list_programs),
        )
        .route("/academic/programs/upsert", post(academic::upsert_program))
        .route(
            "/academic/classrooms/list",
            get(academic::list_classrooms).post(academic::list_classrooms),
        )
        .route(
            "/academic/classrooms/upsert",
            post(academic::upsert_classroom),
        )
        .route(
            "/academic/courses/list",
            get(academic::list_courses).post(academic::list_courses),
        )
        .route("/academic/courses/upsert", post(academic::upsert_course))
        .route(
            "/academic/teachers/list",
            get(academic::list_teachers).post(academic::list_teachers),
        )
        .route(
            "/academic/students/list",
            get(academic::list_students).post(academic::list_students),
        )
        .route(
            "/roles/list",
            get(academic::list_roles).post(academic::list_roles),
        )
        .route_layer(middleware::from_fn(require_session));

    public
        .merge(protected)
        .fallback(handler_not_matched)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            context_middleware,
        ))
        .with_state(state)
}

/// Build the whole HTTP application: `/` liveness, `/rpc/*` procedures,
/// `/docs` Swagger UI, CORS, request tracing and request ids.
pub fn create_app(state: AppState, cors_origin: &str) -> Router {
    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    Router::new()
        .route("/", get(|| async { "OK" }))
        .nest("/rpc", rpc_routes(state))
        .merge(swagger_routes)
        .fallback(handler_not_matched)
        .layer(cors_layer(cors_origin))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(request_id_middleware))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_every_procedure() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        for expected in [
            "/rpc/healthCheck",
            "/rpc/auth/signIn",
            "/rpc/auth/signUp",
            "/rpc/auth/getSession",
            "/rpc/auth/signOut",
            "/rpc/privateData",
            "/rpc/roles/list",
            "/rpc/academic/courses/upsert",
        ] {
            assert!(
                paths.iter().any(|p| p.as_str() == expected),
                "missing {expected}"
            );
        }
    }
}
