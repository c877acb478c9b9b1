//! Academic record procedures. Every route here sits behind the session
//! gate; roles are not consulted.

use axum::extract::State;
use axum::Json;
use tracing::info;

use super::dto::*;
use crate::interfaces::http::common::{RpcError, ValidatedJson};
use crate::interfaces::http::procedure::Authenticated;
use crate::interfaces::http::state::AppState;

#[utoipa::path(
    post,
    path = "/rpc/academic/departments/list",
    tag = "Academic",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Stored records", body = Vec<DepartmentView>),
        (status = 401, description = "No session", body = RpcError)
    )
)]
pub async fn list_departments(
    State(state): State<AppState>,
    _auth: Authenticated,
) -> Result<Json<Vec<DepartmentView>>, RpcError> {
    let rows = state.repos.academics().list_departments().await?;
    Ok(Json(rows.into_iter().map(DepartmentView::from).collect()))
}

#[utoipa::path(
    post,
    path = "/rpc/academic/departments/upsert",
    tag = "Academic",
    security(("bearer_auth" = [])),
    request_body = UpsertDepartmentRequest,
    responses(
        (status = 200, description = "Created or updated by natural key", body = DepartmentView),
        (status = 400, description = "Invalid input or unknown parent key", body = RpcError),
        (status = 401, description = "No session", body = RpcError)
    )
)]
pub async fn upsert_department(
    State(state): State<AppState>,
    auth: Authenticated,
    ValidatedJson(input): ValidatedJson<UpsertDepartmentRequest>,
) -> Result<Json<DepartmentView>, RpcError> {
    let saved = state.repos.academics().upsert_department(input.into()).await?;
    info!(user_id = %auth.user.id, id = %saved.id, "Upserted department");
    Ok(Json(DepartmentView::from(saved)))
}

#[utoipa::path(
    post,
    path = "/rpc/academic/levels/list",
    tag = "Academic",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Stored records", body = Vec<LevelView>),
        (status = 401, description = "No session", body = RpcError)
    )
)]
pub async fn list_levels(
    State(state): State<AppState>,
    _auth: Authenticated,
) -> Result<Json<Vec<LevelView>>, RpcError> {
    let rows = state.repos.academics().list_levels().await?;
    Ok(Json(rows.into_iter().map(LevelView::from).collect()))
}

#[utoipa::path(
    post,
    path = "/rpc/academic/levels/upsert",
    tag = "Academic",
    security(("bearer_auth" = [])),
    request_body = UpsertLevelRequest,
    responses(
        (status = 200, description = "Created or updated by natural key", body = LevelView),
        (status = 400, description = "Invalid input or unknown parent key", body = RpcError),
        (status = 401, description = "No session", body = RpcError)
    )
)]
pub async fn upsert_level(
    State(state): State<AppState>,
    auth: Authenticated,
    ValidatedJson(input): ValidatedJson<UpsertLevelRequest>,
) -> Result<Json<LevelView>, RpcError> {
    let saved = state.repos.academics().upsert_level(input.into()).await?;
    info!(user_id = %auth.user.id, id = %saved.id, "Upserted level");
    Ok(Json(LevelView::from(saved)))
}

#[utoipa::path(
    post,
    path = "/rpc/academic/programs/list",
    tag = "Academic",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Stored records", body = Vec<ProgramView>),
        (status = 401, description = "No session", body = RpcError)
    )
)]
pub async fn list_programs(
    State(state): State<AppState>,
    _auth: Authenticated,
) -> Result<Json<Vec<ProgramView>>, RpcError> {
    let rows = state.repos.academics().list_programs().await?;
    Ok(Json(rows.into_iter().map(ProgramView::from).collect()))
}

#[utoipa::path(
    post,
    path = "/rpc/academic/programs/upsert",
    tag = "Academic",
    security(("bearer_auth" = [])),
    request_body = UpsertProgramRequest,
    responses(
        (status = 200, description = "Created or updated by natural key", body = ProgramView),
        (status = 400, description = "Invalid input or unknown parent key", body = RpcError),
        (status = 401, description = "No session", body = RpcError)
    )
)]
pub async fn upsert_program(
    State(state): State<AppState>,
    auth: Authenticated,
    ValidatedJson(input): ValidatedJson<UpsertProgramRequest>,
) -> Result<Json<ProgramView>, RpcError> {
    let saved = state.repos.academics().upsert_program(input.into()).await?;
    info!(user_id = %auth.user.id, id = %saved.id, "Upserted program");
    Ok(Json(ProgramView::from(saved)))
}

#[utoipa::path(
    post,
    path = "/rpc/academic/classrooms/list",
    tag = "Academic",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Stored records", body = Vec<ClassroomView>),
        (status = 401, description = "No session", body = RpcError)
    )
)]
pub async fn list_classrooms(
    State(state): State<AppState>,
    _auth: Authenticated,
) -> Result<Json<Vec<ClassroomView>>, RpcError> {
    let rows = state.repos.academics().list_classrooms().await?;
    Ok(Json(rows.into_iter().map(ClassroomView::from).collect()))
}

#[utoipa::path(
    post,
    path = "/rpc/academic/classrooms/upsert",
    tag = "Academic",
    security(("bearer_auth" = [])),
    request_body = UpsertClassroomRequest,
    responses(
        (status = 200, description = "Created or updated by natural key", body = ClassroomView),
        (status = 400, description = "Invalid input or unknown parent key", body = RpcError),
        (status = 401, description = "No session", body = RpcError)
    )
)]
pub async fn upsert_classroom(
    State(state): State<AppState>,
    auth: Authenticated,
    ValidatedJson(input): ValidatedJson<UpsertClassroomRequest>,
) -> Result<Json<ClassroomView>, RpcError> {
    let saved = state.repos.academics().upsert_classroom(input.into()).await?;
    info!(user_id = %auth.user.id, id = %saved.id, "Upserted classroom");
    Ok(Json(ClassroomView::from(saved)))
}

#[utoipa::path(
    post,
    path = "/rpc/academic/courses/list",
    tag = "Academic",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Stored records", body = Vec<CourseView>),
        (status = 401, description = "No session", body = RpcError)
    )
)]
pub async fn list_courses(
    State(state): State<AppState>,
    _auth: Authenticated,
) -> Result<Json<Vec<CourseView>>, RpcError> {
    let rows = state.repos.academics().list_courses().await?;
    Ok(Json(rows.into_iter().map(CourseView::from).collect()))
}

#[utoipa::path(
    post,
    path = "/rpc/academic/courses/upsert",
    tag = "Academic",
    security(("bearer_auth" = [])),
    request_body = UpsertCourseRequest,
    responses(
        (status = 200, description = "Created or updated by natural key", body = CourseView),
        (status = 400, description = "Invalid input or unknown parent key", body = RpcError),
        (status = 401, description = "No session", body = RpcError)
    )
)]
pub async fn upsert_course(
    State(state): State<AppState>,
    auth: Authenticated,
    ValidatedJson(input): ValidatedJson<UpsertCourseRequest>,
) -> Result<Json<CourseView>, RpcError> {
    let saved = state.repos.academics().upsert_course(input.into()).await?;
    info!(user_id = %auth.user.id, id = %saved.id, "Upserted course");
    Ok(Json(CourseView::from(saved)))
}

#[utoipa::path(
    post,
    path = "/rpc/academic/teachers/list",
    tag = "Academic",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Stored records", body = Vec<TeacherView>),
        (status = 401, description = "No session", body = RpcError)
    )
)]
pub async fn list_teachers(
    State(state): State<AppState>,
    _auth: Authenticated,
) -> Result<Json<Vec<TeacherView>>, RpcError> {
    let rows = state.repos.academics().list_teachers().await?;
    Ok(Json(rows.into_iter().map(TeacherView::from).collect()))
}

#[utoipa::path(
    post,
    path = "/rpc/academic/students/list",
    tag = "Academic",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Stored records", body = Vec<StudentView>),
        (status = 401, description = "No session", body = RpcError)
    )
)]
pub async fn list_students(
    State(state): State<AppState>,
    _auth: Authenticated,
) -> Result<Json<Vec<StudentView>>, RpcError> {
    let rows = state.repos.academics().list_students().await?;
    Ok(Json(rows.into_iter().map(StudentView::from).collect()))
}

#[utoipa::path(
    post,
    path = "/rpc/roles/list",
    tag = "Roles",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Stored role permission records", body = Vec<RolePermissionView>),
        (status = 401, description = "No session", body = RpcError)
    )
)]
pub async fn list_roles(
    State(state): State<AppState>,
    _auth: Authenticated,
) -> Result<Json<Vec<RolePermissionView>>, RpcError> {
    let rows = state.repos.role_permissions().list().await?;
    Ok(Json(rows.into_iter().map(RolePermissionView::from).collect()))
}
