//! Academic record DTOs
//!
//! Upsert requests name their parents by natural key (`department`,
//! `level`, `program`). Views expose the stored rows, including the
//! surrogate ids that foreign references point at.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{
    Classroom, Course, Department, Level, PermissionMap, Program, RolePermission, Student,
    Teacher, UpsertClassroomDto, UpsertCourseDto, UpsertDepartmentDto, UpsertLevelDto,
    UpsertProgramDto,
};

// ── Requests ────────────────────────────────────────────────────

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpsertDepartmentRequest {
    #[validate(length(min = 1, max = 50, message = "departmentId must be 1-50 characters"))]
    pub department_id: String,
    #[validate(length(min = 1, max = 255, message = "name must be 1-255 characters"))]
    pub name: String,
    pub description: Option<String>,
}

impl From<UpsertDepartmentRequest> for UpsertDepartmentDto {
    fn from(r: UpsertDepartmentRequest) -> Self {
        Self {
            department_id: r.department_id,
            name: r.name,
            description: r.description,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpsertLevelRequest {
    #[validate(length(min = 1, max = 50, message = "levelId must be 1-50 characters"))]
    pub level_id: String,
    #[validate(length(min = 1, max = 100, message = "levelName must be 1-100 characters"))]
    pub level_name: String,
    #[validate(length(max = 255))]
    pub level_full_name: Option<String>,
}

impl From<UpsertLevelRequest> for UpsertLevelDto {
    fn from(r: UpsertLevelRequest) -> Self {
        Self {
            level_id: r.level_id,
            level_name: r.level_name,
            level_full_name: r.level_full_name,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpsertProgramRequest {
    #[validate(length(min = 1, max = 50, message = "programId must be 1-50 characters"))]
    pub program_id: String,
    #[validate(length(min = 1, max = 255, message = "name must be 1-255 characters"))]
    pub name: String,
    pub description: Option<String>,
    /// `departmentId` of the owning department
    #[validate(length(min = 1, message = "department is required"))]
    pub department: String,
    /// `levelId` of the level, if any
    #[validate(length(min = 1))]
    pub level: Option<String>,
}

impl From<UpsertProgramRequest> for UpsertProgramDto {
    fn from(r: UpsertProgramRequest) -> Self {
        Self {
            program_id: r.program_id,
            name: r.name,
            description: r.description,
            department: r.department,
            level: r.level,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpsertClassroomRequest {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: String,
    pub description: Option<String>,
}

impl From<UpsertClassroomRequest> for UpsertClassroomDto {
    fn from(r: UpsertClassroomRequest) -> Self {
        Self {
            name: r.name,
            description: r.description,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpsertCourseRequest {
    #[validate(length(min = 1, max = 50, message = "courseId must be 1-50 characters"))]
    pub course_id: String,
    #[validate(length(min = 1, max = 255, message = "courseName must be 1-255 characters"))]
    pub course_name: String,
    /// `programId` of the program
    #[validate(length(min = 1, message = "program is required"))]
    pub program: String,
}

impl From<UpsertCourseRequest> for UpsertCourseDto {
    fn from(r: UpsertCourseRequest) -> Self {
        Self {
            course_id: r.course_id,
            course_name: r.course_name,
            program: r.program,
        }
    }
}

// ── Views ───────────────────────────────────────────────────────

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentView {
    pub id: String,
    pub department_id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Department> for DepartmentView {
    fn from(d: Department) -> Self {
        Self {
            id: d.id,
            department_id: d.department_id,
            name: d.name,
            description: d.description,
            created_at: d.created_at,
            updated_at: d.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LevelView {
    pub id: String,
    pub level_id: String,
    pub level_name: String,
    pub level_full_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Level> for LevelView {
    fn from(l: Level) -> Self {
        Self {
            id: l.id,
            level_id: l.level_id,
            level_name: l.level_name,
            level_full_name: l.level_full_name,
            created_at: l.created_at,
            updated_at: l.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProgramView {
    pub id: String,
    pub program_id: String,
    pub name: String,
    pub description: Option<String>,
    /// Surrogate id of the department row
    pub department_id: String,
    /// Surrogate id of the level row
    pub level_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Program> for ProgramView {
    fn from(p: Program) -> Self {
        Self {
            id: p.id,
            program_id: p.program_id,
            name: p.name,
            description: p.description,
            department_id: p.department_id,
            level_id: p.level_id,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClassroomView {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Classroom> for ClassroomView {
    fn from(c: Classroom) -> Self {
        Self {
            id: c.id,
            name: c.name,
            description: c.description,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseView {
    pub id: String,
    pub course_id: String,
    pub course_name: String,
    pub program_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Course> for CourseView {
    fn from(c: Course) -> Self {
        Self {
            id: c.id,
            course_id: c.course_id,
            course_name: c.course_name,
            program_id: c.program_id,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TeacherView {
    pub id: String,
    pub user_id: String,
    pub department_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Teacher> for TeacherView {
    fn from(t: Teacher) -> Self {
        Self {
            id: t.id,
            user_id: t.user_id,
            department_id: t.department_id,
            created_at: t.created_at,
            updated_at: t.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StudentView {
    pub id: String,
    pub user_id: String,
    pub student_id: String,
    pub program_id: String,
    pub department_id: String,
    pub level_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Student> for StudentView {
    fn from(s: Student) -> Self {
        Self {
            id: s.id,
            user_id: s.user_id,
            student_id: s.student_id,
            program_id: s.program_id,
            department_id: s.department_id,
            level_id: s.level_id,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RolePermissionView {
    pub id: String,
    pub name: String,
    pub label: String,
    /// Resource category → allowed actions
    #[schema(value_type = Object)]
    pub permissions: PermissionMap,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<RolePermission> for RolePermissionView {
    fn from(r: RolePermission) -> Self {
        Self {
            id: r.id,
            name: r.name,
            label: r.label,
            permissions: r.permissions,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requests_use_camel_case() {
        let json = r#"{"programId":"PROG002","name":"Arts","department":"DEPT001"}"#;
        let req: UpsertProgramRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.program_id, "PROG002");
        assert!(req.level.is_none());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn empty_natural_key_is_rejected() {
        let req = UpsertCourseRequest {
            course_id: String::new(),
            course_name: "Physics".into(),
            program: "PROG001".into(),
        };
        assert!(req.validate().is_err());
    }
}
