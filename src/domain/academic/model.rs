//! Academic structure records.
//!
//! Every record has a surrogate `id` plus a unique natural key
//! (`department_id`, `level_id`, `program_id`, classroom `name`,
//! `course_id`, and `user_id`/`student_id` for profiles). Foreign
//! references hold surrogate ids; upsert DTOs name their parents by
//! natural key and the repository resolves them.

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Department {
    pub id: String,
    pub department_id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Level {
    pub id: String,
    pub level_id: String,
    pub level_name: String,
    pub level_full_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    pub id: String,
    pub program_id: String,
    pub name: String,
    pub description: Option<String>,
    pub department_id: String,
    pub level_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classroom {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    pub id: String,
    pub course_id: String,
    pub course_name: String,
    pub program_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Teacher {
    pub id: String,
    pub user_id: String,
    pub department_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    pub id: String,
    pub user_id: String,
    pub student_id: String,
    pub program_id: String,
    pub department_id: String,
    pub level_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ── Upsert inputs ───────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct UpsertDepartmentDto {
    pub department_id: String,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct UpsertLevelDto {
    pub level_id: String,
    pub level_name: String,
    pub level_full_name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct UpsertProgramDto {
    pub program_id: String,
    pub name: String,
    pub description: Option<String>,
    /// Natural key of the owning department.
    pub department: String,
    /// Natural key of the level, if the program is level-specific.
    pub level: Option<String>,
}

#[derive(Debug, Clone)]
pub struct UpsertClassroomDto {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct UpsertCourseDto {
    pub course_id: String,
    pub course_name: String,
    /// Natural key of the program.
    pub program: String,
}

#[derive(Debug, Clone)]
pub struct UpsertTeacherDto {
    pub user_id: String,
    /// Natural key of the department.
    pub department: Option<String>,
}

#[derive(Debug, Clone)]
pub struct UpsertStudentDto {
    pub user_id: String,
    pub student_id: String,
    pub program: String,
    pub department: String,
    pub level: String,
}
