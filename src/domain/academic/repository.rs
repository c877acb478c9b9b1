use async_trait::async_trait;

use super::model::*;
use crate::domain::DomainResult;

/// Persistence for the academic structure. Every `upsert_*` is keyed by
/// the record's natural key and never creates a duplicate; unknown parent
/// keys fail with `DomainError::NotFound`.
#[async_trait]
pub trait AcademicRepositoryInterface: Send + Sync {
    async fn upsert_department(&self, dto: UpsertDepartmentDto) -> DomainResult<Department>;
    async fn list_departments(&self) -> DomainResult<Vec<Department>>;

    async fn upsert_level(&self, dto: UpsertLevelDto) -> DomainResult<Level>;
    async fn list_levels(&self) -> DomainResult<Vec<Level>>;

    async fn upsert_program(&self, dto: UpsertProgramDto) -> DomainResult<Program>;
    async fn list_programs(&self) -> DomainResult<Vec<Program>>;

    async fn upsert_classroom(&self, dto: UpsertClassroomDto) -> DomainResult<Classroom>;
    async fn list_classrooms(&self) -> DomainResult<Vec<Classroom>>;

    async fn upsert_course(&self, dto: UpsertCourseDto) -> DomainResult<Course>;
    async fn list_courses(&self) -> DomainResult<Vec<Course>>;

    async fn upsert_teacher(&self, dto: UpsertTeacherDto) -> DomainResult<Teacher>;
    async fn list_teachers(&self) -> DomainResult<Vec<Teacher>>;

    async fn upsert_student(&self, dto: UpsertStudentDto) -> DomainResult<Student>;
    async fn list_students(&self) -> DomainResult<Vec<Student>>;
}
