//! SeaORM implementation of AcademicRepositoryInterface
//!
//! Upserts look the record up by its natural key and either update it in
//! place or insert a fresh row. Parent references arrive as natural keys
//! and are resolved to surrogate ids before writing.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::db_err;
use crate::domain::{
    AcademicRepositoryInterface, Classroom, Course, Department, DomainError, DomainResult, Level,
    Program, Student, Teacher, UpsertClassroomDto, UpsertCourseDto, UpsertDepartmentDto,
    UpsertLevelDto, UpsertProgramDto, UpsertStudentDto, UpsertTeacherDto,
};
use crate::infrastructure::database::entities::{
    classroom, course, department, level, program, student, teacher, user,
};

pub struct SeaOrmAcademicRepository {
    db: DatabaseConnection,
}

impl SeaOrmAcademicRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    // ── Natural key resolution ──────────────────────────────────

    async fn department_pk(&self, department_id: &str) -> DomainResult<String> {
        department::Entity::find()
            .filter(department::Column::DepartmentId.eq(department_id))
            .one(&self.db)
            .await
            .map_err(db_err)?
            .map(|m| m.id)
            .ok_or_else(|| DomainError::NotFound {
                entity: "Department",
                field: "department_id",
                value: department_id.to_string(),
            })
    }

    async fn level_pk(&self, level_id: &str) -> DomainResult<String> {
        level::Entity::find()
            .filter(level::Column::LevelId.eq(level_id))
            .one(&self.db)
            .await
            .map_err(db_err)?
            .map(|m| m.id)
            .ok_or_else(|| DomainError::NotFound {
                entity: "Level",
                field: "level_id",
                value: level_id.to_string(),
            })
    }

    async fn program_pk(&self, program_id: &str) -> DomainResult<String> {
        program::Entity::find()
            .filter(program::Column::ProgramId.eq(program_id))
            .one(&self.db)
            .await
            .map_err(db_err)?
            .map(|m| m.id)
            .ok_or_else(|| DomainError::NotFound {
                entity: "Program",
                field: "program_id",
                value: program_id.to_string(),
            })
    }

    async fn ensure_user(&self, user_id: &str) -> DomainResult<()> {
        let found = user::Entity::find_by_id(user_id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        match found {
            Some(_) => Ok(()),
            None => Err(DomainError::NotFound {
                entity: "User",
                field: "id",
                value: user_id.to_string(),
            }),
        }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn department_to_domain(m: department::Model) -> Department {
    Department {
        id: m.id,
        department_id: m.department_id,
        name: m.name,
        description: m.description,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn level_to_domain(m: level::Model) -> Level {
    Level {
        id: m.id,
        level_id: m.level_id,
        level_name: m.level_name,
        level_full_name: m.level_full_name,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn program_to_domain(m: program::Model) -> Program {
    Program {
        id: m.id,
        program_id: m.program_id,
        name: m.name,
        description: m.description,
        department_id: m.department_id,
        level_id: m.level_id,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn classroom_to_domain(m: classroom::Model) -> Classroom {
    Classroom {
        id: m.id,
        name: m.name,
        description: m.description,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn course_to_domain(m: course::Model) -> Course {
    Course {
        id: m.id,
        course_id: m.course_id,
        course_name: m.course_name,
        program_id: m.program_id,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn teacher_to_domain(m: teacher::Model) -> Teacher {
    Teacher {
        id: m.id,
        user_id: m.user_id,
        department_id: m.department_id,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn student_to_domain(m: student::Model) -> Student {
    Student {
        id: m.id,
        user_id: m.user_id,
        student_id: m.student_id,
        program_id: m.program_id,
        department_id: m.department_id,
        level_id: m.level_id,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl AcademicRepositoryInterface for SeaOrmAcademicRepository {
    async fn upsert_department(&self, dto: UpsertDepartmentDto) -> DomainResult<Department> {
        let now = Utc::now();
        let existing = department::Entity::find()
            .filter(department::Column::DepartmentId.eq(dto.department_id.as_str()))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let saved = match existing {
            Some(model) => {
                let mut active: department::ActiveModel = model.into();
                active.name = Set(dto.name);
                active.description = Set(dto.description);
                active.updated_at = Set(now);
                active.update(&self.db).await.map_err(db_err)?
            }
            None => department::ActiveModel {
                id: Set(new_id()),
                department_id: Set(dto.department_id),
                name: Set(dto.name),
                description: Set(dto.description),
                created_at: Set(now),
                updated_at: Set(now),
            }
            .insert(&self.db)
            .await
            .map_err(db_err)?,
        };

        Ok(department_to_domain(saved))
    }

    async fn list_departments(&self) -> DomainResult<Vec<Department>> {
        let models = department::Entity::find()
            .order_by_asc(department::Column::DepartmentId)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(department_to_domain).collect())
    }

    async fn upsert_level(&self, dto: UpsertLevelDto) -> DomainResult<Level> {
        let now = Utc::now();
        let existing = level::Entity::find()
            .filter(level::Column::LevelId.eq(dto.level_id.as_str()))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let saved = match existing {
            Some(model) => {
                let mut active: level::ActiveModel = model.into();
                active.level_name = Set(dto.level_name);
                active.level_full_name = Set(dto.level_full_name);
                active.updated_at = Set(now);
                active.update(&self.db).await.map_err(db_err)?
            }
            None => level::ActiveModel {
                id: Set(new_id()),
                level_id: Set(dto.level_id),
                level_name: Set(dto.level_name),
                level_full_name: Set(dto.level_full_name),
                created_at: Set(now),
                updated_at: Set(now),
            }
            .insert(&self.db)
            .await
            .map_err(db_err)?,
        };

        Ok(level_to_domain(saved))
    }

    async fn list_levels(&self) -> DomainResult<Vec<Level>> {
        let models = level::Entity::find()
            .order_by_asc(level::Column::LevelId)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(level_to_domain).collect())
    }

    async fn upsert_program(&self, dto: UpsertProgramDto) -> DomainResult<Program> {
        let department_pk = self.department_pk(&dto.department).await?;
        let level_pk = match dto.level.as_deref() {
            Some(level) => Some(self.level_pk(level).await?),
            None => None,
        };

        let now = Utc::now();
        let existing = program::Entity::find()
            .filter(program::Column::ProgramId.eq(dto.program_id.as_str()))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let saved = match existing {
            Some(model) => {
                let mut active: program::ActiveModel = model.into();
                active.name = Set(dto.name);
                active.description = Set(dto.description);
                active.department_id = Set(department_pk);
                active.level_id = Set(level_pk);
                active.updated_at = Set(now);
                active.update(&self.db).await.map_err(db_err)?
            }
            None => program::ActiveModel {
                id: Set(new_id()),
                program_id: Set(dto.program_id),
                name: Set(dto.name),
                description: Set(dto.description),
                department_id: Set(department_pk),
                level_id: Set(level_pk),
                created_at: Set(now),
                updated_at: Set(now),
            }
            .insert(&self.db)
            .await
            .map_err(db_err)?,
        };

        Ok(program_to_domain(saved))
    }

    async fn list_programs(&self) -> DomainResult<Vec<Program>> {
        let models = program::Entity::find()
            .order_by_asc(program::Column::ProgramId)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(program_to_domain).collect())
    }

    async fn upsert_classroom(&self, dto: UpsertClassroomDto) -> DomainResult<Classroom> {
        let now = Utc::now();
        let existing = classroom::Entity::find()
            .filter(classroom::Column::Name.eq(dto.name.as_str()))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let saved = match existing {
            Some(model) => {
                let mut active: classroom::ActiveModel = model.into();
                active.description = Set(dto.description);
                active.updated_at = Set(now);
                active.update(&self.db).await.map_err(db_err)?
            }
            None => classroom::ActiveModel {
                id: Set(new_id()),
                name: Set(dto.name),
                description: Set(dto.description),
                created_at: Set(now),
                updated_at: Set(now),
            }
            .insert(&self.db)
            .await
            .map_err(db_err)?,
        };

        Ok(classroom_to_domain(saved))
    }

    async fn list_classrooms(&self) -> DomainResult<Vec<Classroom>> {
        let models = classroom::Entity::find()
            .order_by_asc(classroom::Column::Name)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(classroom_to_domain).collect())
    }

    async fn upsert_course(&self, dto: UpsertCourseDto) -> DomainResult<Course> {
        let program_pk = self.program_pk(&dto.program).await?;

        let now = Utc::now();
        let existing = course::Entity::find()
            .filter(course::Column::CourseId.eq(dto.course_id.as_str()))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let saved = match existing {
            Some(model) => {
                let mut active: course::ActiveModel = model.into();
                active.course_name = Set(dto.course_name);
                active.program_id = Set(program_pk);
                active.updated_at = Set(now);
                active.update(&self.db).await.map_err(db_err)?
            }
            None => course::ActiveModel {
                id: Set(new_id()),
                course_id: Set(dto.course_id),
                course_name: Set(dto.course_name),
                program_id: Set(program_pk),
                created_at: Set(now),
                updated_at: Set(now),
            }
            .insert(&self.db)
            .await
            .map_err(db_err)?,
        };

        Ok(course_to_domain(saved))
    }

    async fn list_courses(&self) -> DomainResult<Vec<Course>> {
        let models = course::Entity::find()
            .order_by_asc(course::Column::CourseId)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(course_to_domain).collect())
    }

    async fn upsert_teacher(&self, dto: UpsertTeacherDto) -> DomainResult<Teacher> {
        self.ensure_user(&dto.user_id).await?;
        let department_pk = match dto.department.as_deref() {
            Some(department) => Some(self.department_pk(department).await?),
            None => None,
        };

        let now = Utc::now();
        let existing = teacher::Entity::find()
            .filter(teacher::Column::UserId.eq(dto.user_id.as_str()))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let saved = match existing {
            Some(model) => {
                let mut active: teacher::ActiveModel = model.into();
                active.department_id = Set(department_pk);
                active.updated_at = Set(now);
                active.update(&self.db).await.map_err(db_err)?
            }
            None => teacher::ActiveModel {
                id: Set(new_id()),
                user_id: Set(dto.user_id),
                department_id: Set(department_pk),
                created_at: Set(now),
                updated_at: Set(now),
            }
            .insert(&self.db)
            .await
            .map_err(db_err)?,
        };

        Ok(teacher_to_domain(saved))
    }

    async fn list_teachers(&self) -> DomainResult<Vec<Teacher>> {
        let models = teacher::Entity::find()
            .order_by_asc(teacher::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(teacher_to_domain).collect())
    }

    async fn upsert_student(&self, dto: UpsertStudentDto) -> DomainResult<Student> {
        self.ensure_user(&dto.user_id).await?;
        let program_pk = self.program_pk(&dto.program).await?;
        let department_pk = self.department_pk(&dto.department).await?;
        let level_pk = self.level_pk(&dto.level).await?;

        let now = Utc::now();
        let existing = student::Entity::find()
            .filter(student::Column::StudentId.eq(dto.student_id.as_str()))
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let saved = match existing {
            Some(model) => {
                let mut active: student::ActiveModel = model.into();
                active.user_id = Set(dto.user_id);
                active.program_id = Set(program_pk);
                active.department_id = Set(department_pk);
                active.level_id = Set(level_pk);
                active.updated_at = Set(now);
                active.update(&self.db).await.map_err(db_err)?
            }
            None => student::ActiveModel {
                id: Set(new_id()),
                user_id: Set(dto.user_id),
                student_id: Set(dto.student_id),
                program_id: Set(program_pk),
                department_id: Set(department_pk),
                level_id: Set(level_pk),
                created_at: Set(now),
                updated_at: Set(now),
            }
            .insert(&self.db)
            .await
            .map_err(db_err)?,
        };

        Ok(student_to_domain(saved))
    }

    async fn list_students(&self) -> DomainResult<Vec<Student>> {
        let models = student::Entity::find()
            .order_by_asc(student::Column::StudentId)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(student_to_domain).collect())
    }
}
