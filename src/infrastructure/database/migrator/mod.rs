//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20250101_000001_create_users;
mod m20250101_000002_create_sessions;
mod m20250101_000003_create_accounts;
mod m20250101_000004_create_role_permissions;
mod m20250101_000005_create_departments;
mod m20250101_000006_create_levels;
mod m20250101_000007_create_programs;
mod m20250101_000008_create_classrooms;
mod m20250101_000009_create_courses;
mod m20250101_000010_create_teachers;
mod m20250101_000011_create_students;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_users::Migration),
            Box::new(m20250101_000002_create_sessions::Migration),
            Box::new(m20250101_000003_create_accounts::Migration),
            Box::new(m20250101_000004_create_role_permissions::Migration),
            Box::new(m20250101_000005_create_departments::Migration),
            Box::new(m20250101_000006_create_levels::Migration),
            Box::new(m20250101_000007_create_programs::Migration),
            Box::new(m20250101_000008_create_classrooms::Migration),
            Box::new(m20250101_000009_create_courses::Migration),
            Box::new(m20250101_000010_create_teachers::Migration),
            Box::new(m20250101_000011_create_students::Migration),
        ]
    }
}
