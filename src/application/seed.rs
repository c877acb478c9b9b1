//! Sample data for a fresh installation.
//!
//! Every step upserts by natural key, so running the seed again converges
//! to the same rows instead of duplicating them.

use tracing::info;

use crate::domain::{
    Action, CreateUserDto, DomainResult, PermissionMap, RepositoryProvider, UpsertAccountDto,
    UpsertClassroomDto, UpsertCourseDto, UpsertDepartmentDto, UpsertLevelDto, UpsertProgramDto,
    UpsertRolePermissionDto, UpsertStudentDto, UpsertTeacherDto, User, UserRole,
};

/// bcrypt (`$2a$`, cost 10) of `password`, shared by all sample users.
pub const SEED_PASSWORD_HASH: &str = "$2a$10$92IXUNpkjO0rOQ5byMi.Ye4oKoEa3Ro9llC/.og/at2.uheWG/igi";

/// What the seed wrote, for the CLI summary line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub roles: usize,
    pub users: usize,
    pub accounts: usize,
    pub academic_records: usize,
}

fn permissions(entries: &[(&str, &[Action])]) -> PermissionMap {
    entries
        .iter()
        .map(|(resource, actions)| (resource.to_string(), actions.iter().copied().collect()))
        .collect()
}

fn admin_permissions() -> PermissionMap {
    use Action::*;
    let crud: &[Action] = &[Create, Read, Update, Delete];
    permissions(&[
        ("users", crud),
        ("students", crud),
        ("teachers", crud),
        ("reports", crud),
        ("system", &[Manage]),
    ])
}

fn teacher_permissions() -> PermissionMap {
    use Action::*;
    permissions(&[
        ("students", &[Read, Update]),
        ("reports", &[Create, Read, Update]),
        ("attendance", &[Create, Read, Update]),
        ("grades", &[Create, Read, Update]),
    ])
}

async fn seed_user(
    repos: &dyn RepositoryProvider,
    username: &str,
    name: &str,
    role: UserRole,
) -> DomainResult<User> {
    repos
        .users()
        .upsert_by_username(CreateUserDto {
            name: name.to_string(),
            email: format!("{}@msl.ac.th", username),
            username: Some(username.to_string()),
            password_hash: SEED_PASSWORD_HASH.to_string(),
            role,
        })
        .await
}

async fn seed_account(
    repos: &dyn RepositoryProvider,
    user: &User,
    first_name: &str,
    last_name: &str,
    address: &str,
) -> DomainResult<()> {
    repos
        .accounts()
        .upsert_by_user(UpsertAccountDto {
            user_id: user.id.clone(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            address_line1: Some(address.to_string()),
            address_line2: None,
        })
        .await?;
    Ok(())
}

pub async fn run_seed(repos: &dyn RepositoryProvider) -> DomainResult<SeedSummary> {
    info!("Starting database seed");

    info!("Seeding role permissions");
    repos
        .role_permissions()
        .upsert_by_name(UpsertRolePermissionDto {
            name: "admin".into(),
            label: "ผู้ดูแลระบบ".into(),
            permissions: admin_permissions(),
        })
        .await?;
    repos
        .role_permissions()
        .upsert_by_name(UpsertRolePermissionDto {
            name: "teacher".into(),
            label: "ครู".into(),
            permissions: teacher_permissions(),
        })
        .await?;

    info!("Seeding academic structure");
    let academics = repos.academics();
    academics
        .upsert_department(UpsertDepartmentDto {
            department_id: "DEPT001".into(),
            name: "มัธยมศึกษา".into(),
            description: Some("แผนกมัธยมศึกษา".into()),
        })
        .await?;
    academics
        .upsert_level(UpsertLevelDto {
            level_id: "LV001".into(),
            level_name: "ม.1".into(),
            level_full_name: Some("มัธยมศึกษาปีที่ 1".into()),
        })
        .await?;
    academics
        .upsert_program(UpsertProgramDto {
            program_id: "PROG001".into(),
            name: "วิทย์-คณิต".into(),
            description: Some("แผนการเรียนวิทยาศาสตร์-คณิตศาสตร์".into()),
            department: "DEPT001".into(),
            level: Some("LV001".into()),
        })
        .await?;
    academics
        .upsert_classroom(UpsertClassroomDto {
            name: "1/1".into(),
            description: Some("ห้องเรียน 1/1".into()),
        })
        .await?;

    info!("Seeding users");
    let admin = seed_user(repos, "admin", "ผู้ดูแล ระบบ", UserRole::Admin).await?;
    let teacher = seed_user(repos, "teacher1", "สมชาย ใจดี", UserRole::Teacher).await?;
    let student = seed_user(repos, "student1", "สมใจ เรียนดี", UserRole::User).await?;

    info!("Seeding accounts and profiles");
    seed_account(repos, &admin, "ผู้ดูแล", "ระบบ", "โรงเรียนมัธยมศึกษาลาดพร้าว").await?;
    seed_account(repos, &teacher, "สมชาย", "ใจดี", "123 ถ.ลาดพร้าว กรุงเทพฯ").await?;
    seed_account(repos, &student, "สมใจ", "เรียนดี", "456 ถ.รัชดา กรุงเทพฯ").await?;

    academics
        .upsert_teacher(UpsertTeacherDto {
            user_id: teacher.id.clone(),
            department: Some("DEPT001".into()),
        })
        .await?;
    academics
        .upsert_student(UpsertStudentDto {
            user_id: student.id.clone(),
            student_id: "S2568001".into(),
            program: "PROG001".into(),
            department: "DEPT001".into(),
            level: "LV001".into(),
        })
        .await?;

    info!("Seeding courses");
    academics
        .upsert_course(UpsertCourseDto {
            course_id: "MATH101".into(),
            course_name: "คณิตศาสตร์ พื้นฐาน".into(),
            program: "PROG001".into(),
        })
        .await?;

    let summary = SeedSummary {
        roles: 2,
        users: 3,
        accounts: 3,
        academic_records: 7,
    };
    info!(?summary, "Database seed completed (users: admin, teacher1, student1)");
    Ok(summary)
}
