//! Database entities module

pub mod account;
pub mod classroom;
pub mod course;
pub mod department;
pub mod level;
pub mod program;
pub mod role_permission;
pub mod session;
pub mod student;
pub mod teacher;
pub mod user;

pub use account::Entity as Account;
pub use classroom::Entity as Classroom;
pub use course::Entity as Course;
pub use department::Entity as Department;
pub use level::Entity as Level;
pub use program::Entity as Program;
pub use role_permission::Entity as RolePermission;
pub use session::Entity as Session;
pub use student::Entity as Student;
pub use teacher::Entity as Teacher;
pub use user::Entity as User;
