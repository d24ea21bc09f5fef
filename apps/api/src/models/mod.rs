pub mod announcement;
pub mod career;
pub mod leave;
pub mod people;
pub mod recruitment;
