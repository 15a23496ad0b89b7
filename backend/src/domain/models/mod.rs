pub mod subject;
pub mod user;

pub use subject::{Subject, SubjectId};
pub use user::User;
