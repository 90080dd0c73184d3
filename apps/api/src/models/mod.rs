pub mod application;
pub mod exam;
pub mod job;
pub mod record;
pub mod user;

pub use application::{Application, ApplicationStatus};
pub use exam::{Decision, ExamResult};
pub use job::{Job, JobStatus};
pub use record::{Lifecycle, Record};
pub use user::User;
