pub mod course;
pub mod profile;
pub mod session;
pub mod sync_log;

pub use course::{Course, CourseDraft, CourseInsert, CourseUpdate, Embedding};
pub use profile::Role;
pub use session::SessionState;
pub use sync_log::SyncLogEntry;
