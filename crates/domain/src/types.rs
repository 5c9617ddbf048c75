//! Data types exchanged with the course portal API

pub mod course;
pub mod envelope;
pub mod session;
pub mod topic;
pub mod user;

pub use course::{
    CatalogQuery, Course, CourseDraft, CourseModule, CoursePage, CourseSummary, CourseVideo,
    Enrollment, EnrollmentStatus, ModuleDraft, SortDirection, VideoDraft,
};
pub use envelope::Envelope;
pub use session::{Session, TokenPair};
pub use topic::{Topic, TopicDraft};
pub use user::{ProfileUpdate, RegisterRequest, RegisterResponse, UploadFile, UserInfo};
