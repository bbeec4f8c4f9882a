pub mod enrollment;

pub use crate::domain::model::{
    AcademicStatus, Course, CourseCode, Enrollment, EnrollmentStatus, Student, StudentId,
};
pub use crate::domain::ports::{CourseCatalog, CreditPolicy, NotificationGateway, StudentDirectory};
pub use crate::utils::error::Result;
