use crate::domain::model::{Course, CourseCode, Student, StudentId};
use crate::utils::error::Result;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StudentDirectory: Send + Sync {
    async fn find_by_id(&self, id: &StudentId) -> Result<Option<Student>>;
}

/// Course lookups and persistence.
///
/// `update` is the serialization point for seat counts: implementations must
/// reject a write whose `revision` no longer matches the stored course, and
/// must never store a course with `enrolled > capacity`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseCatalog: Send + Sync {
    async fn find_by_code(&self, code: &CourseCode) -> Result<Option<Course>>;

    async fn is_prerequisite_met(&self, student_id: &StudentId, code: &CourseCode) -> Result<bool>;

    async fn update(&self, course: &Course) -> Result<()>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationGateway: Send + Sync {
    async fn send_email(&self, address: &str, subject: &str, body: &str) -> Result<()>;
}

#[cfg_attr(test, mockall::automock)]
pub trait CreditPolicy: Send + Sync {
    fn calculate_max_credits(&self, gpa: f64) -> u32;
}
