use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentId(String);

impl StudentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseCode(String);

impl CourseCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CourseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AcademicStatus {
    Active,
    Suspended,
    Graduated,
    Leave,
}

impl AcademicStatus {
    /// Only active students may take on new enrollments.
    pub fn may_enroll(self) -> bool {
        match self {
            AcademicStatus::Active => true,
            AcademicStatus::Suspended | AcademicStatus::Graduated | AcademicStatus::Leave => false,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AcademicStatus::Active => "ACTIVE",
            AcademicStatus::Suspended => "SUSPENDED",
            AcademicStatus::Graduated => "GRADUATED",
            AcademicStatus::Leave => "LEAVE",
        }
    }
}

impl fmt::Display for AcademicStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    pub email: String,
    pub status: AcademicStatus,
    pub gpa: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub code: CourseCode,
    pub name: String,
    pub capacity: u32,
    pub enrolled: u32,
    pub credits: u32,
    /// Concurrency token owned by the catalog. Services pass it back untouched.
    pub revision: u64,
}

impl Course {
    pub fn has_free_seat(&self) -> bool {
        self.enrolled < self.capacity
    }

    pub fn seats_left(&self) -> u32 {
        self.capacity.saturating_sub(self.enrolled)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EnrollmentStatus {
    Approved,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrollment {
    pub student_id: StudentId,
    pub course_code: CourseCode,
    pub status: EnrollmentStatus,
    pub created_at: DateTime<Utc>,
}

impl Enrollment {
    pub fn approved(student_id: StudentId, course_code: CourseCode) -> Self {
        Self {
            student_id,
            course_code,
            status: EnrollmentStatus::Approved,
            created_at: Utc::now(),
        }
    }
}
