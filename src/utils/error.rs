use thiserror::Error;

#[derive(Error, Debug)]
pub enum EnrollmentError {
    #[error("Student not found: {student_id}")]
    StudentNotFound { student_id: String },

    #[error("Course not found: {course_code}")]
    CourseNotFound { course_code: String },

    #[error("Enrollment not permitted for student {student_id}: academic status is {status}")]
    EnrollmentNotPermitted { student_id: String, status: String },

    #[error("Course {course_code} is full ({capacity} seats taken)")]
    CourseFull { course_code: String, capacity: u32 },

    #[error("Prerequisites not met for course {course_code} by student {student_id}")]
    PrerequisiteNotMet {
        student_id: String,
        course_code: String,
    },

    #[error("Repository error: {message}")]
    RepositoryError { message: String },

    #[error("Concurrent update conflict on course {course_code}: expected revision {expected}, found {actual}")]
    CatalogConflict {
        course_code: String,
        expected: u64,
        actual: u64,
    },

    #[error("Course invariant violated for {course_code}: {reason}")]
    InvariantViolation { course_code: String, reason: String },

    #[error("Notification delivery failed: {message}")]
    NotificationError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Rule,
    NotFound,
    Collaborator,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl EnrollmentError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EnrollmentError::EnrollmentNotPermitted { .. }
            | EnrollmentError::CourseFull { .. }
            | EnrollmentError::PrerequisiteNotMet { .. } => ErrorCategory::Rule,
            EnrollmentError::StudentNotFound { .. } | EnrollmentError::CourseNotFound { .. } => {
                ErrorCategory::NotFound
            }
            EnrollmentError::RepositoryError { .. }
            | EnrollmentError::CatalogConflict { .. }
            | EnrollmentError::InvariantViolation { .. }
            | EnrollmentError::NotificationError { .. } => ErrorCategory::Collaborator,
            EnrollmentError::IoError(_)
            | EnrollmentError::SerializationError(_)
            | EnrollmentError::ConfigError { .. }
            | EnrollmentError::InvalidConfigValueError { .. }
            | EnrollmentError::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            EnrollmentError::CatalogConflict { .. } => ErrorSeverity::Medium,
            EnrollmentError::InvariantViolation { .. } | EnrollmentError::IoError(_) => {
                ErrorSeverity::Critical
            }
            _ => match self.category() {
                ErrorCategory::Rule | ErrorCategory::NotFound => ErrorSeverity::Low,
                ErrorCategory::Collaborator => ErrorSeverity::High,
                ErrorCategory::Configuration => ErrorSeverity::High,
            },
        }
    }

    /// True for the outcomes a caller is expected to branch on: the student or
    /// course does not exist, or a rule gate rejected the request.
    pub fn is_rule_rejection(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Rule | ErrorCategory::NotFound
        )
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            EnrollmentError::StudentNotFound { .. } => {
                "Check the student identifier against the roster".to_string()
            }
            EnrollmentError::CourseNotFound { .. } => {
                "Check the course code against the catalog".to_string()
            }
            EnrollmentError::EnrollmentNotPermitted { .. } => {
                "Contact the registrar to restore an active academic status".to_string()
            }
            EnrollmentError::CourseFull { .. } => {
                "Pick another offering or wait for a seat to open".to_string()
            }
            EnrollmentError::PrerequisiteNotMet { .. } => {
                "Complete the prerequisite courses first".to_string()
            }
            EnrollmentError::CatalogConflict { .. } => {
                "The course changed concurrently; retry the request".to_string()
            }
            EnrollmentError::RepositoryError { .. } | EnrollmentError::InvariantViolation { .. } => {
                "Check the course catalog backend".to_string()
            }
            EnrollmentError::NotificationError { .. } => {
                "Check the notification gateway; the seat change was already persisted".to_string()
            }
            EnrollmentError::IoError(_) => "Make sure the roster file exists and is readable".to_string(),
            EnrollmentError::SerializationError(_) => "Report this as a bug".to_string(),
            EnrollmentError::ConfigError { .. }
            | EnrollmentError::InvalidConfigValueError { .. }
            | EnrollmentError::MissingConfigError { .. } => {
                "Fix the roster file and try again".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            EnrollmentError::StudentNotFound { student_id } => {
                format!("No student with id {}", student_id)
            }
            EnrollmentError::CourseNotFound { course_code } => {
                format!("No course with code {}", course_code)
            }
            EnrollmentError::EnrollmentNotPermitted { status, .. } => {
                format!("Enrollment refused: student status is {}", status)
            }
            EnrollmentError::CourseFull { course_code, .. } => {
                format!("Enrollment refused: {} has no free seats", course_code)
            }
            EnrollmentError::PrerequisiteNotMet { course_code, .. } => {
                format!("Enrollment refused: prerequisites for {} are not met", course_code)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EnrollmentError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_errors_are_low_severity_rejections() {
        let err = EnrollmentError::CourseFull {
            course_code: "CS101".to_string(),
            capacity: 10,
        };
        assert_eq!(err.category(), ErrorCategory::Rule);
        assert_eq!(err.severity(), ErrorSeverity::Low);
        assert!(err.is_rule_rejection());
        assert!(err.user_friendly_message().contains("CS101"));
    }

    #[test]
    fn test_collaborator_errors_are_not_rejections() {
        let err = EnrollmentError::CatalogConflict {
            course_code: "CS101".to_string(),
            expected: 1,
            actual: 2,
        };
        assert_eq!(err.category(), ErrorCategory::Collaborator);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert!(!err.is_rule_rejection());
    }

    #[test]
    fn test_config_error_from_io() {
        let err: EnrollmentError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "roster.toml").into();
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
    }
}
