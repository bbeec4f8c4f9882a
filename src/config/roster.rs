use crate::adapters::{
    CreditTier, InMemoryCourseCatalog, InMemoryStudentDirectory, TieredCreditPolicy,
};
use crate::core::{AcademicStatus, Course, CourseCode, Student, StudentId};
use crate::utils::error::{EnrollmentError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

pub const MAX_GPA: f64 = 4.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterConfig {
    pub roster: RosterInfo,
    #[serde(default)]
    pub students: Vec<StudentEntry>,
    #[serde(default)]
    pub courses: Vec<CourseEntry>,
    pub credit_policy: Option<CreditPolicyConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterInfo {
    pub name: String,
    pub term: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentEntry {
    pub id: String,
    pub email: String,
    pub status: AcademicStatus,
    pub gpa: f64,
    #[serde(default)]
    pub completed_courses: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseEntry {
    pub code: String,
    pub name: String,
    pub capacity: u32,
    #[serde(default)]
    pub enrolled: u32,
    #[serde(default)]
    pub credits: u32,
    #[serde(default)]
    pub prerequisites: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditPolicyConfig {
    pub default_max_credits: u32,
    #[serde(default)]
    pub tiers: Vec<CreditTier>,
}

/// Adapters seeded from a roster file.
#[derive(Debug)]
pub struct RosterAdapters {
    pub students: InMemoryStudentDirectory,
    pub courses: InMemoryCourseCatalog,
    pub credit_policy: TieredCreditPolicy,
}

impl RosterConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| EnrollmentError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| EnrollmentError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("roster.name", &self.roster.name)?;

        validation::validate_unique("students.id", self.students.iter().map(|s| &s.id))?;
        validation::validate_unique("courses.code", self.courses.iter().map(|c| &c.code))?;

        let known_courses: HashSet<&str> = self.courses.iter().map(|c| c.code.as_str()).collect();

        for student in &self.students {
            validation::validate_non_empty_string("students.id", &student.id)?;
            validation::validate_email("students.email", &student.email)?;
            validation::validate_range("students.gpa", student.gpa, 0.0, MAX_GPA)?;
        }

        for course in &self.courses {
            validation::validate_non_empty_string("courses.code", &course.code)?;
            validation::validate_non_empty_string("courses.name", &course.name)?;
            validation::validate_positive_number("courses.capacity", course.capacity, 1)?;
            if course.enrolled > course.capacity {
                return Err(EnrollmentError::InvalidConfigValueError {
                    field: "courses.enrolled".to_string(),
                    value: course.enrolled.to_string(),
                    reason: format!(
                        "Course {} cannot enroll more than its capacity of {}",
                        course.code, course.capacity
                    ),
                });
            }
            for prerequisite in &course.prerequisites {
                if prerequisite == &course.code || !known_courses.contains(prerequisite.as_str()) {
                    return Err(EnrollmentError::InvalidConfigValueError {
                        field: "courses.prerequisites".to_string(),
                        value: prerequisite.clone(),
                        reason: format!("Not a valid prerequisite for {}", course.code),
                    });
                }
            }
        }

        let policy = validation::validate_required_field("credit_policy", &self.credit_policy)?;
        for tier in &policy.tiers {
            validation::validate_range("credit_policy.tiers.min_gpa", tier.min_gpa, 0.0, MAX_GPA)?;
        }

        Ok(())
    }

    pub fn term(&self) -> &str {
        self.roster.term.as_deref().unwrap_or("unspecified")
    }

    /// Seeds the in-memory adapters. Call [`Validate::validate`] first.
    pub async fn into_adapters(self) -> Result<RosterAdapters> {
        let policy = self
            .credit_policy
            .ok_or_else(|| EnrollmentError::MissingConfigError {
                field: "credit_policy".to_string(),
            })?;

        let courses = InMemoryCourseCatalog::new();
        for entry in self.courses {
            let prerequisites = entry.prerequisites.into_iter().map(CourseCode::new).collect();
            let course = Course {
                code: CourseCode::new(entry.code),
                name: entry.name,
                capacity: entry.capacity,
                enrolled: entry.enrolled,
                credits: entry.credits,
                revision: 0,
            };
            courses.add_course(course, prerequisites).await;
        }

        let mut students = Vec::with_capacity(self.students.len());
        for entry in self.students {
            let id = StudentId::new(entry.id);
            for code in entry.completed_courses {
                courses.record_completion(id.clone(), CourseCode::new(code)).await;
            }
            students.push(Student {
                id,
                email: entry.email,
                status: entry.status,
                gpa: entry.gpa,
            });
        }

        Ok(RosterAdapters {
            students: InMemoryStudentDirectory::new(students),
            courses,
            credit_policy: TieredCreditPolicy::new(policy.default_max_credits, policy.tiers),
        })
    }
}

impl Validate for RosterConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
