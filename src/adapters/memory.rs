use crate::core::{Course, CourseCatalog, CourseCode, Student, StudentDirectory, StudentId};
use crate::utils::error::{EnrollmentError, Result};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use tokio::sync::Mutex;

#[derive(Debug, Default)]
pub struct InMemoryStudentDirectory {
    students: Mutex<HashMap<StudentId, Student>>,
}

impl InMemoryStudentDirectory {
    pub fn new(students: impl IntoIterator<Item = Student>) -> Self {
        Self {
            students: Mutex::new(
                students
                    .into_iter()
                    .map(|student| (student.id.clone(), student))
                    .collect(),
            ),
        }
    }
}

#[async_trait]
impl StudentDirectory for InMemoryStudentDirectory {
    async fn find_by_id(&self, id: &StudentId) -> Result<Option<Student>> {
        let students = self.students.lock().await;
        Ok(students.get(id).cloned())
    }
}

#[derive(Debug, Default)]
struct CatalogState {
    courses: HashMap<CourseCode, Course>,
    prerequisites: HashMap<CourseCode, Vec<CourseCode>>,
    completed: HashMap<StudentId, HashSet<CourseCode>>,
}

/// Course catalog held in memory.
///
/// Writes are compare-and-swap on [`Course::revision`]: a course read before a
/// concurrent write can no longer be stored, so two callers racing for the
/// last seat cannot both succeed.
#[derive(Debug, Default)]
pub struct InMemoryCourseCatalog {
    state: Mutex<CatalogState>,
}

impl InMemoryCourseCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_course(&self, course: Course, prerequisites: Vec<CourseCode>) {
        let mut state = self.state.lock().await;
        if !prerequisites.is_empty() {
            state.prerequisites.insert(course.code.clone(), prerequisites);
        }
        state.courses.insert(course.code.clone(), course);
    }

    pub async fn record_completion(&self, student_id: StudentId, code: CourseCode) {
        let mut state = self.state.lock().await;
        state.completed.entry(student_id).or_default().insert(code);
    }

    /// Snapshot of every course, ordered by code.
    pub async fn courses(&self) -> Vec<Course> {
        let state = self.state.lock().await;
        let mut courses: Vec<Course> = state.courses.values().cloned().collect();
        courses.sort_by(|a, b| a.code.cmp(&b.code));
        courses
    }
}

#[async_trait]
impl CourseCatalog for InMemoryCourseCatalog {
    async fn find_by_code(&self, code: &CourseCode) -> Result<Option<Course>> {
        let state = self.state.lock().await;
        Ok(state.courses.get(code).cloned())
    }

    async fn is_prerequisite_met(&self, student_id: &StudentId, code: &CourseCode) -> Result<bool> {
        let state = self.state.lock().await;
        let Some(required) = state.prerequisites.get(code) else {
            return Ok(true);
        };

        let completed = state.completed.get(student_id);
        Ok(required
            .iter()
            .all(|prerequisite| completed.is_some_and(|done| done.contains(prerequisite))))
    }

    async fn update(&self, course: &Course) -> Result<()> {
        if course.enrolled > course.capacity {
            return Err(EnrollmentError::InvariantViolation {
                course_code: course.code.to_string(),
                reason: format!(
                    "enrolled count {} exceeds capacity {}",
                    course.enrolled, course.capacity
                ),
            });
        }

        let mut state = self.state.lock().await;
        let stored = state
            .courses
            .get_mut(&course.code)
            .ok_or_else(|| EnrollmentError::RepositoryError {
                message: format!("cannot update unknown course {}", course.code),
            })?;

        if stored.revision != course.revision {
            tracing::debug!(
                course_code = %course.code,
                expected = course.revision,
                actual = stored.revision,
                "Rejecting stale course write"
            );
            return Err(EnrollmentError::CatalogConflict {
                course_code: course.code.to_string(),
                expected: course.revision,
                actual: stored.revision,
            });
        }

        *stored = Course {
            revision: course.revision + 1,
            ..course.clone()
        };
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::AcademicStatus;

    fn course(code: &str, capacity: u32, enrolled: u32) -> Course {
        Course {
            code: CourseCode::new(code),
            name: format!("{} course", code),
            capacity,
            enrolled,
            credits: 3,
            revision: 0,
        }
    }

    #[tokio::test]
    async fn test_directory_lookup() {
        let directory = InMemoryStudentDirectory::new(vec![Student {
            id: StudentId::new("STU001"),
            email: "student@test.com".to_string(),
            status: AcademicStatus::Active,
            gpa: 3.2,
        }]);

        let found = directory.find_by_id(&StudentId::new("STU001")).await.unwrap();
        assert_eq!(found.unwrap().email, "student@test.com");
        assert!(directory
            .find_by_id(&StudentId::new("STU404"))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_update_bumps_revision() {
        let catalog = InMemoryCourseCatalog::new();
        catalog.add_course(course("CS101", 30, 10), vec![]).await;

        let mut loaded = catalog
            .find_by_code(&CourseCode::new("CS101"))
            .await
            .unwrap()
            .unwrap();
        loaded.enrolled += 1;
        catalog.update(&loaded).await.unwrap();

        let stored = catalog
            .find_by_code(&CourseCode::new("CS101"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.enrolled, 11);
        assert_eq!(stored.revision, 1);
    }

    #[tokio::test]
    async fn test_stale_update_is_rejected() {
        let catalog = InMemoryCourseCatalog::new();
        catalog.add_course(course("CS101", 30, 10), vec![]).await;
        let code = CourseCode::new("CS101");

        let mut first = catalog.find_by_code(&code).await.unwrap().unwrap();
        let mut second = first.clone();

        first.enrolled += 1;
        catalog.update(&first).await.unwrap();

        second.enrolled += 1;
        let err = catalog.update(&second).await.unwrap_err();
        assert!(matches!(
            err,
            EnrollmentError::CatalogConflict {
                expected: 0,
                actual: 1,
                ..
            }
        ));

        let stored = catalog.find_by_code(&code).await.unwrap().unwrap();
        assert_eq!(stored.enrolled, 11);
    }

    #[tokio::test]
    async fn test_update_refuses_overfull_course() {
        let catalog = InMemoryCourseCatalog::new();
        catalog.add_course(course("CS101", 10, 10), vec![]).await;

        let mut overfull = course("CS101", 10, 10);
        overfull.enrolled = 11;
        let err = catalog.update(&overfull).await.unwrap_err();
        assert!(matches!(err, EnrollmentError::InvariantViolation { .. }));
    }

    #[tokio::test]
    async fn test_update_unknown_course() {
        let catalog = InMemoryCourseCatalog::new();
        let err = catalog.update(&course("CS999", 10, 1)).await.unwrap_err();
        assert!(matches!(err, EnrollmentError::RepositoryError { .. }));
    }

    #[tokio::test]
    async fn test_prerequisites() {
        let catalog = InMemoryCourseCatalog::new();
        catalog.add_course(course("CS100", 30, 0), vec![]).await;
        catalog
            .add_course(course("CS201", 30, 0), vec![CourseCode::new("CS100")])
            .await;

        let student = StudentId::new("STU001");
        assert!(catalog
            .is_prerequisite_met(&student, &CourseCode::new("CS100"))
            .await
            .unwrap());
        assert!(!catalog
            .is_prerequisite_met(&student, &CourseCode::new("CS201"))
            .await
            .unwrap());

        catalog
            .record_completion(student.clone(), CourseCode::new("CS100"))
            .await;
        assert!(catalog
            .is_prerequisite_met(&student, &CourseCode::new("CS201"))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_courses_sorted_by_code() {
        let catalog = InMemoryCourseCatalog::new();
        catalog.add_course(course("MA101", 30, 0), vec![]).await;
        catalog.add_course(course("CS101", 30, 0), vec![]).await;

        let codes: Vec<String> = catalog
            .courses()
            .await
            .into_iter()
            .map(|c| c.code.to_string())
            .collect();
        assert_eq!(codes, vec!["CS101", "MA101"]);
    }
}
