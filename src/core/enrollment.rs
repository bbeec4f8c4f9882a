use crate::domain::model::{Course, CourseCode, Enrollment, Student, StudentId};
use crate::domain::ports::{CourseCatalog, CreditPolicy, NotificationGateway, StudentDirectory};
use crate::utils::error::{EnrollmentError, Result};
use std::sync::Arc;

pub const ENROLLMENT_SUBJECT: &str = "Enrollment Confirmation";
pub const DROP_SUBJECT: &str = "Drop Confirmation";

/// Enrollment rule chain over the four collaborator ports.
///
/// Every workflow resolves its inputs, runs its gates in a fixed order and
/// only then touches the course or the notifier, so a rejected request leaves
/// no trace. Seat-count races are settled by [`CourseCatalog::update`]; the
/// service does not retry a rejected write.
pub struct EnrollmentService<S, C, N, P>
where
    S: StudentDirectory,
    C: CourseCatalog,
    N: NotificationGateway,
    P: CreditPolicy,
{
    students: Arc<S>,
    courses: Arc<C>,
    notifier: Arc<N>,
    credit_policy: Arc<P>,
}

impl<S, C, N, P> EnrollmentService<S, C, N, P>
where
    S: StudentDirectory,
    C: CourseCatalog,
    N: NotificationGateway,
    P: CreditPolicy,
{
    pub fn new(students: Arc<S>, courses: Arc<C>, notifier: Arc<N>, credit_policy: Arc<P>) -> Self {
        Self {
            students,
            courses,
            notifier,
            credit_policy,
        }
    }

    pub async fn enroll_course(
        &self,
        student_id: &StudentId,
        course_code: &CourseCode,
    ) -> Result<Enrollment> {
        let student = self.load_student(student_id).await?;

        if !student.status.may_enroll() {
            tracing::warn!(%student_id, status = %student.status, "Enrollment refused: student not active");
            return Err(EnrollmentError::EnrollmentNotPermitted {
                student_id: student_id.to_string(),
                status: student.status.to_string(),
            });
        }

        let mut course = self.load_course(course_code).await?;

        if !course.has_free_seat() {
            tracing::warn!(%course_code, capacity = course.capacity, "Enrollment refused: course full");
            return Err(EnrollmentError::CourseFull {
                course_code: course_code.to_string(),
                capacity: course.capacity,
            });
        }

        if !self.courses.is_prerequisite_met(student_id, course_code).await? {
            tracing::warn!(%student_id, %course_code, "Enrollment refused: prerequisites not met");
            return Err(EnrollmentError::PrerequisiteNotMet {
                student_id: student_id.to_string(),
                course_code: course_code.to_string(),
            });
        }

        course.enrolled += 1;
        self.courses.update(&course).await?;

        let enrollment = Enrollment::approved(student.id.clone(), course.code.clone());

        self.notifier
            .send_email(
                &student.email,
                &format!("{}: {}", ENROLLMENT_SUBJECT, course.code),
                &format!(
                    "You have been enrolled in {} ({}). Seats taken: {}/{}.",
                    course.name, course.code, course.enrolled, course.capacity
                ),
            )
            .await?;

        tracing::info!(
            %student_id,
            %course_code,
            enrolled = course.enrolled,
            capacity = course.capacity,
            "Enrollment approved"
        );
        Ok(enrollment)
    }

    pub async fn drop_course(&self, student_id: &StudentId, course_code: &CourseCode) -> Result<()> {
        let student = self.load_student(student_id).await?;
        let mut course = self.load_course(course_code).await?;

        if course.enrolled == 0 {
            tracing::warn!(%student_id, %course_code, "Dropping from a course with no enrolled students");
        }
        course.enrolled = course.enrolled.saturating_sub(1);
        self.courses.update(&course).await?;

        self.notifier
            .send_email(
                &student.email,
                &format!("{}: {}", DROP_SUBJECT, course.code),
                &format!("You have dropped {} ({}).", course.name, course.code),
            )
            .await?;

        tracing::info!(%student_id, %course_code, enrolled = course.enrolled, "Course dropped");
        Ok(())
    }

    pub async fn validate_credit_limit(
        &self,
        student_id: &StudentId,
        requested_credits: u32,
    ) -> Result<bool> {
        let student = self.load_student(student_id).await?;
        let max_credits = self.credit_policy.calculate_max_credits(student.gpa);
        let within_limit = requested_credits <= max_credits;

        tracing::debug!(
            %student_id,
            gpa = student.gpa,
            requested_credits,
            max_credits,
            within_limit,
            "Credit limit checked"
        );
        Ok(within_limit)
    }

    async fn load_student(&self, student_id: &StudentId) -> Result<Student> {
        tracing::debug!(%student_id, "Resolving student");
        self.students
            .find_by_id(student_id)
            .await?
            .ok_or_else(|| EnrollmentError::StudentNotFound {
                student_id: student_id.to_string(),
            })
    }

    async fn load_course(&self, course_code: &CourseCode) -> Result<Course> {
        tracing::debug!(%course_code, "Resolving course");
        self.courses
            .find_by_code(course_code)
            .await?
            .ok_or_else(|| EnrollmentError::CourseNotFound {
                course_code: course_code.to_string(),
            })
    }
}
