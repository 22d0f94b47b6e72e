use axum::http::Method;
use serde::Deserialize;
use thiserror::Error;

use crate::{error::AppResult, store::EnrollmentCounter};

/// Kind of request a course write goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Replace,
    Patch,
    Read,
    Delete,
}

impl Operation {
    pub fn from_method(method: &Method) -> Option<Self> {
        match *method {
            Method::POST => Some(Operation::Create),
            Method::PUT => Some(Operation::Replace),
            Method::PATCH => Some(Operation::Patch),
            Method::GET | Method::HEAD => Some(Operation::Read),
            Method::DELETE => Some(Operation::Delete),
            _ => None,
        }
    }

    /// Create, replace and patch may add enrollments; reads and deletes never do.
    pub fn is_write(self) -> bool {
        matches!(
            self,
            Operation::Create | Operation::Replace | Operation::Patch
        )
    }
}

/// How the enrolled count is compared against the cap.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CapPolicy {
    /// Reject when the stored count for the course name is already at or
    /// above the cap. The students carried by the write are not counted.
    #[default]
    Existing,
    /// Reject when the stored count for the course name (without the course
    /// being written) plus the students the write leaves on it exceeds the cap.
    Projected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnrollmentCap {
    pub max_students: i64,
    pub policy: CapPolicy,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Enrollment cap exceeded: course '{course}' has {enrolled} student(s), the limit is {cap}")]
pub struct CapExceeded {
    pub course: String,
    pub enrolled: i64,
    pub cap: i64,
}

/// The course state a write would produce.
#[derive(Debug, Clone, Copy)]
pub struct ProposedCourse<'a> {
    pub name: &'a str,
    /// Set for updates so the projected count does not see the course twice.
    pub course_id: Option<i32>,
    /// Number of distinct students the course holds after the write.
    pub students: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct EnrollmentCapValidator {
    cap: EnrollmentCap,
}

impl EnrollmentCapValidator {
    pub fn new(cap: EnrollmentCap) -> Self {
        Self { cap }
    }

    pub fn cap(&self) -> EnrollmentCap {
        self.cap
    }

    pub fn validate<C>(
        &self,
        counter: &C,
        proposed: &ProposedCourse<'_>,
        operation: Operation,
    ) -> AppResult<()>
    where
        C: EnrollmentCounter + ?Sized,
    {
        if !operation.is_write() {
            return Ok(());
        }

        let max = self.cap.max_students;
        let (enrolled, exceeded) = match self.cap.policy {
            CapPolicy::Existing => {
                let enrolled = counter.count_enrollments(proposed.name, None)?;
                (enrolled, enrolled >= max)
            }
            CapPolicy::Projected => {
                let others = counter.count_enrollments(proposed.name, proposed.course_id)?;
                let enrolled = others + proposed.students as i64;
                (enrolled, enrolled > max)
            }
        };

        if exceeded {
            return Err(CapExceeded {
                course: proposed.name.to_string(),
                enrolled,
                cap: max,
            }
            .into());
        }

        tracing::debug!(course = proposed.name, enrolled, cap = max, ?operation, "Enrollment cap check passed");
        Ok(())
    }
}
