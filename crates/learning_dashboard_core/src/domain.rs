//! crates/learning_dashboard_core/src/domain.rs
//!
//! Defines the core data structures of the dashboard: accounts, the active
//! session user, and the course catalog with its chapters.
//!
//! The serde derives fix the persisted layout (camelCase field names), so a
//! stored snapshot reads back field-for-field.

use serde::{Deserialize, Serialize};

//=========================================================================================
// Identity
//=========================================================================================

/// The authenticated user, as seen by the session and the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
}

// Only lives in the account table - contains the plaintext password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialRecord {
    #[serde(flatten)]
    pub user: User,
    pub password: String,
}

impl CredentialRecord {
    /// Strips the password, yielding the user that becomes the active session.
    pub fn into_user(self) -> User {
        self.user
    }

    /// Exact, case-sensitive match on both email and password.
    pub fn matches(&self, email: &str, password: &str) -> bool {
        self.user.email == email && self.password == password
    }
}

//=========================================================================================
// Catalog
//=========================================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    pub id: String,
    pub title: String,
    pub description: String,
    pub is_completed: bool,
}

/// A catalog course. `progress` is derived from the chapters and only ever
/// written by [`Course::recompute_progress`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub title: String,
    pub description: String,
    pub chapters: Vec<Chapter>,
    pub is_registered: bool,
    pub progress: u8,
}

/// Where a learner stands in a course, derived on read from the stored flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseStatus {
    NotEnrolled,
    InProgress(u8),
    Completed,
}

impl Course {
    pub fn completed_chapters(&self) -> usize {
        self.chapters.iter().filter(|c| c.is_completed).count()
    }

    pub fn chapter(&self, chapter_id: &str) -> Option<&Chapter> {
        self.chapters.iter().find(|c| c.id == chapter_id)
    }

    /// Flips the named chapter and recomputes progress.
    /// Returns `false` (and changes nothing) if the chapter is unknown.
    pub fn toggle_chapter(&mut self, chapter_id: &str) -> bool {
        let Some(chapter) = self.chapters.iter_mut().find(|c| c.id == chapter_id) else {
            return false;
        };
        chapter.is_completed = !chapter.is_completed;
        self.recompute_progress();
        true
    }

    pub fn recompute_progress(&mut self) {
        self.progress = percentage(self.completed_chapters(), self.chapters.len());
    }

    /// An unregistered course is `NotEnrolled` whatever its progress says.
    pub fn status(&self) -> CourseStatus {
        match (self.is_registered, self.progress) {
            (false, _) => CourseStatus::NotEnrolled,
            (true, 100) => CourseStatus::Completed,
            (true, p) => CourseStatus::InProgress(p),
        }
    }
}

/// `round(100 * part / whole)`, rounding half up. An empty whole is 0%.
pub fn percentage(part: usize, whole: usize) -> u8 {
    if whole == 0 {
        return 0;
    }
    let rounded = (200 * part + whole) / (2 * whole);
    rounded.min(100) as u8
}

//=========================================================================================
// Dashboard Summary
//=========================================================================================

/// Aggregated view of the catalog, shown at the top of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardSummary {
    pub total_courses: usize,
    pub registered_courses: usize,
    pub completed_courses: usize,
    pub average_progress: u8,
}

impl DashboardSummary {
    pub fn from_courses(courses: &[Course]) -> Self {
        let total_progress: usize = courses.iter().map(|c| c.progress as usize).sum();
        Self {
            total_courses: courses.len(),
            registered_courses: courses.iter().filter(|c| c.is_registered).count(),
            completed_courses: courses.iter().filter(|c| c.progress == 100).count(),
            average_progress: percentage(total_progress, courses.len() * 100),
        }
    }
}
