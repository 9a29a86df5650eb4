//! crates/learning_dashboard_core/src/catalog.rs
//!
//! The catalog store: owns the course list, enrollment and chapter completion.
//!
//! Every mutation is applied to a copy of the catalog, the whole copy is written
//! to storage, and only then does it replace the in-memory list. A failed write
//! therefore commits nothing. Unknown course or chapter ids are silent no-ops.

use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, info, warn};

use crate::domain::{Course, DashboardSummary};
use crate::ports::{KeyValueStore, PortError, PortResult, CATALOG_KEY};
use crate::seed::seed_catalog;

pub struct CatalogStore {
    storage: Arc<dyn KeyValueStore>,
    courses: RwLock<Vec<Course>>,
}

impl CatalogStore {
    /// Restores the persisted catalog, or seeds and persists a fresh one on first run.
    ///
    /// An unparseable snapshot is returned as an error and left in storage as-is.
    pub fn load(storage: Arc<dyn KeyValueStore>) -> PortResult<Self> {
        let courses = match storage.get(CATALOG_KEY)? {
            Some(raw) => {
                let mut courses: Vec<Course> = serde_json::from_str(&raw)?;
                // Progress is derived; never trust the stored number.
                for course in &mut courses {
                    let stored = course.progress;
                    course.recompute_progress();
                    if course.progress != stored {
                        warn!(
                            "Stored progress {}% of {} did not match its chapters; using {}%",
                            stored, course.id, course.progress
                        );
                    }
                }
                info!("Restored catalog with {} courses", courses.len());
                courses
            }
            None => {
                let courses = seed_catalog();
                storage.put(CATALOG_KEY, &serde_json::to_string(&courses)?)?;
                info!("Seeded catalog with {} courses", courses.len());
                courses
            }
        };

        Ok(Self {
            storage,
            courses: RwLock::new(courses),
        })
    }

    /// An ordered snapshot of the whole catalog.
    pub fn courses(&self) -> Vec<Course> {
        self.courses
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn get_course(&self, course_id: &str) -> Option<Course> {
        self.courses
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|course| course.id == course_id)
            .cloned()
    }

    pub fn summary(&self) -> DashboardSummary {
        let courses = self.courses.read().unwrap_or_else(PoisonError::into_inner);
        DashboardSummary::from_courses(&courses)
    }

    /// Enrolls in a course. Idempotent; unknown ids are ignored.
    pub fn register_for_course(&self, course_id: &str) -> PortResult<()> {
        self.mutate(|courses| {
            let Some(course) = courses.iter_mut().find(|c| c.id == course_id) else {
                debug!("Ignoring enrollment in unknown course {}", course_id);
                return false;
            };
            if !course.is_registered {
                course.is_registered = true;
                info!("Enrolled in course {}", course_id);
            }
            true
        })
    }

    /// Flips one chapter's completion flag and recomputes the course progress.
    pub fn toggle_chapter_completion(&self, course_id: &str, chapter_id: &str) -> PortResult<()> {
        self.mutate(|courses| {
            let Some(course) = courses.iter_mut().find(|c| c.id == course_id) else {
                debug!("Ignoring toggle in unknown course {}", course_id);
                return false;
            };
            if !course.toggle_chapter(chapter_id) {
                debug!("Ignoring toggle of unknown chapter {}/{}", course_id, chapter_id);
                return false;
            }
            info!(
                "Toggled {}/{}; progress is now {}%",
                course_id, chapter_id, course.progress
            );
            true
        })
    }

    /// Runs `apply` on a copy of the catalog; if it reports a change, persists the
    /// full copy and swaps it in.
    fn mutate<F>(&self, apply: F) -> PortResult<()>
    where
        F: FnOnce(&mut Vec<Course>) -> bool,
    {
        let mut guard = self
            .courses
            .write()
            .map_err(|_| PortError::Unexpected("catalog lock poisoned".to_string()))?;

        let mut next = guard.clone();
        if !apply(&mut next) {
            return Ok(());
        }

        self.storage
            .put(CATALOG_KEY, &serde_json::to_string(&next)?)?;
        *guard = next;
        Ok(())
    }
}
