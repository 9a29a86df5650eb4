pub mod catalog;
pub mod domain;
pub mod identity;
pub mod memory;
pub mod ports;
pub mod seed;

pub use catalog::CatalogStore;
pub use domain::{Chapter, Course, CourseStatus, CredentialRecord, DashboardSummary, User};
pub use identity::IdentityStore;
pub use memory::{MemoryStore, NoLatency};
pub use ports::{KeyValueStore, LatencyService, PortError, PortResult};
