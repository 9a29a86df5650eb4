pub mod file_store;
pub mod latency;

pub use file_store::FileStoreAdapter;
pub use latency::TokioLatencyAdapter;
