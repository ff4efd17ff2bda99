pub mod files;
pub mod snapshot;

pub use files::{atomic_write, ensure_data_dir, get_data_dir, init_local_dir, read_file, tasks_file};
pub use snapshot::SnapshotStore;
