pub mod storage;
pub mod types;

pub use storage::{load_profile, resolve_path, save_profile, StoreError};
pub use types::{Field, Profile};
