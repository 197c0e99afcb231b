//! Utility modules shared by the lifecycle components.

pub mod fs;
pub mod json_order;
pub mod path_validation;

pub use fs::{
    atomic_write, copy_path, ensure_dir, read_json_file, read_text_file, remove_path,
    run_parallel, safe_write, write_json_file, write_text_file,
};
pub use path_validation::{project_path, validate_no_traversal};
pub use json_order::{serialize_with_key_at, take_key};
