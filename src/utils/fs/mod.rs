//! File system utilities for host project documents and staged module files
//!
//! - [`atomic`] - temp-file-and-rename writes
//! - [`dirs`] - directory creation, recursive copy, idempotent removal
//! - [`formats`] - text and JSON documents with typed not-found / parse errors
//! - [`parallel`] - concurrent fan-out of blocking jobs

pub mod atomic;
pub mod dirs;
pub mod formats;
pub mod parallel;

pub use atomic::{atomic_write, safe_write};
pub use dirs::{copy_dir, copy_path, ensure_dir, remove_path};
pub use formats::{read_json_file, read_text_file, write_json_file, write_text_file};
pub use parallel::run_parallel;
