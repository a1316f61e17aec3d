//! Source tree traversal
//!
//! `scanner` lists one directory without side effects; `walker` applies the
//! listing to the output tree, depth-first in name order.

pub mod scanner;
pub mod walker;

pub use scanner::{scan_directory, ScanEntry};
pub use walker::{copy_file, output_dir_name, Mirror};
