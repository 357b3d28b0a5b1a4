pub mod discover;
pub mod parallel;

pub use discover::discover_files;
pub use parallel::{compile_file, parallel_compile, CompiledFile};
