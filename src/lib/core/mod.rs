pub mod concurrency;
pub mod errors;
pub mod fs;
pub mod io;
pub mod read_filter;

pub mod prelude {
    pub use super::concurrency::{determine_allowed_cpus, worker_pool};
    pub use super::errors::{is_broken_pipe, Result, ScreenError};
    pub use super::fs::{dir_to_bam_list, load_list_file, BamSource};
    pub use super::io::get_writer;
    pub use super::read_filter::{DefaultReadFilter, ReadFilter};
}
