#![warn(clippy::pedantic)]

pub mod catalog_file;
#[allow(clippy::module_name_repetitions)]
pub mod local_storage;

pub use catalog_file::read_catalog;
pub use local_storage::{Key, LocalStorage};
