//! Concrete repository implementations.

pub mod log_entry;

pub use log_entry::LogEntryRepository;
