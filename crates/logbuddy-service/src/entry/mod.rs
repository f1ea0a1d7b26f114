//! Entry store service.

pub mod service;

pub use service::EntryService;
