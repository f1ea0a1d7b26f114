//! Core traits defined in `logbuddy-core` and implemented by other crates.

pub mod weather;

pub use weather::{WeatherProvider, WeatherReport};
