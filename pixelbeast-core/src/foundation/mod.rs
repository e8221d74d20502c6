pub mod config;
pub mod core;
pub mod data_uri;
pub mod error;
pub(crate) mod math;
pub mod rng;
