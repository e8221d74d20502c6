pub mod features;
pub mod rules;
pub mod seed;
