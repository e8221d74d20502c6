pub mod profile;
pub mod synth;
pub mod wav;
