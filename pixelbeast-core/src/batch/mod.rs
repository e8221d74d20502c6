pub mod orchestrator;
pub mod request;
