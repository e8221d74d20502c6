pub mod compositor;
pub mod plan;
