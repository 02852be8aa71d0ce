pub mod pipeline;
pub mod terms;
