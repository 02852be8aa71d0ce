pub mod classifier;
pub mod keywords;
pub mod outcomes;
pub mod text;
