pub mod detector;
pub mod types;
