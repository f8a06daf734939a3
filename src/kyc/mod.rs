pub mod scorer;
pub mod types;
