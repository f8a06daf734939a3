pub mod api;
pub mod config;
pub mod kyc;
pub mod monitor;
pub mod scoring;
pub mod threat;
pub mod wallet;
pub mod watchlist;
