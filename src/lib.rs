pub mod config;
pub mod errors;
pub mod parse;
pub mod report;
pub mod runner;
pub mod summary;
pub mod types;
