pub mod config;
pub mod plot;
pub mod score;
pub mod task;
