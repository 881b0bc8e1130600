pub mod config;
pub mod constants;
pub mod controller;
pub mod generator;
pub mod prompt;
