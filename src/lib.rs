pub mod cli;
pub mod commands;
pub mod config;
pub mod export;
pub mod generator;
pub mod orders;
pub mod ui;
