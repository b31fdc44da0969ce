pub mod actions;
pub mod config;
pub mod currency;
pub mod engine;
pub mod models;
pub mod storage;
pub mod types;
pub mod views;
