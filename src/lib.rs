// src/lib.rs
pub mod banner;
pub mod client;
pub mod config;
pub mod decode;
pub mod errors;
pub mod insights;
pub mod interpret;
pub mod models;
pub mod navigation;
pub mod records;
pub mod screens;
pub mod tumor;
