//! Configuration and plain data shared by every adapter

pub mod config;
pub mod models;
