// src/core/mod.rs
pub mod model;
pub mod scoring;
pub mod types;
