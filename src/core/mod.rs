// src/core/mod.rs
pub mod index;
pub mod loader;
pub mod translator;
pub mod types;
