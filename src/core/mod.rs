pub mod config;
pub mod content;
pub mod effects;
pub mod engine;
pub mod navigation;
