pub mod app;
pub mod cli;
pub mod commands;
pub mod context;
pub mod directory;
pub mod merge;
pub mod overlay;
pub mod rest;
pub mod storage;
pub mod tracing;
pub mod types;
