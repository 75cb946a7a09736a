pub mod config;
pub mod error;
pub mod id;
pub mod model;
pub mod runner;
pub mod storage;
pub mod task_api;
