pub mod api;
pub mod cache;
pub mod client;
pub mod config;
pub mod dashboard;
pub mod data_models;
pub mod error;
pub mod mode;
pub mod payload;
pub mod video_id;
