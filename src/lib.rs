// src/lib.rs

pub mod api;
pub mod config;
pub mod error;
pub mod flow;
pub mod gateway;
pub mod guard;
pub mod models;
pub mod normalize;
pub mod session;

pub use error::ApiError;
pub use normalize::normalize_assignment;
