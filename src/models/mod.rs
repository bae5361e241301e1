// src/models/mod.rs

pub mod assignment;
pub mod stats;
pub mod student;
pub mod submission;
pub mod user;
