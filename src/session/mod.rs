// src/session/mod.rs

pub mod policy;
pub mod store;
pub mod validator;
