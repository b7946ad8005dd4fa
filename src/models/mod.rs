// src/models/mod.rs

pub mod user;
pub mod task;
