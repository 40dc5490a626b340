// src/models/mod.rs

pub mod generation;
pub mod question_set;
pub mod schema;
