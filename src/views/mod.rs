// src/views/mod.rs

pub mod layout;
pub mod question;
pub mod shell;
