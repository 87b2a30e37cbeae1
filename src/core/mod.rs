//! Core business logic

pub mod export;
pub mod preflight;
pub mod retry;
