// src/lib.rs

//! progsync — catalog program requirements sync library.

pub mod error;
pub mod extract;
pub mod models;
pub mod pipeline;
pub mod storage;
pub mod utils;
