// src/lib.rs

//! Page Mirror Library
//!
//! Mirrors a graph of remote document pages into a local cache by following
//! page references found inside page content.

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;
