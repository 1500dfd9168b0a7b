// src/lib.rs

pub mod config;
pub mod document;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod pipeline;
pub mod region;
pub mod series;
pub mod store;
pub mod text;

pub use error::{Error, Result};
