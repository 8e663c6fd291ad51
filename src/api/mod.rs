pub mod client;

pub use client::{ApiError, GenerationClient, FALLBACK_REPLY};
