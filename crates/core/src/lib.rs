//! Core library: tag decoding, label extraction, category mapping and
//! classification orchestration for the photo backend.

pub mod category;
pub mod classifier;
pub mod config;
pub mod labels;
pub mod models;
pub mod pipeline;
pub mod tags;
