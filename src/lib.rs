//! Imaginate - turns one text prompt into a short story and an illustration
//!
//! The story comes from an OpenRouter chat-completion model and the image from
//! an ImageRouter image model. Results are shown on a single HTML page, in the
//! terminal, or both.

pub mod ai;
pub mod app;
pub mod error;
pub mod image;
pub mod models;
pub mod prompts;
pub mod render;
pub mod web;

pub use error::{ApiError, Error, Result};
