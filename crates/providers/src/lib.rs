//! Model provider implementations for Ressa.
//!
//! All providers implement the `ressa_core::Provider` trait.
//! `build_from_config` selects the backend named in configuration.

pub mod openai_compat;
pub mod router;

pub use openai_compat::OpenAiCompatProvider;
pub use router::{SUPPORTED_PROVIDERS, build_from_config};
