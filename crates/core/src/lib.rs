//! # Ressa Core
//!
//! Domain types, traits, and error definitions for the Ressa research agent.
//! This crate has **no framework dependencies**. It defines the domain model
//! that all other crates implement against.
//!
//! Every collaborator of the reasoning loop (model provider, tool, vector
//! index) is a trait here. Implementations live in their respective crates.

pub mod error;
pub mod message;
pub mod provider;
pub mod tool;
pub mod memory;
pub mod agent;
pub mod event;

// Re-export key types at crate root for ergonomics
pub use error::{Error, Result};
pub use message::{Message, Role};
pub use provider::Provider;
pub use tool::{Tool, ToolDescriptor, ToolRegistry};
pub use memory::{DocumentMetadata, SearchHit, VectorIndex};
pub use agent::AgentConfig;
pub use event::{DomainEvent, EventBus};
