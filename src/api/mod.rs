// Agent registry access
// The dashboard talks to the backend through the `AgentApi` trait, with an
// HTTP implementation and an in-memory one for offline use.

pub mod client;
pub mod error;
pub mod memory;

pub use client::{AgentApi, AgentQuery, HttpAgentApi};
pub use error::ApiError;
pub use memory::InMemoryAgentApi;
