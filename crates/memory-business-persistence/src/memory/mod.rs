//! In-Memory Repository Implementations
//!
//! Thread-safe in-memory implementations of domain repository interfaces.
//! Stored aggregates never carry pending events.

mod client_repository;
mod project_repository;
mod quote_repository;
mod store;

pub use client_repository::InMemoryClientRepository;
pub use project_repository::InMemoryProjectRepository;
pub use quote_repository::InMemoryQuoteRepository;
