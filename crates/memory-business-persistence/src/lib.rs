//! Memory Business Persistence Layer
//!
//! Infrastructure layer providing repository implementations for domain aggregates.
//! This crate implements the repository interfaces defined in `memory-business-domain`.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Infrastructure Layer                         │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  memory/                                                        │
//! │  ─────────                                                      │
//! │  InMemoryClientRepository                                       │
//! │  InMemoryProjectRepository                                      │
//! │  InMemoryQuoteRepository                                        │
//! └─────────────────────────────────────────────────────────────────┘
//!                              ▲
//!                              │ implements
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                       Domain Layer                              │
//! │  ClientRepository, ProjectRepository, QuoteRepository           │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Saves are upserts with last-writer-wins semantics. `find_all` and the
//! finders return aggregates ordered by creation time, ties broken by id.
//!
//! ## Usage
//!
//! ```ignore
//! use memory_business_persistence::InMemoryQuoteRepository;
//! use memory_business_domain::repositories::QuoteRepository;
//! use std::sync::Arc;
//!
//! let repo: Arc<dyn QuoteRepository> = Arc::new(InMemoryQuoteRepository::new());
//! ```

pub mod error;
pub mod memory;

pub use error::PersistenceError;

pub use memory::{InMemoryClientRepository, InMemoryProjectRepository, InMemoryQuoteRepository};
