//! Memory Business Application Layer
//!
//! One struct per use case. Each one is built from the repository port it
//! needs (and optionally an event publisher), takes a command DTO, drives the
//! domain aggregate and returns a response DTO.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Application Layer                                │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │  Use cases          │ DTOs               │ Policy        │ Events       │
//! │  ─────────          │ ────               │ ──────        │ ──────       │
//! │  CreateClient ...   │ CreateClientCmd    │ QuoteDefaults │ EventPublisher│
//! │  CreateProject ...  │ ProjectDto         │ Pagination    │ NoOp / InMem │
//! │  CreateQuote ...    │ QuoteDto           │               │              │
//! └─────────────────────────────────────────────────────────────────────────┘
//!                              ▲
//!                              │ depends on
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Layer                                    │
//! │  Aggregates, Value Objects, Domain Events, Repository Traits            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Non-Goals
//!
//! - Business rules (belong in the domain crate)
//! - Storage (repository implementations live in the persistence crate)
//! - Request/response transport

pub mod dto;
pub mod errors;
pub mod events;
pub mod policy;
pub mod use_cases;

pub use dto::*;
pub use errors::{ApplicationError, ApplicationResult};
pub use events::{EventPublisher, InMemoryEventPublisher, NoOpEventPublisher, PublishedEvent};
pub use policy::{Pagination, QuoteDefaults};
pub use use_cases::*;
