//! Memory Business Domain Layer
//!
//! Aggregates, value objects, domain events and repository contracts for the
//! client / project / quote management core.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         Domain Layer                             │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  client/        │  project/               │  quote/              │
//! │  Client         │  Project, Module,       │  Quote, QuoteItem    │
//! │                 │  Feature                │                      │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  value_objects  │  events                 │  repositories        │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The domain is purely synchronous. The only async surface is the
//! repository traits, which infrastructure crates implement.

pub mod client;
pub mod errors;
pub mod events;
pub mod project;
pub mod quote;
pub mod repositories;
pub mod value_objects;

pub use errors::{DomainError, DomainResult};
pub use events::{DomainEvent, EventLog};
