//! Use cases, one struct per operation
//!
//! Every mutating use case follows the same sequence: load what it needs
//! from the repository port, mutate or build the aggregate, save it, drain
//! the aggregate's recorded events into the [`EventPublisher`], then map the
//! stored state to a DTO. Read-only use cases only hold the repository.
//!
//! [`EventPublisher`]: crate::events::EventPublisher

/// Struct plus constructors for a use case that only reads
macro_rules! query_use_case {
    ($(#[$doc:meta])* $name:ident, $port:ident) => {
        $(#[$doc])*
        pub struct $name<R: ?Sized> {
            repository: ::std::sync::Arc<R>,
        }

        impl<R: $port + ?Sized> $name<R> {
            pub fn new(repository: ::std::sync::Arc<R>) -> Self {
                Self { repository }
            }
        }
    };
}

/// Struct plus constructors for a use case that persists and publishes
macro_rules! command_use_case {
    ($(#[$doc:meta])* $name:ident, $port:ident) => {
        $(#[$doc])*
        pub struct $name<R: ?Sized, E: ?Sized = $crate::events::NoOpEventPublisher> {
            repository: ::std::sync::Arc<R>,
            events: ::std::sync::Arc<E>,
        }

        impl<R: $port + ?Sized> $name<R> {
            /// Events are dropped
            pub fn new(repository: ::std::sync::Arc<R>) -> Self {
                Self::with_publisher(
                    repository,
                    ::std::sync::Arc::new($crate::events::NoOpEventPublisher),
                )
            }
        }

        impl<R: $port + ?Sized, E: $crate::events::EventPublisher + ?Sized> $name<R, E> {
            pub fn with_publisher(
                repository: ::std::sync::Arc<R>,
                events: ::std::sync::Arc<E>,
            ) -> Self {
                Self { repository, events }
            }
        }
    };
}

pub mod clients;
pub mod projects;
pub mod quotes;

pub use clients::*;
pub use projects::*;
pub use quotes::*;
