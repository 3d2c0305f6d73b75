//! # rxlite: a minimal push-based Observable
//!
//! A producer ([`Observable`]) delivers a bounded sequence of values, an
//! optional error and a completion signal to a consumer ([`Observer`]), all
//! synchronously inside `subscribe`. One operator, `map`, interposes a
//! [`MappingStage`] between an upstream observable and the downstream
//! observer.
//!
//! ## Quick Start
//!
//! ```rust
//! use rxlite::prelude::*;
//!
//! let source = Observable::<i32, &str>::from([1, -2, 3, -4]);
//! let mut seen = vec![];
//! let positives = source.map_with(|v| (v > 0).then_some(v * 2));
//! let mut subscription = positives.subscribe_next(|v| seen.push(v));
//! subscription.unsubscribe();
//! assert_eq!(seen, vec![2, 6]);
//! ```
//!
//! ## Key Concepts
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Observable`] | Single / Sequence / ErrorOnly / Mapped producer |
//! | [`Observer`] | Consumes `next`, `error`, and `complete` events |
//! | [`MappingStage`] | Transforms or filters values between two observables |
//! | [`Subscription`] | Handle to release what an observable has not delivered |
//!
//! An observable delivers once. Subscribing again after it completed, or after
//! it was unsubscribed, delivers nothing. An error-only observable reports
//! `error` and then `complete`.
//!
//! [`Observable`]: observable::Observable
//! [`Observer`]: observer::Observer
//! [`MappingStage`]: ops::MappingStage
//! [`Subscription`]: subscription::Subscription

pub mod error;
pub mod observable;
pub mod observer;
pub mod ops;
pub mod prelude;
pub mod subscription;

// Re-export the prelude module
pub use prelude::*;
