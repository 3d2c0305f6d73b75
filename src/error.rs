//! Errors raised by the engine itself.
//!
//! Stream failures never show up here: they travel to the consumer through
//! [`Observer::error`](crate::observer::Observer::error) with whatever payload
//! type the observable was built with. A `SubscribeError` means the caller broke
//! the subscribe contract.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubscribeError {
  /// `subscribe` was called on an observable from inside one of its own
  /// observer (or mapping stage) callbacks.
  #[error("re-entrant subscribe: the observable is already delivering to an observer")]
  Reentrant,
}
