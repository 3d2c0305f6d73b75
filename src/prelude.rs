//! Prelude module for convenient imports
//!
//! This module re-exports commonly used types and traits for easy access.

pub use crate::{
  error::SubscribeError,
  observable::Observable,
  observer::{FnMutObserver, Observer, ObserverAll},
  ops::{FilterMap, MappingStage},
  subscription::{Subscription, SubscriptionGuard, SubscriptionLike},
};
