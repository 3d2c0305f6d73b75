use super::Observable;
use crate::{
  observer::{FnMutObserver, ObserverAll},
  subscription::Subscription,
};

/// Closure shorthands for [`Observable::subscribe`].
impl<'a, Item, Err> Observable<'a, Item, Err> {
  /// Invokes `next` for every value; errors and completion are ignored.
  pub fn subscribe_next<N>(&self, next: N) -> Subscription<'_>
  where
    N: FnMut(Item),
  {
    self.subscribe(FnMutObserver(next))
  }

  /// Invokes `next` for every value and `error` on failure.
  pub fn subscribe_err<N, E>(&self, next: N, error: E) -> Subscription<'_>
  where
    N: FnMut(Item),
    E: FnMut(Err),
  {
    self.subscribe(ObserverAll::new(next, error, || {}))
  }

  /// Invokes `next` for every value and `complete` once the sequence ends.
  pub fn subscribe_complete<N, C>(&self, next: N, complete: C) -> Subscription<'_>
  where
    N: FnMut(Item),
    C: FnMut(),
  {
    self.subscribe(ObserverAll::new(next, |_: Err| {}, complete))
  }

  /// Invokes `next`, `error` and `complete` for their notifications.
  pub fn subscribe_all<N, E, C>(&self, next: N, error: E, complete: C) -> Subscription<'_>
  where
    N: FnMut(Item),
    E: FnMut(Err),
    C: FnMut(),
  {
    self.subscribe(ObserverAll::new(next, error, complete))
  }
}
