use std::fmt::{Debug, Formatter};

/// Subscription returns from `Observable.subscribe(Observer)` to allow
///  unsubscribing.
pub trait SubscriptionLike {
  /// Releases whatever the originating observable has not delivered yet.
  /// Calling it again has no further effect.
  fn unsubscribe(&mut self);

  fn is_closed(&self) -> bool;
}

/// The side of an observable a [`Subscription`] talks to.
///
/// Both methods take `&self`; implementors keep their lifecycle state behind
/// interior mutability so a handle can share the observable with its owner.
pub(crate) trait Teardown {
  fn teardown(&self);

  fn is_torn_down(&self) -> bool;
}

/// Handle returned by `subscribe`, bound to the observable it came from.
///
/// Delivery is synchronous, so by the time a caller holds this handle the
/// observable has usually finished already. Unsubscribing then only drops
/// undelivered data and keeps the observable from ever emitting again.
///
/// `Subscription::default()` is inert: it is bound to nothing and reports
/// closed.
#[derive(Clone, Copy, Default)]
pub struct Subscription<'a> {
  source: Option<&'a dyn Teardown>,
}

impl<'a> Subscription<'a> {
  pub(crate) fn new(source: &'a dyn Teardown) -> Self { Subscription { source: Some(source) } }

  /// Activates "RAII" behavior for this subscription. That means
  /// `unsubscribe()` will be called automatically as soon as the returned
  /// value goes out of scope.
  ///
  /// **Attention:** If you don't assign the return value to a variable,
  /// `unsubscribe()` is called immediately, which is probably not what you
  /// want!
  pub fn unsubscribe_when_dropped(self) -> SubscriptionGuard<Self> { SubscriptionGuard(self) }
}

impl<'a> SubscriptionLike for Subscription<'a> {
  #[inline]
  fn unsubscribe(&mut self) {
    if let Some(source) = self.source {
      source.teardown();
    }
  }

  #[inline]
  fn is_closed(&self) -> bool { self.source.is_none_or(|s| s.is_torn_down()) }
}

impl<'a> Debug for Subscription<'a> {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Subscription")
      .field("bound", &self.source.is_some())
      .field("is_closed", &self.is_closed())
      .finish()
  }
}

/// An RAII implementation of a "scoped subscribed" of a subscription.
/// When this structure is dropped (falls out of scope), the subscription will
/// be unsubscribed.
///
/// If you want to drop it immediately, wrap it in its own scope
#[derive(Debug)]
#[must_use]
pub struct SubscriptionGuard<T: SubscriptionLike>(pub(crate) T);

impl<T: SubscriptionLike> SubscriptionGuard<T> {
  /// Wraps an existing subscription with a guard to enable RAII behavior for
  /// it.
  pub fn new(subscription: T) -> SubscriptionGuard<T> { SubscriptionGuard(subscription) }
}

impl<T: SubscriptionLike> Drop for SubscriptionGuard<T> {
  #[inline]
  fn drop(&mut self) { self.0.unsubscribe() }
}
