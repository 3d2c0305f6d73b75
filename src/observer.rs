//! Observer trait and implementations
//!
//! The Observer trait defines the consumer of data in the reactive pattern.
//! It provides three methods: next (for values), error (for errors), and
//! complete (for stream completion).

// ============================================================================
// Observer Trait
// ============================================================================

/// Observer trait: The consumer of data in reactive programming
///
/// An Observer receives values, errors, and completion notifications from
/// an Observable.
///
/// All three methods borrow the observer mutably instead of consuming it:
/// an error-only observable reports `error` and then `complete` to the same
/// observer. Keeping every method on `&mut self` also keeps the trait object
/// safe, which is how the engine drives `&mut dyn Observer` through a chain of
/// mapped observables.
pub trait Observer<Item, Err> {
  /// Receive the next value from the observable
  fn next(&mut self, value: Item);

  /// Handle an error from the observable
  ///
  /// A `complete` notification still follows.
  fn error(&mut self, err: Err);

  /// Handle completion of the observable
  fn complete(&mut self);
}

/// Lending an observer to `subscribe` lets the same value be subscribed
/// several times.
impl<O, Item, Err> Observer<Item, Err> for &mut O
where
  O: Observer<Item, Err> + ?Sized,
{
  #[inline]
  fn next(&mut self, value: Item) { (**self).next(value) }

  #[inline]
  fn error(&mut self, err: Err) { (**self).error(err) }

  #[inline]
  fn complete(&mut self) { (**self).complete() }
}

// ============================================================================
// Closure adapters
// ============================================================================

/// Closure adapter for the `next` notification only.
///
/// This enables `observable.subscribe(FnMutObserver(|v| println!("{}", v)))`.
/// Errors and completion are ignored.
#[derive(Clone)]
pub struct FnMutObserver<F>(pub F);

impl<F, Item, Err> Observer<Item, Err> for FnMutObserver<F>
where
  F: FnMut(Item),
{
  #[inline]
  fn next(&mut self, v: Item) { (self.0)(v); }

  #[inline]
  fn error(&mut self, _err: Err) {}

  #[inline]
  fn complete(&mut self) {}
}

/// Closure adapter covering all three notifications.
#[derive(Clone)]
pub struct ObserverAll<N, E, C> {
  next: N,
  error: E,
  complete: C,
}

impl<N, E, C> ObserverAll<N, E, C> {
  #[inline]
  pub fn new(next: N, error: E, complete: C) -> Self { ObserverAll { next, error, complete } }
}

impl<Item, Err, N, E, C> Observer<Item, Err> for ObserverAll<N, E, C>
where
  N: FnMut(Item),
  E: FnMut(Err),
  C: FnMut(),
{
  #[inline]
  fn next(&mut self, value: Item) { (self.next)(value); }

  #[inline]
  fn error(&mut self, err: Err) { (self.error)(err); }

  #[inline]
  fn complete(&mut self) { (self.complete)(); }
}

// ============================================================================
// Tests
// ============================================================================
