//! The Observable engine.
//!
//! An [`Observable`] is built by one of the factories ([`Observable::of`],
//! [`Observable::from`], [`Observable::throw_error`], [`Observable::map`]) and
//! delivers its whole notification sequence synchronously inside
//! [`Observable::subscribe`]. Once it has delivered (or was unsubscribed) it is
//! completed, and every further subscribe is a no-op.
//!
//! ```rust
//! use rxlite::prelude::*;
//!
//! let mut seen = vec![];
//! Observable::<_, ()>::from([1, 2, 3]).subscribe_next(|v| seen.push(v));
//! assert_eq!(seen, vec![1, 2, 3]);
//! ```

use std::{
  cell::{Cell, RefCell},
  fmt::{Debug, Formatter},
};

use tracing::{debug, warn};

use crate::{
  error::SubscribeError,
  observer::Observer,
  subscription::{Subscription, Teardown},
};

mod emission;
mod subscribe_with;

pub(crate) use emission::Emission;

/// A producer of a bounded notification sequence.
///
/// `'a` is the borrow of the upstream observable for mapped observables; the
/// other construction modes own all of their data and can be any lifetime.
///
/// The completed flag and the emission data live behind `Cell`/`RefCell`, so
/// an `Observable` is `!Sync`: it can only be driven from one thread.
pub struct Observable<'a, Item, Err> {
  emission: RefCell<Emission<'a, Item, Err>>,
  completed: Cell<bool>,
}

/// Type-erased view of an observable used as the upstream of a mapped one.
pub(crate) trait Upstream<Item, Err>: Teardown {
  fn deliver(&self, observer: &mut dyn Observer<Item, Err>) -> Result<(), SubscribeError>;
}

impl<'a, Item, Err> Observable<'a, Item, Err> {
  pub(crate) fn with_emission(emission: Emission<'a, Item, Err>) -> Self {
    Observable { emission: RefCell::new(emission), completed: Cell::new(false) }
  }

  /// Creates an observable producing a single value.
  ///
  /// Delivers `next(value)` and then `complete()`. The value is moved into the
  /// observable; use a shared handle such as `Rc<Cell<T>>` as `Item` if later
  /// changes are meant to be visible at subscribe time.
  pub fn of(value: Item) -> Self { Self::with_emission(Emission::Single(Some(value))) }

  /// Creates an observable that produces values from an iterator.
  ///
  /// The iterator is drained at construction. Subscribing delivers one `next`
  /// per element in order and then `complete()`; an empty iterator delivers
  /// only `complete()`.
  #[allow(clippy::should_implement_trait)]
  pub fn from<I>(values: I) -> Self
  where
    I: IntoIterator<Item = Item>,
  {
    Self::with_emission(Emission::Sequence(values.into_iter().collect()))
  }

  /// Creates an observable that emits no items and completes immediately.
  pub fn empty() -> Self { Self::from(std::iter::empty()) }

  /// Creates an observable that emits no items, just an error.
  ///
  /// Delivers `error(err)` and then `complete()`.
  pub fn throw_error(err: Err) -> Self { Self::with_emission(Emission::ErrorOnly(Some(err))) }

  /// Delivers this observable's notifications to `observer`.
  ///
  /// Everything is delivered before this returns. On a completed observable
  /// nothing is delivered and the returned handle is already closed.
  ///
  /// # Panics
  ///
  /// Panics when called from inside one of this observable's own callbacks.
  /// Use [`Observable::try_subscribe`] to get the violation as an error.
  pub fn subscribe<O>(&self, observer: O) -> Subscription<'_>
  where
    O: Observer<Item, Err>,
  {
    match self.try_subscribe(observer) {
      Ok(subscription) => subscription,
      Err(err) => panic!("{err}"),
    }
  }

  /// Fallible form of [`Observable::subscribe`].
  pub fn try_subscribe<O>(&self, mut observer: O) -> Result<Subscription<'_>, SubscribeError>
  where
    O: Observer<Item, Err>,
  {
    self.deliver(&mut observer)?;
    Ok(Subscription::new(self))
  }

  /// Releases undelivered data and marks the observable completed.
  ///
  /// Same as unsubscribing any [`Subscription`] this observable returned, and
  /// safe to call before the first subscribe.
  pub fn unsubscribe(&self) { self.teardown() }

  /// Whether the observable has delivered its sequence or was unsubscribed.
  #[inline]
  pub fn is_completed(&self) -> bool { self.completed.get() }
}

impl<'a, Item, Err> Upstream<Item, Err> for Observable<'a, Item, Err> {
  fn deliver(&self, observer: &mut dyn Observer<Item, Err>) -> Result<(), SubscribeError> {
    if self.completed.get() {
      debug!("subscribe on a completed observable is a no-op");
      return Ok(());
    }

    let mut emission = self.emission.try_borrow_mut().map_err(|_| {
      warn!("re-entrant subscribe rejected");
      SubscribeError::Reentrant
    })?;
    emission.emit(observer)?;

    // A mapped observable is exhausted exactly when its upstream is.
    let exhausted = match &*emission {
      Emission::Mapped { upstream, .. } => upstream.is_torn_down(),
      _ => true,
    };
    self.completed.set(self.completed.get() || exhausted);
    Ok(())
  }
}

impl<'a, Item, Err> Teardown for Observable<'a, Item, Err> {
  fn teardown(&self) {
    let was_completed = self.completed.replace(true);
    // While a delivery is running the emission stays borrowed; that delivery
    // finishes on its own and consumes the data anyway.
    if let Ok(mut emission) = self.emission.try_borrow_mut() {
      emission.release();
    }
    debug!(was_completed, "unsubscribed");
  }

  #[inline]
  fn is_torn_down(&self) -> bool { self.completed.get() }
}

impl<'a, Item, Err> Debug for Observable<'a, Item, Err> {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let mode = self.emission.try_borrow().map_or("<delivering>", |e| e.mode());
    f.debug_struct("Observable")
      .field("mode", &mode)
      .field("completed", &self.completed.get())
      .finish()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::subscription::SubscriptionLike;

  #[derive(Debug, PartialEq)]
  enum Event {
    Next(i32),
    Error(&'static str),
    Complete,
  }

  #[derive(Default)]
  struct Recorder(Vec<Event>);

  impl Observer<i32, &'static str> for Recorder {
    fn next(&mut self, value: i32) { self.0.push(Event::Next(value)); }

    fn error(&mut self, err: &'static str) { self.0.push(Event::Error(err)); }

    fn complete(&mut self) { self.0.push(Event::Complete); }
  }

  #[rxlite_macro::test]
  fn of_delivers_value_then_complete() {
    let mut recorder = Recorder::default();
    let observable = Observable::of(1);
    observable.subscribe(&mut recorder);
    assert_eq!(recorder.0, vec![Event::Next(1), Event::Complete]);
    assert!(observable.is_completed());
  }

  #[rxlite_macro::test]
  fn from_delivers_in_order() {
    let mut recorder = Recorder::default();
    Observable::from(vec![3, 1, 2]).subscribe(&mut recorder);
    assert_eq!(recorder.0, vec![Event::Next(3), Event::Next(1), Event::Next(2), Event::Complete]);
  }

  #[rxlite_macro::test]
  fn empty_sequence_only_completes() {
    let mut recorder = Recorder::default();
    Observable::from(Vec::new()).subscribe(&mut recorder);
    Observable::empty().subscribe(&mut recorder);
    assert_eq!(recorder.0, vec![Event::Complete, Event::Complete]);
  }

  #[rxlite_macro::test]
  fn throw_error_reports_error_then_complete() {
    let mut recorder = Recorder::default();
    Observable::throw_error("An error occured!").subscribe(&mut recorder);
    assert_eq!(recorder.0, vec![Event::Error("An error occured!"), Event::Complete]);
  }

  #[rxlite_macro::test]
  fn second_subscribe_is_a_no_op() {
    let observables = [
      Observable::of(1),
      Observable::from([1, -2, 3]),
      Observable::throw_error("e"),
      Observable::empty(),
    ];
    for observable in &observables {
      observable.subscribe(Recorder::default());
      let mut second = Recorder::default();
      let subscription = observable.subscribe(&mut second);
      assert!(second.0.is_empty());
      assert!(subscription.is_closed());
    }
  }

  #[rxlite_macro::test]
  fn unsubscribe_before_subscribe_drops_the_data() {
    let observable = Observable::of(5);
    observable.unsubscribe();
    observable.unsubscribe();
    let mut recorder = Recorder::default();
    observable.subscribe(&mut recorder);
    assert!(recorder.0.is_empty());
    assert!(observable.is_completed());
  }

  #[rxlite_macro::test]
  fn unsubscribe_after_completion_is_idempotent() {
    let observable = Observable::<i32, &str>::from([1, 2]);
    let mut subscription = observable.subscribe(Recorder::default());
    subscription.unsubscribe();
    subscription.unsubscribe();
    assert!(subscription.is_closed());
  }

  struct Reentrant<'o> {
    target: &'o Observable<'static, i32, &'static str>,
    result: Option<Result<(), SubscribeError>>,
  }

  impl<'o> Observer<i32, &'static str> for Reentrant<'o> {
    fn next(&mut self, _: i32) {
      self.result = Some(self.target.try_subscribe(Recorder::default()).map(|_| ()));
    }

    fn error(&mut self, _: &'static str) {}

    fn complete(&mut self) {}
  }

  #[rxlite_macro::test]
  fn reentrant_subscribe_is_rejected() {
    let observable = Observable::of(1);
    let mut observer = Reentrant { target: &observable, result: None };
    observable.subscribe(&mut observer);
    assert_eq!(observer.result, Some(Err(SubscribeError::Reentrant)));
    assert!(observable.is_completed());
  }

  #[rxlite_macro::test]
  #[should_panic(expected = "re-entrant subscribe")]
  fn reentrant_subscribe_panics() {
    struct Nested<'o>(&'o Observable<'static, i32, &'static str>);

    impl<'o> Observer<i32, &'static str> for Nested<'o> {
      fn next(&mut self, _: i32) { self.0.subscribe(Recorder::default()); }

      fn error(&mut self, _: &'static str) {}

      fn complete(&mut self) {}
    }

    let observable = Observable::of(1);
    observable.subscribe(Nested(&observable));
  }

  #[rxlite_macro::test]
  fn debug_shows_mode_and_state() {
    let observable = Observable::<i32, ()>::from([1]);
    assert_eq!(format!("{observable:?}"), "Observable { mode: \"sequence\", completed: false }");
    observable.unsubscribe();
    assert_eq!(format!("{observable:?}"), "Observable { mode: \"sequence\", completed: true }");
  }
}
