use tracing::trace;

use crate::{
  observable::{Emission, Observable},
  observer::Observer,
};

/// Per-value transform/filter unit interposed by [`Observable::map`].
///
/// The downstream observer is handed in on every call instead of being stored
/// in the stage, so a stage never exists with a dangling or unset downstream.
///
/// `on_next` may forward zero or one value, transformed or not. `on_error` and
/// `on_complete` forward unchanged unless overridden. State kept in the stage
/// persists across the `on_next` calls of one subscription; a mapped
/// observable delivers at most once, so each stage instance serves exactly one
/// subscription.
pub trait MappingStage<Item, Err> {
  fn on_next(&mut self, value: Item, downstream: &mut dyn Observer<Item, Err>);

  fn on_error(&mut self, err: Err, downstream: &mut dyn Observer<Item, Err>) {
    downstream.error(err)
  }

  fn on_complete(&mut self, downstream: &mut dyn Observer<Item, Err>) { downstream.complete() }
}

impl<S, Item, Err> MappingStage<Item, Err> for &mut S
where
  S: MappingStage<Item, Err> + ?Sized,
{
  #[inline]
  fn on_next(&mut self, value: Item, downstream: &mut dyn Observer<Item, Err>) {
    (**self).on_next(value, downstream)
  }

  #[inline]
  fn on_error(&mut self, err: Err, downstream: &mut dyn Observer<Item, Err>) {
    (**self).on_error(err, downstream)
  }

  #[inline]
  fn on_complete(&mut self, downstream: &mut dyn Observer<Item, Err>) {
    (**self).on_complete(downstream)
  }
}

impl<'a, Item, Err> Observable<'a, Item, Err> {
  /// Creates a new observable that emits this observable's values after
  /// passing each through `stage`.
  ///
  /// Nothing runs until the mapped observable is subscribed. It borrows `self`
  /// as its upstream, mirrors the upstream's completed state after delivery,
  /// and forwards `unsubscribe` to it.
  ///
  /// ```rust
  /// use rxlite::prelude::*;
  ///
  /// let numbers = Observable::<i32, ()>::from([1, 2, 3, 4]);
  /// let mut evens = vec![];
  /// let stage = FilterMap::new(|v: i32| (v % 2 == 0).then_some(v * 10));
  /// numbers.map(stage).subscribe_next(|v| evens.push(v));
  /// assert_eq!(evens, vec![20, 40]);
  /// ```
  pub fn map<'s, S>(&'s self, stage: S) -> Observable<'s, Item, Err>
  where
    S: MappingStage<Item, Err> + 's,
  {
    Observable::with_emission(Emission::Mapped { upstream: self, stage: Box::new(stage) })
  }

  /// Shorthand for `map(FilterMap::new(f))`.
  pub fn map_with<'s, F>(&'s self, f: F) -> Observable<'s, Item, Err>
  where
    F: FnMut(Item) -> Option<Item> + 's,
  {
    self.map(FilterMap::new(f))
  }
}

/// The forwarding observer a mapped observable subscribes its upstream with.
///
/// Pairs the stage with the downstream observer for the duration of one
/// delivery.
pub(crate) struct MapObserver<'m, Item, Err> {
  stage: &'m mut dyn MappingStage<Item, Err>,
  downstream: TerminalGate<'m, Item, Err>,
}

impl<'m, Item, Err> MapObserver<'m, Item, Err> {
  pub(crate) fn new(
    stage: &'m mut dyn MappingStage<Item, Err>,
    downstream: &'m mut dyn Observer<Item, Err>,
  ) -> Self {
    MapObserver { stage, downstream: TerminalGate { observer: downstream, state: Gate::Open } }
  }
}

impl<'m, Item, Err> Observer<Item, Err> for MapObserver<'m, Item, Err> {
  #[inline]
  fn next(&mut self, value: Item) {
    if self.downstream.state == Gate::Open {
      self.stage.on_next(value, &mut self.downstream)
    }
  }

  fn error(&mut self, err: Err) {
    trace!("forwarding error through mapping stage");
    self.stage.on_error(err, &mut self.downstream)
  }

  fn complete(&mut self) {
    trace!("forwarding complete through mapping stage");
    self.stage.on_complete(&mut self.downstream)
  }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Gate {
  Open,
  Errored,
  Completed,
}

/// The downstream as a stage sees it.
///
/// Lets through one terminal sequence (`error` then `complete`, or `complete`
/// alone) and drops whatever a stage emits after it.
struct TerminalGate<'m, Item, Err> {
  observer: &'m mut dyn Observer<Item, Err>,
  state: Gate,
}

impl<'m, Item, Err> Observer<Item, Err> for TerminalGate<'m, Item, Err> {
  fn next(&mut self, value: Item) {
    match self.state {
      Gate::Open => self.observer.next(value),
      _ => trace!("dropping next after a terminal signal"),
    }
  }

  fn error(&mut self, err: Err) {
    match self.state {
      Gate::Open => {
        self.state = Gate::Errored;
        self.observer.error(err)
      }
      _ => trace!("dropping second error"),
    }
  }

  fn complete(&mut self) {
    match self.state {
      Gate::Completed => trace!("dropping second complete"),
      _ => {
        self.state = Gate::Completed;
        self.observer.complete()
      }
    }
  }
}

/// Closure stage: `Some(v)` forwards `v`, `None` drops the value.
#[derive(Clone)]
pub struct FilterMap<F>(F);

impl<F> FilterMap<F> {
  #[inline]
  pub fn new(f: F) -> Self { FilterMap(f) }
}

impl<F, Item, Err> MappingStage<Item, Err> for FilterMap<F>
where
  F: FnMut(Item) -> Option<Item>,
{
  #[inline]
  fn on_next(&mut self, value: Item, downstream: &mut dyn Observer<Item, Err>) {
    if let Some(value) = (self.0)(value) {
      downstream.next(value);
    }
  }
}
