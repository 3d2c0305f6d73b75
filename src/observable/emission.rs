use smallvec::SmallVec;
use tracing::trace;

use super::Upstream;
use crate::{
  error::SubscribeError,
  observer::Observer,
  ops::{map::MapObserver, MappingStage},
};

/// Sequences up to this length are stored inline in the observable.
const INLINE_VALUES: usize = 4;

/// The fixed emission strategy of an observable, chosen by its factory.
///
/// Each variant only carries what its mode needs. Payloads sit in `Option`s (or
/// a drainable buffer) because delivery moves them out, and `release` drops
/// whatever was never delivered.
pub(crate) enum Emission<'a, Item, Err> {
  Single(Option<Item>),
  Sequence(SmallVec<[Item; INLINE_VALUES]>),
  ErrorOnly(Option<Err>),
  Mapped { upstream: &'a dyn Upstream<Item, Err>, stage: Box<dyn MappingStage<Item, Err> + 'a> },
}

impl<'a, Item, Err> Emission<'a, Item, Err> {
  pub(crate) fn emit(
    &mut self,
    observer: &mut dyn Observer<Item, Err>,
  ) -> Result<(), SubscribeError> {
    match self {
      Emission::Single(value) => {
        trace!(mode = "single", "delivering");
        if let Some(value) = value.take() {
          observer.next(value);
        }
        observer.complete();
      }
      Emission::Sequence(values) => {
        trace!(mode = "sequence", count = values.len(), "delivering");
        for value in values.drain(..) {
          observer.next(value);
        }
        observer.complete();
      }
      Emission::ErrorOnly(err) => {
        trace!(mode = "error", "delivering");
        if let Some(err) = err.take() {
          observer.error(err);
        }
        observer.complete();
      }
      Emission::Mapped { upstream, stage } => {
        trace!(mode = "mapped", "subscribing upstream");
        let mut forward = MapObserver::new(&mut **stage, observer);
        upstream.deliver(&mut forward)?;
      }
    }
    Ok(())
  }

  /// Drops undelivered data. A mapped emission owns none, so it passes the
  /// release on to its upstream.
  pub(crate) fn release(&mut self) {
    match self {
      Emission::Single(value) => drop(value.take()),
      Emission::Sequence(values) => values.clear(),
      Emission::ErrorOnly(err) => drop(err.take()),
      Emission::Mapped { upstream, .. } => upstream.teardown(),
    }
  }

  pub(crate) fn mode(&self) -> &'static str {
    match self {
      Emission::Single(_) => "single",
      Emission::Sequence(_) => "sequence",
      Emission::ErrorOnly(_) => "error",
      Emission::Mapped { .. } => "mapped",
    }
  }
}
