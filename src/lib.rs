//! Compute-once cells and the small query helpers built around them.
//!
//! A cell owns a [`Producer`] and evaluates it on first access, caching the
//! result. [`Lazy`] is the single threaded flavour, [`LazySync`] serializes the
//! first evaluation across threads. Text cells ([`LazyDecode`],
//! [`LazyMogrify`]) sit on top and render their cached value through
//! `Display` and `Debug`.

#[macro_use(debug_unreachable)]
extern crate debug_unreachable;

use std::ops::DerefMut;

mod decode;
mod error;
mod lazy;
mod mogrify;
mod query;
mod render;
mod sync;
mod text;
mod values;

pub use decode::{Decode, LazyDecode, LazyDecodeSync};
pub use error::LazyError;
pub use lazy::Lazy;
pub use mogrify::{LazyMogrify, Mogrify, Renderer};
pub use query::{is_query_type, table_from_string, DocType, FALLBACK_DATETIME_STR, TABLE_PREFIX};
pub use render::{Dialect, RenderError, SqlRenderer};
pub use sync::LazySync;
pub use text::{LazyText, TextProducer, TextSetup};
pub use values::{QueryValues, SqlValue};

/// The evaluation step of a cell.
///
/// `produce` may be called again after it failed, so implementors keep their
/// descriptor until they succeed.
pub trait Producer {
    type Output;
    type Error;

    fn produce(&mut self) -> Result<Self::Output, Self::Error>;
}

impl<V, E, F: FnMut() -> Result<V, E>> Producer for F {
    type Output = V;
    type Error = E;

    fn produce(&mut self) -> Result<V, E> {
        self()
    }
}

/// A cell flavour that [`LazyText`] can be built on.
pub trait Memoize {
    type Producer: Producer;

    fn from_producer(producer: Self::Producer) -> Self;

    fn get(&self) -> Result<&<Self::Producer as Producer>::Output, <Self::Producer as Producer>::Error>;

    fn is_evaluated(&self) -> bool;
}

struct Field<P: Producer> {
    producer: P,
}

impl<P: Producer> Field<P> {
    fn new(producer: P) -> Self {
        Field { producer }
    }

    fn compute(&mut self, attempt: usize) -> Result<P::Output, P::Error> {
        tracing::trace!(
            producer = std::any::type_name::<P>(),
            attempt,
            "evaluating lazy value"
        );
        let value = self.producer.produce();
        if value.is_err() {
            tracing::debug!(
                producer = std::any::type_name::<P>(),
                attempt,
                "lazy evaluation failed, value stays unevaluated"
            );
        }
        value
    }
}

/// Glue between a cache slot and the field guarding its producer.
///
/// `smart` hands out exclusive access to the field; the slot is written only
/// while that access is held, so readers that lost a race find the value on
/// their second look.
trait LazyDelegate {
    type Producer: Producer;
    type Smart<'a>: DerefMut<Target = Field<Self::Producer>>
    where
        Self: 'a;

    fn cached(&self) -> Option<&<Self::Producer as Producer>::Output>;

    fn smart(&self) -> Self::Smart<'_>;

    /// Records one more evaluation and returns its number. The counter lives
    /// outside the field so it can be read while an evaluation runs.
    fn attempt(&self) -> usize;

    fn store(&self, value: <Self::Producer as Producer>::Output) -> &<Self::Producer as Producer>::Output;

    fn get(&self) -> Result<&<Self::Producer as Producer>::Output, <Self::Producer as Producer>::Error> {
        if let Some(value) = self.cached() {
            return Ok(value);
        }
        let mut field = self.smart();
        if let Some(value) = self.cached() {
            return Ok(value);
        }
        let value = field.compute(self.attempt())?;
        let value = self.store(value);
        drop(field);
        Ok(value)
    }
}
