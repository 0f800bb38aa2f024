use super::*;
use std::cell::{Cell, OnceCell, RefCell, RefMut};

struct LazyImpl<P: Producer> {
    value: OnceCell<P::Output>,
    field: RefCell<Field<P>>,
    attempts: Cell<usize>,
}

impl<P: Producer> LazyDelegate for LazyImpl<P> {
    type Producer = P;
    type Smart<'a> = RefMut<'a, Field<P>> where Self: 'a;

    fn cached(&self) -> Option<&P::Output> {
        self.value.get()
    }

    fn smart(&self) -> RefMut<'_, Field<P>> {
        match self.field.try_borrow_mut() {
            Ok(field) => field,
            Err(_) => panic!("lazy value read while it is being evaluated"),
        }
    }

    fn attempt(&self) -> usize {
        let attempt = self.attempts.get() + 1;
        self.attempts.set(attempt);
        attempt
    }

    fn store(&self, value: P::Output) -> &P::Output {
        let _ = self.value.set(value);
        match self.value.get() {
            Some(v) => v,
            None => unsafe { debug_unreachable!() },
        }
    }
}

impl<P: Producer> LazyImpl<P> {
    fn new(producer: P) -> Self {
        LazyImpl {
            value: OnceCell::new(),
            field: RefCell::new(Field::new(producer)),
            attempts: Cell::new(0),
        }
    }
}

/// Single threaded lazy value.
///
/// Reading the cell from inside its own producer panics.
pub struct Lazy<P: Producer>(LazyImpl<P>);

impl<P: Producer> Lazy<P> {
    pub fn new(producer: P) -> Self {
        Lazy(LazyImpl::new(producer))
    }

    /// Returns the cached value, evaluating the producer if no evaluation has
    /// succeeded yet. A failure is returned as is and nothing is cached.
    pub fn get(&self) -> Result<&P::Output, P::Error> {
        self.0.get()
    }

    pub fn is_evaluated(&self) -> bool {
        self.0.cached().is_some()
    }

    /// Number of times the producer has been invoked.
    pub fn attempts(&self) -> usize {
        self.0.attempts.get()
    }
}

impl<P: Producer> Memoize for Lazy<P> {
    type Producer = P;

    fn from_producer(producer: P) -> Self {
        Lazy::new(producer)
    }

    fn get(&self) -> Result<&P::Output, P::Error> {
        Lazy::get(self)
    }

    fn is_evaluated(&self) -> bool {
        Lazy::is_evaluated(self)
    }
}
