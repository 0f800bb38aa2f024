use super::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

struct LazySyncImpl<P: Producer> {
    value: OnceLock<P::Output>,
    field: Mutex<Field<P>>,
    attempts: AtomicUsize,
}

type SharedSmartContainer<'local, P> = MutexGuard<'local, Field<P>>;

impl<P: Producer> LazyDelegate for LazySyncImpl<P> {
    type Producer = P;
    type Smart<'a> = SharedSmartContainer<'a, P> where Self: 'a;

    fn cached(&self) -> Option<&P::Output> {
        self.value.get()
    }

    // A panicking producer poisons the mutex before anything reaches the
    // slot, so the field is still usable.
    fn smart(&self) -> SharedSmartContainer<'_, P> {
        self.field.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn attempt(&self) -> usize {
        self.attempts.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn store(&self, value: P::Output) -> &P::Output {
        let _ = self.value.set(value);
        match self.value.get() {
            Some(v) => v,
            None => unsafe { debug_unreachable!() },
        }
    }
}

impl<P: Producer> LazySyncImpl<P> {
    fn new(producer: P) -> Self {
        LazySyncImpl {
            value: OnceLock::new(),
            field: Mutex::new(Field::new(producer)),
            attempts: AtomicUsize::new(0),
        }
    }
}

/// Thread safe lazy value.
///
/// Threads racing on the first read wait for a single evaluation. Reading the
/// cell from inside its own producer deadlocks.
pub struct LazySync<P: Producer>(LazySyncImpl<P>);

impl<P: Producer> LazySync<P> {
    pub fn new(producer: P) -> Self {
        LazySync(LazySyncImpl::new(producer))
    }

    pub fn get(&self) -> Result<&P::Output, P::Error> {
        self.0.get()
    }

    pub fn is_evaluated(&self) -> bool {
        self.0.cached().is_some()
    }

    pub fn attempts(&self) -> usize {
        self.0.attempts.load(Ordering::SeqCst)
    }
}

impl<P: Producer> Memoize for LazySync<P> {
    type Producer = P;

    fn from_producer(producer: P) -> Self {
        LazySync::new(producer)
    }

    fn get(&self) -> Result<&P::Output, P::Error> {
        LazySync::get(self)
    }

    fn is_evaluated(&self) -> bool {
        LazySync::is_evaluated(self)
    }
}
