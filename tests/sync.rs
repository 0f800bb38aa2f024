use lazy_query::{LazySync, Producer};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc, OnceLock};
use std::thread;
use std::time::Duration;

mod contract;

fn param<V, E, F: FnMut() -> Result<V, E> + Send>(producer: F) -> LazySync<F> {
    LazySync::new(producer)
}

fn param_producer<P: Producer + Send>(producer: P) -> LazySync<P> {
    LazySync::new(producer)
}

#[test]
fn multiple_threads_can_access_to_the_same_property() {
    let s = Arc::new(param(|| Ok::<_, ()>(42)));

    let handles = (0..10)
        .map(|_| {
            let ss = s.clone();
            thread::spawn(move || assert_eq!(Ok(&42), ss.get()))
        })
        .collect::<Vec<_>>();

    for h in handles {
        h.join().unwrap()
    }
}

#[test]
fn racing_readers_evaluate_once() {
    let calls = AtomicUsize::new(0);
    let p = param(|| {
        calls.fetch_add(1, Ordering::SeqCst);
        thread::sleep(Duration::from_millis(20));
        Ok::<_, ()>(42)
    });

    thread::scope(|s| {
        for _ in 0..8 {
            s.spawn(|| assert_eq!(Ok(&42), p.get()));
        }
    });

    assert_eq!(1, calls.load(Ordering::SeqCst));
    assert_eq!(1, p.attempts());
}

#[test]
fn panicking_producer_does_not_break_the_cell() {
    let mut first = true;
    let p = param(move || {
        if std::mem::take(&mut first) {
            panic!("first evaluation panics");
        }
        Ok::<_, ()>(42)
    });

    let panicked = thread::scope(|s| s.spawn(|| p.get().copied()).join().is_err());

    assert!(panicked);
    assert!(!p.is_evaluated());
    assert_eq!(Ok(&42), p.get());
}

#[test]
fn attempts_can_be_read_while_evaluating() {
    type SelfReading = LazySync<Box<dyn FnMut() -> Result<usize, ()> + Send>>;

    let slot: Arc<OnceLock<Arc<SelfReading>>> = Arc::new(OnceLock::new());
    let inner = slot.clone();
    let producer: Box<dyn FnMut() -> Result<usize, ()> + Send> =
        Box::new(move || -> Result<usize, ()> { Ok(inner.get().ok_or(())?.attempts()) });
    let cell = Arc::new(LazySync::new(producer));
    let _ = slot.set(cell.clone());

    let (tx, rx) = mpsc::channel();
    let worker = cell.clone();
    thread::spawn(move || {
        let _ = tx.send(worker.get().copied());
    });

    assert_eq!(Ok(Ok(1)), rx.recv_timeout(Duration::from_secs(5)));
    assert_eq!(1, cell.attempts());
}
