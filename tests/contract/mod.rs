use super::*;
use std::convert::Infallible;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::{Arc, Mutex};
use lazy_query::Producer;

fn ok<V>(value: V) -> Result<V, Infallible> {
    Ok(value)
}

#[test]
fn should_return_42() {
    let s = param(|| ok(42));

    assert_eq!(Ok(&42), s.get());
}

#[test]
fn should_return_42_also_after_changed_backing_field_value() {
    let seed = AtomicI32::new(42);

    let s = param(|| ok(seed.load(Ordering::SeqCst)));

    assert_eq!(Ok(&42), s.get());

    seed.store(43, Ordering::SeqCst);
    assert_eq!(Ok(&42), s.get());
}

#[test]
fn should_call_producer_just_once() {
    let sentinel = Arc::new(Mutex::new(0));

    let p = param(|| {
        *sentinel.lock().unwrap() += 1;
        ok(42)
    });

    assert_eq!(Ok(&42), p.get());
    p.get().unwrap();
    assert_eq!(1, *sentinel.lock().unwrap());
    assert_eq!(1, p.attempts());
}

#[test]
fn should_return_the_same_reference() {
    let p = param(|| ok(String::from("42")));

    let first = p.get().unwrap();
    let second = p.get().unwrap();

    assert!(std::ptr::eq(first, second));
}

#[test]
fn should_start_unevaluated() {
    let p = param(|| ok(42));

    assert!(!p.is_evaluated());
    assert_eq!(0, p.attempts());
    p.get().unwrap();
    assert!(p.is_evaluated());
}

#[test]
fn should_propagate_producer_error() {
    let p = param(|| Err::<i32, _>("boom"));

    assert_eq!(Err("boom"), p.get());
    assert!(!p.is_evaluated());
}

#[test]
fn should_retry_after_a_failure() {
    let mut calls = 0;
    let p = param(move || {
        calls += 1;
        if calls == 1 {
            Err("boom")
        } else {
            Ok(calls)
        }
    });

    assert_eq!(Err("boom"), p.get());
    assert_eq!(Ok(&2), p.get());
    assert_eq!(Ok(&2), p.get());
    assert_eq!(2, p.attempts());
}

#[test]
fn should_work_with_string_too() {
    let p = param(|| ok("string slice"));

    assert_eq!(Ok(&"string slice"), p.get());
}

#[test]
fn use_producer_trait() {
    struct P;
    impl Producer for P {
        type Output = i32;
        type Error = Infallible;

        fn produce(&mut self) -> Result<Self::Output, Self::Error> {
            Ok(42)
        }
    }

    let p = param_producer(P);

    assert_eq!(Ok(&42), p.get());
}

#[test]
fn use_function_as_producer() {
    fn producer() -> Result<i32, Infallible> {
        Ok(42)
    }

    let p = param(producer);

    assert_eq!(Ok(&42), p.get());
}
