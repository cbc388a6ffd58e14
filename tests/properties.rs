//! Behavioral guarantees shared by both containers.
//!
//! - `test_round_trip`: storing a value and extracting it under its own type
//!   yields an equal value, any other type fails
//! - `test_exclusive_liveness`: exactly one alternative is live after any
//!   sequence of assignments
//! - `test_visit_touches_only_live_branch`: a visit runs one branch, once
//! - `test_copy_independence`: copies do not share resources
//! - `test_moved_from_holder_is_reusable`: a holder left empty by `take` can be
//!   dropped and reassigned
//! - `test_destructor_runs_exactly_once`: live-instance counts return to zero
//! - `test_int_or_string_scenario`: the canonical two-alternative walkthrough

use std::{cell::Cell, rc::Rc};

use vessel::{AnyValue, BadVariantAccess, Variant, Visit, Visitor};

#[test]
fn test_round_trip() {
    fn check<T: Clone + PartialEq + std::fmt::Debug + 'static>(value: T) {
        let holder = AnyValue::new(value.clone());
        assert_eq!(holder.get::<T>(), Ok(value));
        assert!(holder.get::<Unrelated>().is_err());
    }

    #[derive(Clone, Debug, PartialEq)]
    struct Unrelated;

    check(0u8);
    check(-7i64);
    check(String::from("text"));
    check(vec![Some(1.5f32), None]);
    check(("pair", 2usize));

    let holder = AnyValue::new(1u8);
    assert!(holder.get::<i8>().is_err());
    assert!(holder.get::<u16>().is_err());
}

/// One assignment applied to a three-alternative container.
type Step = fn(&mut Variant<(i32, String, f64)>);

#[test]
fn test_exclusive_liveness() {
    let mut value: Variant<(i32, String, f64)> = Variant::default();
    let script: [Step; 6] = [
        |v| v.set(String::from("a")),
        |v| v.set(1.0f64),
        |v| v.set(2i32),
        |v| v.set(3i32),
        |v| v.set(String::from("b")),
        |v| v.set(4.0f64),
    ];

    for step in script {
        step(&mut value);

        let holds = [
            value.holds::<i32, _>(),
            value.holds::<String, _>(),
            value.holds::<f64, _>(),
        ];
        assert_eq!(holds.into_iter().filter(|&live| live).count(), 1);
        assert_eq!(value.get::<i32, _>().is_ok(), holds[0]);
        assert_eq!(value.get::<String, _>().is_ok(), holds[1]);
        assert_eq!(value.get::<f64, _>().is_ok(), holds[2]);
    }
}

/// Counts the calls made to each branch.
#[derive(Default)]
struct BranchCounter {
    int: usize,
    string: usize,
    double: usize,
}

impl Visitor for BranchCounter {
    type Output = &'static str;
}

impl Visit<i32> for BranchCounter {
    fn visit(&mut self, _value: &i32) -> &'static str {
        self.int += 1;
        "int"
    }
}

impl Visit<String> for BranchCounter {
    fn visit(&mut self, _value: &String) -> &'static str {
        self.string += 1;
        "string"
    }
}

impl Visit<f64> for BranchCounter {
    fn visit(&mut self, _value: &f64) -> &'static str {
        self.double += 1;
        "double"
    }
}

#[test]
fn test_visit_touches_only_live_branch() {
    let mut value: Variant<(i32, String, f64)> = Variant::new(String::from("before"));
    value.set(42i32);

    let mut counter = BranchCounter::default();
    assert_eq!(value.visit(&mut counter), "int");
    assert_eq!(counter.int, 1);
    assert_eq!(counter.string, 0);
    assert_eq!(counter.double, 0);
}

#[test]
fn test_copy_independence() {
    let original: Variant<(u8, Vec<String>)> = Variant::new(vec![String::from("shared?")]);
    let mut copy = original.clone();

    copy.get_mut::<Vec<String>, _>()
        .unwrap()
        .push(String::from("no"));
    copy.get_mut::<Vec<String>, _>().unwrap()[0].push('!');

    assert_eq!(
        original.get::<Vec<String>, _>().unwrap(),
        &[String::from("shared?")]
    );
    assert_eq!(copy.get::<Vec<String>, _>().unwrap().len(), 2);

    let any = AnyValue::new(vec![1, 2]);
    let mut any_copy = any.clone();
    any_copy.get_mut::<Vec<i32>>().unwrap().clear();
    assert_eq!(any.get::<Vec<i32>>(), Ok(vec![1, 2]));
}

#[test]
fn test_moved_from_holder_is_reusable() {
    let live = Rc::new(Cell::new(0isize));

    let mut source = AnyValue::new(Tracked::new(&live));
    let target = source.take();
    assert!(!source.has_value());
    assert_eq!(live.get(), 1);

    source.set(Tracked::new(&live));
    assert_eq!(live.get(), 2);
    drop(source);
    drop(target);
    assert_eq!(live.get(), 0);

    let mut emptied = AnyValue::new(1u8);
    drop(emptied.take());
    drop(emptied);
}

/// Increments a counter on construction and decrements it on destruction.
struct Tracked(Rc<Cell<isize>>);

impl Tracked {
    fn new(live: &Rc<Cell<isize>>) -> Self {
        live.set(live.get() + 1);
        Self(Rc::clone(live))
    }
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        Self::new(&self.0)
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.0.set(self.0.get() - 1);
    }
}

#[test]
fn test_destructor_runs_exactly_once() {
    let live = Rc::new(Cell::new(0isize));
    {
        let mut value: Variant<(u8, Tracked, String)> = Variant::default();
        for round in 0..4u8 {
            value.set(Tracked::new(&live));
            assert_eq!(live.get(), 1);
            let copy = value.clone();
            assert_eq!(live.get(), 2);
            value.set(round);
            assert_eq!(live.get(), 1);
            value = copy;
            assert_eq!(live.get(), 1);
            value.set(String::from("s"));
            assert_eq!(live.get(), 0);
        }
        value.set(Tracked::new(&live));
        let _replaced = value.replace(Tracked::new(&live));
        assert_eq!(live.get(), 2);
    }
    assert_eq!(live.get(), 0);
}

#[test]
fn test_int_or_string_scenario() {
    let mut v: Variant<(i32, String)> = Variant::default();

    v.set(String::from("hi"));
    assert!(v.holds::<String, _>());
    assert_eq!(v.get::<String, _>().unwrap(), "hi");

    v.set(5i32);
    assert!(v.holds::<i32, _>());
    let error: BadVariantAccess = v.get::<String, _>().unwrap_err();
    assert_eq!(error.requested(), 1);
    assert_eq!(error.active(), 0);
    assert_eq!(v.get::<i32, _>(), Ok(&5));
}
