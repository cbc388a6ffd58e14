//! Integration tests for the vessel-internals crate.
//!
//! ## RawAny Tests (3 tests)
//! - `test_raw_any_downcast_and_identity`: Creation, tags and downcasting
//!   through shared and mutable references
//! - `test_raw_any_clone_and_drop_behavior`: Clones are independent and every
//!   value is dropped exactly once
//! - `test_raw_any_into_value`: Moving the value out without dropping it
//!
//! ## RawVariant Tests (5 tests)
//! - `test_raw_variant_transitions`: Assignments across every alternative
//!   keep exactly one alternative live
//! - `test_raw_variant_drop_tracking`: Live-instance counting across
//!   assignments, replacements, clones and destruction
//! - `test_visit_routes_to_live_alternative`: Only the thunk of the live
//!   alternative runs
//! - `test_visit_mut_through_table`: Mutable visits modify the live value in
//!   place
//! - `test_large_alternative_list`: Dispatch over a 12-alternative list
//!
//! ## Slot Tests (1 test)
//! - `test_slot_matches_alternative_layout`: Storage size and alignment are
//!   the maxima over the alternatives

use std::{
    any::TypeId,
    cell::{Cell, RefCell},
    rc::Rc,
};

use vessel_internals::{
    RawAny, RawVariant,
    slot::AlignedSlot,
    tag::TypeTag,
    variant::{Alternatives, At},
    visit::{Visit, VisitMut, Visitor},
};

/// Counts live instances: +1 on creation and clone, -1 on drop.
struct Tracked {
    live: Rc<Cell<isize>>,
    label: &'static str,
}

impl Tracked {
    fn new(live: &Rc<Cell<isize>>, label: &'static str) -> Self {
        live.set(live.get() + 1);
        Self {
            live: Rc::clone(live),
            label,
        }
    }
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        Self::new(&self.live, self.label)
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.live.set(self.live.get() - 1);
    }
}

#[test]
fn test_raw_any_downcast_and_identity() {
    let mut value = RawAny::new(vec![1u32, 2, 3]);

    assert_eq!(value.as_ref().value_type_id(), TypeId::of::<Vec<u32>>());
    assert_eq!(value.as_ref().value_tag(), TypeTag::of::<Vec<u32>>());
    assert!(value.as_ref().value_tag().is::<Vec<u32>>());
    assert!(!value.as_ref().value_tag().is::<Vec<u64>>());

    // SAFETY: The value was created as a `Vec<u32>`.
    let inner = unsafe { value.as_mut().value_downcast_unchecked::<Vec<u32>>() };
    inner.push(4);

    let mut mutable = value.as_mut();
    let reborrowed = mutable.reborrow();
    assert_eq!(reborrowed.as_ref().value_type_name(), "alloc::vec::Vec<u32>");

    // SAFETY: The value was created as a `Vec<u32>`.
    let inner = unsafe { value.as_ref().value_downcast_unchecked::<Vec<u32>>() };
    assert_eq!(inner, &[1, 2, 3, 4]);
}

#[test]
fn test_raw_any_clone_and_drop_behavior() {
    let live = Rc::new(Cell::new(0));

    let original = RawAny::new(Tracked::new(&live, "original"));
    assert_eq!(live.get(), 1);

    let copies: Vec<RawAny> = (0..3).map(|_| original.clone()).collect();
    assert_eq!(live.get(), 4);

    for copy in &copies {
        // SAFETY: Every copy holds a `Tracked`.
        let tracked = unsafe { copy.as_ref().value_downcast_unchecked::<Tracked>() };
        assert_eq!(tracked.label, "original");
    }

    drop(original);
    assert_eq!(live.get(), 3);
    drop(copies);
    assert_eq!(live.get(), 0);
}

#[test]
fn test_raw_any_into_value() {
    let live = Rc::new(Cell::new(0));
    let raw = RawAny::new(Tracked::new(&live, "moved"));

    // SAFETY: The value was created as a `Tracked`.
    let tracked = unsafe { raw.into_value::<Tracked>() };
    assert_eq!(live.get(), 1);
    assert_eq!(tracked.label, "moved");
    drop(tracked);
    assert_eq!(live.get(), 0);
}

type Three = (i32, String, f64);

#[test]
fn test_raw_variant_transitions() {
    let mut value = RawVariant::<Three>::new(1i32);

    for step in 0..9i32 {
        match step % 3 {
            0 => value.set(step),
            1 => value.set(step.to_string()),
            _ => value.set(f64::from(step)),
        }

        let expected = (step % 3) as usize;
        assert_eq!(value.index(), expected);
        let live = [
            value.holds::<i32, _>(),
            value.holds::<String, _>(),
            value.holds::<f64, _>(),
        ];
        assert_eq!(live.iter().filter(|&&holds| holds).count(), 1);
        assert!(live[expected]);

        assert_eq!(value.get::<i32, _>().is_some(), live[0]);
        assert_eq!(value.get::<String, _>().is_some(), live[1]);
        assert_eq!(value.get::<f64, _>().is_some(), live[2]);
    }
}

#[test]
fn test_raw_variant_drop_tracking() {
    let live = Rc::new(Cell::new(0));
    {
        let mut value = RawVariant::<(Tracked, u8, String)>::new(Tracked::new(&live, "a"));
        assert_eq!(live.get(), 1);

        value.set(7u8);
        assert_eq!(live.get(), 0);

        value.set(Tracked::new(&live, "b"));
        let copy = value.clone();
        assert_eq!(live.get(), 2);

        let previous = value.replace(String::from("c"));
        assert_eq!(live.get(), 2);
        drop(previous);
        assert_eq!(live.get(), 1);

        let tracked = copy.into_inner::<Tracked, _>().ok().unwrap();
        assert_eq!(tracked.label, "b");
        assert_eq!(live.get(), 1);
    }
    assert_eq!(live.get(), 0);
}

/// Records which alternatives were visited.
struct Recorder {
    calls: Rc<RefCell<Vec<&'static str>>>,
}

impl Visitor for Recorder {
    type Output = usize;
}

impl Visit<i32> for Recorder {
    fn visit(&mut self, _value: &i32) -> usize {
        self.calls.borrow_mut().push("i32");
        0
    }
}

impl Visit<String> for Recorder {
    fn visit(&mut self, _value: &String) -> usize {
        self.calls.borrow_mut().push("String");
        1
    }
}

impl Visit<f64> for Recorder {
    fn visit(&mut self, _value: &f64) -> usize {
        self.calls.borrow_mut().push("f64");
        2
    }
}

#[test]
fn test_visit_routes_to_live_alternative() {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let mut value = RawVariant::<Three>::new(String::from("x"));
    value.set(42i32);

    let result = value.visit(Recorder {
        calls: Rc::clone(&calls),
    });
    assert_eq!(result, 0);
    assert_eq!(*calls.borrow(), ["i32"]);

    value.set(0.5f64);
    let mut recorder = Recorder {
        calls: Rc::clone(&calls),
    };
    assert_eq!(value.visit(&mut recorder), 2);
    assert_eq!(value.visit(&mut recorder), 2);
    assert_eq!(*calls.borrow(), ["i32", "f64", "f64"]);
}

/// Doubles every numeric alternative and repeats strings.
struct Double;

impl Visitor for Double {
    type Output = ();
}

impl VisitMut<i32> for Double {
    fn visit_mut(&mut self, value: &mut i32) {
        *value *= 2;
    }
}

impl VisitMut<String> for Double {
    fn visit_mut(&mut self, value: &mut String) {
        *value = value.repeat(2);
    }
}

impl VisitMut<f64> for Double {
    fn visit_mut(&mut self, value: &mut f64) {
        *value *= 2.0;
    }
}

#[test]
fn test_visit_mut_through_table() {
    let mut value = RawVariant::<Three>::new(String::from("ab"));
    value.visit_mut(Double);
    assert_eq!(value.get::<String, _>().map(String::as_str), Some("abab"));

    value.set(21i32);
    value.visit_mut(Double);
    assert_eq!(value.get::<i32, _>(), Some(&42));
}

/// Reports the position of the visited alternative.
struct Position;

impl Visitor for Position {
    type Output = u32;
}

impl Visit<u8> for Position {
    fn visit(&mut self, value: &u8) -> u32 {
        u32::from(*value)
    }
}

impl Visit<u16> for Position {
    fn visit(&mut self, value: &u16) -> u32 {
        u32::from(*value) + 100
    }
}

type Twelve = (u8, u8, u8, u8, u8, u8, u8, u8, u8, u8, u8, u16);

#[test]
fn test_large_alternative_list() {
    let mut value = RawVariant::<Twelve>::new::<u8, At<5>>(5);
    assert_eq!(value.index(), 5);
    assert_eq!(value.visit(Position), 5);
    assert_eq!(value.get::<u8, At<4>>(), None);

    value.set(7u16);
    assert_eq!(value.index(), 11);
    assert_eq!(value.visit(Position), 107);
    assert_eq!(value.active_type_name(), "u16");
}

#[test]
fn test_slot_matches_alternative_layout() {
    type Layout = <Three as Alternatives>::Layout;
    let largest = [
        size_of::<i32>(),
        size_of::<String>(),
        size_of::<f64>(),
    ]
    .into_iter()
    .max()
    .unwrap();
    let most_aligned = [align_of::<i32>(), align_of::<String>(), align_of::<f64>()]
        .into_iter()
        .max()
        .unwrap();

    assert_eq!(size_of::<AlignedSlot<Layout>>(), largest);
    assert_eq!(align_of::<AlignedSlot<Layout>>(), most_aligned);
    assert!(size_of::<RawVariant<Three>>() <= largest + size_of::<usize>() + most_aligned);
}
