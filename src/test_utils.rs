//! Helpers for testing the list with elements that keep track of their own
//! lifetime, and that can be made to panic on demand.

use std::cell::{Cell, RefCell};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::thread;

thread_local! {
    static INSTANCES: RefCell<BTreeSet<u64>> = RefCell::new(BTreeSet::new());
    static NEXT_ID: Cell<u64> = Cell::new(0);
    /// Number of fault injection points to pass before panicking, or `None`
    /// if no fault is armed.
    static COUNTDOWN: Cell<Option<usize>> = Cell::new(None);
}

/// The panic payload of an injected fault.
#[derive(Debug)]
pub struct InjectedFault;

/// Panic with [`InjectedFault`] if the armed countdown reaches zero here.
///
/// A fault fires at most once per run of [`faulty_run`].
pub fn fault_injection_point() {
    let fire = COUNTDOWN.with(|countdown| match countdown.get() {
        Some(0) => {
            countdown.set(None);
            true
        }
        Some(n) => {
            countdown.set(Some(n - 1));
            false
        }
        None => false,
    });
    if fire {
        panic::panic_any(InjectedFault);
    }
}

/// Run `f` again and again, injecting a fault at the first fault injection point,
/// then at the second one, and so on, until a run passes through all of them.
///
/// Panics other than injected faults are propagated.
pub fn faulty_run<F: FnMut()>(mut f: F) {
    for skip in 0.. {
        COUNTDOWN.with(|countdown| countdown.set(Some(skip)));
        let result = panic::catch_unwind(AssertUnwindSafe(&mut f));
        COUNTDOWN.with(|countdown| countdown.set(None));
        match result {
            Ok(()) => return,
            Err(payload) if payload.is::<InjectedFault>() => continue,
            Err(payload) => panic::resume_unwind(payload),
        }
    }
}

fn is_live(id: u64) -> bool {
    INSTANCES.with(|instances| instances.borrow().contains(&id))
}

/// A test element holding an `i32`.
///
/// Every live `Element` is registered, so that leaks and double drops can be
/// detected with a [`NoNewInstancesGuard`]. Creating, cloning and comparing
/// elements are fault injection points.
pub struct Element {
    id: u64,
    data: i32,
}

impl Element {
    pub fn new(data: i32) -> Self {
        fault_injection_point();
        Self::register(data)
    }

    fn register(data: i32) -> Self {
        let id = NEXT_ID.with(|next| {
            let id = next.get();
            next.set(id + 1);
            id
        });
        INSTANCES.with(|instances| instances.borrow_mut().insert(id));
        Self { id, data }
    }

    /// Returns the value of a live element.
    pub fn value(&self) -> i32 {
        assert!(is_live(self.id), "use of a dropped element {}", self.id);
        self.data
    }
}

impl Clone for Element {
    fn clone(&self) -> Self {
        let data = self.value();
        fault_injection_point();
        Self::register(data)
    }
}

impl Drop for Element {
    fn drop(&mut self) {
        let removed = INSTANCES.with(|instances| instances.borrow_mut().remove(&self.id));
        assert!(removed, "element {} is dropped twice", self.id);
    }
}

impl PartialEq for Element {
    fn eq(&self, other: &Element) -> bool {
        fault_injection_point();
        self.value() == other.value()
    }
}

impl PartialEq<i32> for Element {
    fn eq(&self, other: &i32) -> bool {
        fault_injection_point();
        self.value() == *other
    }
}

impl PartialOrd for Element {
    fn partial_cmp(&self, other: &Element) -> Option<Ordering> {
        fault_injection_point();
        self.value().partial_cmp(&other.value())
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.data, f)
    }
}

/// Asserts on drop that the live elements are exactly the ones that were live
/// when the guard was created.
pub struct NoNewInstancesGuard {
    before: BTreeSet<u64>,
}

impl NoNewInstancesGuard {
    pub fn new() -> Self {
        let before = INSTANCES.with(|instances| instances.borrow().clone());
        Self { before }
    }
}

impl Drop for NoNewInstancesGuard {
    fn drop(&mut self) {
        if thread::panicking() {
            return;
        }
        INSTANCES.with(|instances| {
            assert_eq!(
                *instances.borrow(),
                self.before,
                "elements are leaked or dropped twice"
            )
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn faulty_run_visits_every_point() {
        let mut runs = 0;
        let mut completed = 0;
        faulty_run(|| {
            runs += 1;
            fault_injection_point();
            fault_injection_point();
            fault_injection_point();
            completed += 1;
        });
        assert_eq!(runs, 4);
        assert_eq!(completed, 1);
    }

    #[test]
    fn comparisons_are_fault_points() {
        let _guard = NoNewInstancesGuard::new();
        let mut runs = 0;
        faulty_run(|| {
            runs += 1;
            let a = Element::new(1);
            let b = Element::new(2);
            assert!(a != b);
            assert!(a == 1);
            assert!(a < b);
        });
        // Two constructions and three comparisons, then a run without fault.
        assert_eq!(runs, 6);
    }

    #[test]
    fn elements_are_tracked() {
        let guard = NoNewInstancesGuard::new();
        let a = Element::new(1);
        let b = a.clone();
        assert_eq!(a, b);
        assert_eq!(b, 1);
        assert_eq!(format!("{:?}", b), "1");
        drop((a, b));
        drop(guard);
    }

    #[test]
    #[should_panic(expected = "elements are leaked or dropped twice")]
    fn leak_is_detected() {
        let _guard = NoNewInstancesGuard::new();
        std::mem::forget(Element::new(1));
    }
}
