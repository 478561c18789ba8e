//! Observer exercise
//!
//! A number producer bumps its number on every update and notifies each
//! subscribed observer. Observers are compared by identity, so subscribing
//! the same observer twice has no effect.

use std::cell::RefCell;
use std::rc::Rc;

use crate::core::config::ExerciseConfig;
use crate::core::error::ExerciseError;
use crate::core::transcript::Transcript;

pub trait NumberChanged {
    fn notify(&mut self, number: u32, out: &mut Transcript);
}

pub type SharedObserver = Rc<RefCell<dyn NumberChanged>>;

pub struct DecimalObserver;

impl NumberChanged for DecimalObserver {
    fn notify(&mut self, number: u32, out: &mut Transcript) {
        out.line(format!("    Decimal    : {}", number));
    }
}

pub struct HexadecimalObserver;

impl NumberChanged for HexadecimalObserver {
    fn notify(&mut self, number: u32, out: &mut Transcript) {
        out.line(format!("    Hexadecimal: 0X{:08X}", number));
    }
}

pub struct BinaryObserver;

impl NumberChanged for BinaryObserver {
    fn notify(&mut self, number: u32, out: &mut Transcript) {
        out.line(format!("    Binary     : 0b{:032b}", number));
    }
}

fn same_observer(a: &SharedObserver, b: &SharedObserver) -> bool {
    std::ptr::eq(Rc::as_ptr(a) as *const (), Rc::as_ptr(b) as *const ())
}

#[derive(Default)]
pub struct NumberProducer {
    number: u32,
    observers: Vec<SharedObserver>,
}

impl NumberProducer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, observer: &SharedObserver) {
        if !self.observers.iter().any(|o| same_observer(o, observer)) {
            self.observers.push(Rc::clone(observer));
        }
    }

    pub fn unsubscribe(&mut self, observer: &SharedObserver) {
        self.observers.retain(|o| !same_observer(o, observer));
    }

    #[cfg(test)]
    pub fn subscriber_count(&self) -> usize {
        self.observers.len()
    }

    /// Increment the number and notify all observers
    pub fn update(&mut self, out: &mut Transcript) {
        self.number += 1;
        // Observers may subscribe or unsubscribe while being notified.
        let observers = self.observers.clone();
        for observer in observers {
            observer.borrow_mut().notify(self.number, out);
        }
    }
}

pub fn run(_config: &ExerciseConfig, out: &mut Transcript) -> Result<(), ExerciseError> {
    let mut producer = NumberProducer::new();

    let observers: [SharedObserver; 3] = [
        Rc::new(RefCell::new(DecimalObserver)),
        Rc::new(RefCell::new(HexadecimalObserver)),
        Rc::new(RefCell::new(BinaryObserver)),
    ];
    for observer in &observers {
        producer.subscribe(observer);
    }

    for index in 0..10 {
        out.line(format!(
            "  Update {} on number producer.  Results from observers:",
            index
        ));
        producer.update(out);
    }

    for observer in &observers {
        producer.unsubscribe(observer);
    }
    Ok(())
}
