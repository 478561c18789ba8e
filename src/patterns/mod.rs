//! Pattern exercises and the catalogue that lists them

pub mod adapter;
pub mod bridge;
pub mod command;
pub mod composite;
pub mod decorator;
pub mod facade;
pub mod flyweight;
pub mod handler_chain;
pub mod interpreter;
pub mod iterator;
pub mod mediator;
pub mod memento;
pub mod null_object;
pub mod observer;
pub mod proxy;
pub mod state;
pub mod strategy;
pub mod visitor;

use crate::core::config::ExerciseConfig;
use crate::core::error::ExerciseError;
use crate::core::transcript::Transcript;

pub type ExerciseFn = fn(&ExerciseConfig, &mut Transcript) -> Result<(), ExerciseError>;

/// A named, runnable exercise
#[derive(Clone, Copy)]
pub struct Exercise {
    pub name: &'static str,
    pub run: ExerciseFn,
}

impl std::fmt::Debug for Exercise {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Exercise").field("name", &self.name).finish()
    }
}

/// All exercises, in the order they run
pub static CATALOGUE: &[Exercise] = &[
    Exercise { name: "Adapter", run: adapter::run },
    Exercise { name: "Bridge", run: bridge::run },
    Exercise { name: "Command", run: command::run },
    Exercise { name: "Composite", run: composite::run },
    Exercise { name: "Decorator", run: decorator::run },
    Exercise { name: "Facade", run: facade::run },
    Exercise { name: "Flyweight", run: flyweight::run },
    Exercise { name: "HandlerChain", run: handler_chain::run },
    Exercise { name: "Interpreter", run: interpreter::run },
    Exercise { name: "Iterator", run: iterator::run },
    Exercise { name: "Mediator", run: mediator::run },
    Exercise { name: "Memento", run: memento::run },
    Exercise { name: "NullObject", run: null_object::run },
    Exercise { name: "Observer", run: observer::run },
    Exercise { name: "Proxy", run: proxy::run },
    Exercise { name: "State", run: state::run },
    Exercise { name: "Strategy", run: strategy::run },
    Exercise { name: "Visitor", run: visitor::run },
];

/// Look up an exercise by name, ignoring case
pub fn find(name: &str) -> Option<&'static Exercise> {
    CATALOGUE.iter().find(|e| e.name.eq_ignore_ascii_case(name))
}

pub fn names() -> Vec<&'static str> {
    CATALOGUE.iter().map(|e| e.name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_ignores_case() {
        assert_eq!(find("handlerchain").map(|e| e.name), Some("HandlerChain"));
        assert_eq!(find("STATE").map(|e| e.name), Some("State"));
        assert!(find("Singleton").is_none());
    }

    #[test]
    fn test_catalogue_names_unique() {
        let mut names = names();
        assert_eq!(names.len(), 18);
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 18);
    }
}
