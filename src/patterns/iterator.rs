//! Iterator exercise
//!
//! A container hands out separate iterators over its keys, its values and
//! its key/value pairs without exposing how the data is stored.

use std::fmt;

use crate::core::config::ExerciseConfig;
use crate::core::error::ExerciseError;
use crate::core::transcript::Transcript;

/// A key with its value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemPair {
    pub key: String,
    pub value: String,
}

impl fmt::Display for ItemPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.key, self.value)
    }
}

/// Fixed container of three keyed values, stored as parallel arrays
#[derive(Debug)]
pub struct IteratorContainer {
    keys: [&'static str; 3],
    values: [&'static str; 3],
}

impl Default for IteratorContainer {
    fn default() -> Self {
        Self::new()
    }
}

impl IteratorContainer {
    pub fn new() -> Self {
        Self {
            keys: ["One", "Two", "Three"],
            values: ["Value 1", "Value 2", "Value 3"],
        }
    }

    pub fn keys(&self) -> StringIterator<'_> {
        StringIterator::new(&self.keys)
    }

    pub fn values(&self) -> StringIterator<'_> {
        StringIterator::new(&self.values)
    }

    pub fn items(&self) -> ItemIterator<'_> {
        ItemIterator {
            container: self,
            index: 0,
        }
    }
}

/// Walks one of the container's string arrays
pub struct StringIterator<'a> {
    items: &'a [&'static str],
    index: usize,
}

impl<'a> StringIterator<'a> {
    fn new(items: &'a [&'static str]) -> Self {
        Self { items, index: 0 }
    }
}

impl Iterator for StringIterator<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let item = self.items.get(self.index)?;
        self.index += 1;
        Some(item.to_string())
    }
}

/// Pairs up keys and values
pub struct ItemIterator<'a> {
    container: &'a IteratorContainer,
    index: usize,
}

impl Iterator for ItemIterator<'_> {
    type Item = ItemPair;

    fn next(&mut self) -> Option<ItemPair> {
        let key = self.container.keys.get(self.index)?;
        let value = self.container.values.get(self.index)?;
        self.index += 1;
        Some(ItemPair {
            key: key.to_string(),
            value: value.to_string(),
        })
    }
}

pub fn run(_config: &ExerciseConfig, out: &mut Transcript) -> Result<(), ExerciseError> {
    let items = IteratorContainer::new();

    out.line("  Iterating over keys only:");
    for key in items.keys() {
        out.line(format!("    {}", key));
    }

    out.line("  Iterating over values only:");
    for value in items.values() {
        out.line(format!("    {}", value));
    }

    out.line("  Iterating over all items:");
    for pair in items.items() {
        out.line(format!("    {}", pair));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iterators_are_independent() {
        let container = IteratorContainer::new();
        let mut keys = container.keys();
        assert_eq!(keys.next().as_deref(), Some("One"));
        let values: Vec<String> = container.values().collect();
        assert_eq!(values, vec!["Value 1", "Value 2", "Value 3"]);
        assert_eq!(keys.next().as_deref(), Some("Two"));
    }

    #[test]
    fn test_items_exhaust() {
        let container = IteratorContainer::new();
        let mut items = container.items();
        assert_eq!(items.by_ref().count(), 3);
        assert!(items.next().is_none());
    }

    #[test]
    fn test_exercise_output() {
        let mut out = Transcript::new();
        run(&ExerciseConfig::default(), &mut out).unwrap();
        assert_eq!(
            out.into_lines(),
            vec![
                "  Iterating over keys only:",
                "    One",
                "    Two",
                "    Three",
                "  Iterating over values only:",
                "    Value 1",
                "    Value 2",
                "    Value 3",
                "  Iterating over all items:",
                "    One = Value 1",
                "    Two = Value 2",
                "    Three = Value 3",
            ]
        );
    }
}
