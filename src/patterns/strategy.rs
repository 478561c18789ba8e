//! Strategy exercise
//!
//! The same table is shown three times, each time with a different sort
//! strategy plugged into the display object.

use std::cmp::Ordering;
use std::fmt;

use crate::core::config::ExerciseConfig;
use crate::core::error::ExerciseError;
use crate::core::transcript::Transcript;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryInformation {
    pub name: String,
    pub age: u32,
    pub height: u32,
}

impl EntryInformation {
    pub fn new(name: &str, age: u32, height: u32) -> Self {
        Self {
            name: name.to_string(),
            age,
            height,
        }
    }
}

impl fmt::Display for EntryInformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:6} {:3} {:3}\"", self.name, self.age, self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOption {
    ByName,
    ByAge,
    ByHeight,
}

/// A way of ordering entries
pub trait SortEntries {
    fn compare(&self, left: &EntryInformation, right: &EntryInformation) -> Ordering;

    fn name(&self) -> &'static str;
}

struct SortByName;

impl SortEntries for SortByName {
    fn compare(&self, left: &EntryInformation, right: &EntryInformation) -> Ordering {
        left.name.cmp(&right.name)
    }

    fn name(&self) -> &'static str {
        "SortByName"
    }
}

struct SortByAge;

impl SortEntries for SortByAge {
    fn compare(&self, left: &EntryInformation, right: &EntryInformation) -> Ordering {
        left.age.cmp(&right.age)
    }

    fn name(&self) -> &'static str {
        "SortByAge"
    }
}

struct SortByHeight;

impl SortEntries for SortByHeight {
    fn compare(&self, left: &EntryInformation, right: &EntryInformation) -> Ordering {
        left.height.cmp(&right.height)
    }

    fn name(&self) -> &'static str {
        "SortByHeight"
    }
}

pub fn sort_strategy(option: SortOption) -> Box<dyn SortEntries> {
    match option {
        SortOption::ByName => Box::new(SortByName),
        SortOption::ByAge => Box::new(SortByAge),
        SortOption::ByHeight => Box::new(SortByHeight),
    }
}

/// Displays entries using a sort strategy chosen at construction
pub struct ShowEntries {
    strategy: Box<dyn SortEntries>,
    reversed: bool,
}

impl ShowEntries {
    pub fn new(option: SortOption, reversed: bool) -> Self {
        Self {
            strategy: sort_strategy(option),
            reversed,
        }
    }

    /// Sorted copy of `entries`; the input is left untouched
    pub fn sorted(&self, entries: &[EntryInformation]) -> Vec<EntryInformation> {
        let mut sorted = entries.to_vec();
        sorted.sort_by(|left, right| {
            let ordering = self.strategy.compare(left, right);
            if self.reversed {
                ordering.reverse()
            } else {
                ordering
            }
        });
        sorted
    }

    pub fn show_entries(&self, entries: &[EntryInformation], out: &mut Transcript) {
        let order = if self.reversed { "Descending" } else { "Ascending" };
        out.line(format!(
            "    Sort strategy: {} (order = {})",
            self.strategy.name(),
            order
        ));
        out.line(format!("      {:6} {:3} {:3}", "Name", "Age", "Height"));
        out.line(format!("      {:6} {:3} {:3}", "------", "---", "------"));
        for entry in self.sorted(entries) {
            out.line(format!("      {}", entry));
        }
    }
}

fn entries() -> Vec<EntryInformation> {
    vec![
        EntryInformation::new("Ronnie", 19, 84),
        EntryInformation::new("Elaine", 29, 78),
        EntryInformation::new("Jack", 20, 81),
        EntryInformation::new("Myra", 35, 71),
        EntryInformation::new("Fred", 18, 88),
    ]
}

pub fn run(_config: &ExerciseConfig, out: &mut Transcript) -> Result<(), ExerciseError> {
    let entries = entries();
    let displays = [
        ShowEntries::new(SortOption::ByName, false),
        ShowEntries::new(SortOption::ByAge, false),
        ShowEntries::new(SortOption::ByHeight, true),
    ];
    for display in &displays {
        display.show_entries(&entries, out);
    }
    Ok(())
}
