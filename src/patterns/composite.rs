//! Composite exercise
//!
//! Files and directories share one `FileDirEntry` interface, so a single
//! entry and a whole tree are displayed by the same code. A directory's
//! length is the sum of its children.

use std::path::Path;

use chrono::{DateTime, Local};
use once_cell::sync::Lazy;
use regex::Regex;
use walkdir::WalkDir;

use crate::core::config::ExerciseConfig;
use crate::core::error::ExerciseError;
use crate::core::transcript::Transcript;

const NAME_PADDING_SIZE: usize = 20;
const TIMESTAMP_FORMAT: &str = "%m/%d/%Y %I:%M:%S %p";

/// Path separators accepted by `get_entry`
static PATH_SEPARATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\\/]").expect("Invalid PATH_SEPARATOR_RE regex"));

/// Common interface of files and directories
pub trait FileDirEntry {
    fn name(&self) -> &str;
    fn length(&self) -> u64;
    fn when_modified(&self) -> DateTime<Local>;

    fn is_dir(&self) -> bool {
        false
    }

    fn children(&self) -> &[Box<dyn FileDirEntry>] {
        &[]
    }
}

pub struct FileEntry {
    name: String,
    length: u64,
    modified: DateTime<Local>,
}

impl FileEntry {
    pub fn new(name: impl Into<String>, length: u64, modified: DateTime<Local>) -> Self {
        Self {
            name: name.into(),
            length,
            modified,
        }
    }
}

impl FileDirEntry for FileEntry {
    fn name(&self) -> &str {
        &self.name
    }

    fn length(&self) -> u64 {
        self.length
    }

    fn when_modified(&self) -> DateTime<Local> {
        self.modified
    }
}

pub struct DirEntry {
    name: String,
    modified: DateTime<Local>,
    children: Vec<Box<dyn FileDirEntry>>,
}

impl DirEntry {
    pub fn new(name: impl Into<String>, modified: DateTime<Local>) -> Self {
        Self {
            name: name.into(),
            modified,
            children: Vec::new(),
        }
    }

    pub fn with_child(mut self, child: impl FileDirEntry + 'static) -> Self {
        self.add(Box::new(child));
        self
    }

    pub fn add(&mut self, child: Box<dyn FileDirEntry>) {
        self.children.push(child);
    }
}

impl FileDirEntry for DirEntry {
    fn name(&self) -> &str {
        &self.name
    }

    fn length(&self) -> u64 {
        self.children.iter().map(|child| child.length()).sum()
    }

    fn when_modified(&self) -> DateTime<Local> {
        self.modified
    }

    fn is_dir(&self) -> bool {
        true
    }

    fn children(&self) -> &[Box<dyn FileDirEntry>] {
        &self.children
    }
}

/// The built-in hierarchy
pub fn sample_tree() -> DirEntry {
    let now = Local::now();
    DirEntry::new("root", now)
        .with_child(FileEntry::new("FileA.txt", 101, now))
        .with_child(FileEntry::new("FileB.txt", 102, now))
        .with_child(FileEntry::new("FileC.txt", 103, now))
        .with_child(
            DirEntry::new("subdir1", now)
                .with_child(FileEntry::new("FileD.txt", 104, now))
                .with_child(FileEntry::new("FileE.txt", 105, now))
                .with_child(
                    DirEntry::new("subdir2", now)
                        .with_child(FileEntry::new("FileF.txt", 106, now))
                        .with_child(FileEntry::new("FileG.txt", 107, now)),
                ),
        )
}

/// Look up an entry by a `/` or `\` separated path that starts with the
/// root's own name
pub fn get_entry<'a>(root: &'a dyn FileDirEntry, path: &str) -> Option<&'a dyn FileDirEntry> {
    let mut components = PATH_SEPARATOR_RE.split(path);
    if components.next()? != root.name() {
        return None;
    }
    components.try_fold(root, |entry, component| {
        entry
            .children()
            .iter()
            .map(|child| &**child)
            .find(|child| child.name() == component)
    })
}

/// Build a tree from a real directory
pub fn load_directory(root: &Path) -> Result<DirEntry, ExerciseError> {
    let mut stack: Vec<DirEntry> = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| ExerciseError::io(format!("Reading {}", root.display()), e.into()))?;
        let metadata = entry
            .metadata()
            .map_err(|e| ExerciseError::io(format!("Reading {}", entry.path().display()), e.into()))?;
        let modified = metadata
            .modified()
            .map(DateTime::<Local>::from)
            .unwrap_or_else(|_| Local::now());
        let name = entry.file_name().to_string_lossy().into_owned();

        while stack.len() > entry.depth() {
            fold_top(&mut stack);
        }

        if entry.file_type().is_dir() {
            stack.push(DirEntry::new(name, modified));
        } else if let Some(parent) = stack.last_mut() {
            parent.add(Box::new(FileEntry::new(name, metadata.len(), modified)));
        } else {
            return Err(ExerciseError::Failed(format!(
                "'{}' is not a directory",
                root.display()
            )));
        }
    }

    while stack.len() > 1 {
        fold_top(&mut stack);
    }
    stack.pop().ok_or_else(|| {
        ExerciseError::Failed(format!("Unable to read '{}'", root.display()))
    })
}

/// Move the innermost open directory into its parent
fn fold_top(stack: &mut Vec<DirEntry>) {
    if let Some(done) = stack.pop() {
        if let Some(parent) = stack.last_mut() {
            parent.add(Box::new(done));
        } else {
            stack.push(done);
        }
    }
}

/// One line per entry, children indented two spaces per level
pub fn format_entry(entry: &dyn FileDirEntry, depth: usize) -> String {
    let indent = depth * 2;
    let mut output = format!("{:indent$}{}", "", entry.name(), indent = indent);
    let mut padding = NAME_PADDING_SIZE.saturating_sub(entry.name().len() + indent);
    if entry.is_dir() {
        output.push('/');
        padding = padding.saturating_sub(1);
    }
    output.push_str(&" ".repeat(padding));
    output.push_str(&format!("{:4}", entry.length()));
    output.push_str(&format!("  {}", entry.when_modified().format(TIMESTAMP_FORMAT)));
    output.push('\n');

    for child in entry.children() {
        output.push_str(&format_entry(child.as_ref(), depth + 1));
    }
    output
}

fn show_entry(root: &dyn FileDirEntry, path: &str, out: &mut Transcript) -> Result<(), ExerciseError> {
    let entry = get_entry(root, path)
        .ok_or_else(|| ExerciseError::Failed(format!("Unable to find '{}'", path)))?;
    out.line(format!("  Showing object '{}'", path));
    out.line(format_entry(entry, 2));
    Ok(())
}

pub fn run(config: &ExerciseConfig, out: &mut Transcript) -> Result<(), ExerciseError> {
    let root = sample_tree();
    show_entry(&root, "root", out)?;
    show_entry(&root, "root/subdir1/FileD.txt", out)?;

    if let Some(path) = &config.composite_root {
        let tree = load_directory(path)?;
        let name = tree.name().to_string();
        out.line(format!("  Showing directory '{}'", path.display()));
        show_entry(&tree, &name, out)?;
    }
    Ok(())
}
