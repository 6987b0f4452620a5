use itertools::Itertools;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
}

/// Directory navigation state for the interactive file picker. Pure
/// selection logic; rendering lives in the ui module.
#[derive(Debug)]
pub struct Picker {
    dir: PathBuf,
    entries: Vec<Entry>,
    selected: usize,
    show_hidden: bool,
}

impl Picker {
    pub fn new<P: Into<PathBuf>>(dir: P, show_hidden: bool) -> io::Result<Self> {
        let dir = dir.into();
        let entries = read_entries(&dir, show_hidden)?;
        Ok(Self {
            dir,
            entries,
            selected: 0,
            show_hidden,
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_entry(&self) -> Option<&Entry> {
        self.entries.get(self.selected)
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.selected + 1 < self.entries.len() {
            self.selected += 1;
        }
    }

    /// Act on the selected entry: descend into a directory (returns `None`)
    /// or pick a file (returns its path).
    pub fn enter(&mut self) -> io::Result<Option<PathBuf>> {
        let Some(entry) = self.selected_entry().cloned() else {
            return Ok(None);
        };
        if entry.is_dir {
            self.entries = read_entries(&entry.path, self.show_hidden)?;
            self.dir = entry.path;
            self.selected = 0;
            Ok(None)
        } else {
            Ok(Some(entry.path))
        }
    }

    /// Move to the parent directory, if there is one.
    pub fn ascend(&mut self) -> io::Result<()> {
        let Some(parent) = self.dir.parent().map(Path::to_path_buf) else {
            return Ok(());
        };
        self.entries = read_entries(&parent, self.show_hidden)?;
        self.dir = parent;
        self.selected = 0;
        Ok(())
    }
}

/// Directory listing, directories first, each group sorted by name.
fn read_entries(dir: &Path, show_hidden: bool) -> io::Result<Vec<Entry>> {
    let entries = fs::read_dir(dir)?
        .filter_map(|res| res.ok())
        .filter_map(|dirent| {
            let name = dirent.file_name().to_str()?.to_owned();
            if !show_hidden && name.starts_with('.') {
                return None;
            }
            let is_dir = dirent.file_type().ok()?.is_dir();
            Some(Entry {
                path: dirent.path(),
                name,
                is_dir,
            })
        })
        .sorted_by_key(|entry| (!entry.is_dir, entry.name.to_lowercase()))
        .collect();
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn tree() -> tempfile::TempDir {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("src/main.rs"), "fn main() {}\n").unwrap();
        fs::write(dir.path().join("README.md"), "# readme\n").unwrap();
        fs::write(dir.path().join("build.py"), "pass\n").unwrap();
        fs::write(dir.path().join(".hidden"), "secret\n").unwrap();
        dir
    }

    #[test]
    fn test_listing_dirs_first_sorted() {
        let dir = tree();
        let picker = Picker::new(dir.path(), false).unwrap();
        let names: Vec<&str> = picker.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["src", "build.py", "README.md"]);
    }

    #[test]
    fn test_hidden_files_filtered() {
        let dir = tree();
        let picker = Picker::new(dir.path(), false).unwrap();
        assert!(picker.entries().iter().all(|e| e.name != ".hidden"));

        let picker = Picker::new(dir.path(), true).unwrap();
        assert!(picker.entries().iter().any(|e| e.name == ".hidden"));
    }

    #[test]
    fn test_selection_clamped() {
        let dir = tree();
        let mut picker = Picker::new(dir.path(), false).unwrap();
        picker.move_up();
        assert_eq!(picker.selected(), 0);
        for _ in 0..10 {
            picker.move_down();
        }
        assert_eq!(picker.selected(), picker.entries().len() - 1);
    }

    #[test]
    fn test_enter_file_returns_path() {
        let dir = tree();
        let mut picker = Picker::new(dir.path(), false).unwrap();
        picker.move_down(); // build.py
        let picked = picker.enter().unwrap();
        assert_eq!(picked, Some(dir.path().join("build.py")));
    }

    #[test]
    fn test_enter_directory_descends() {
        let dir = tree();
        let mut picker = Picker::new(dir.path(), false).unwrap();
        // "src" sorts first
        let picked = picker.enter().unwrap();
        assert_eq!(picked, None);
        assert_eq!(picker.dir(), dir.path().join("src"));
        assert_eq!(picker.entries().len(), 1);
        assert_eq!(picker.entries()[0].name, "main.rs");
    }

    #[test]
    fn test_ascend_returns_to_parent() {
        let dir = tree();
        let mut picker = Picker::new(dir.path(), false).unwrap();
        picker.enter().unwrap(); // into src/
        picker.ascend().unwrap();
        assert_eq!(picker.dir(), dir.path());
        assert_eq!(picker.selected(), 0);
    }

    #[test]
    fn test_enter_on_empty_directory_is_noop() {
        let dir = tempdir().unwrap();
        let mut picker = Picker::new(dir.path(), false).unwrap();
        assert!(picker.entries().is_empty());
        assert_eq!(picker.enter().unwrap(), None);
    }
}
