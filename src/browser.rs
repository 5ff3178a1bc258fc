//! Image picker popup: a directory listing that only offers image files.

use std::path::{Path, PathBuf};

use crate::stylist::is_image_file;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserEntry {
    pub name: String,
    pub is_dir: bool,
    pub path: PathBuf,
}

/// Result of activating the highlighted entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserAction {
    None,
    Picked(PathBuf),
}

#[derive(Debug, Clone)]
pub struct FileBrowser {
    pub path: PathBuf,
    pub entries: Vec<BrowserEntry>,
    pub selected: usize,
    pub show_hidden: bool,
}

impl FileBrowser {
    pub fn new(path: impl Into<PathBuf>, show_hidden: bool) -> Self {
        let mut browser = Self {
            path: path.into(),
            entries: Vec::new(),
            selected: 0,
            show_hidden,
        };
        browser.refresh();
        browser
    }

    /// Re-read the current directory
    pub fn refresh(&mut self) {
        self.entries.clear();

        if let Some(parent) = self.path.parent() {
            self.entries.push(BrowserEntry {
                name: "..".to_string(),
                is_dir: true,
                path: parent.to_path_buf(),
            });
        }

        match std::fs::read_dir(&self.path) {
            Ok(entries) => {
                let mut dirs: Vec<BrowserEntry> = Vec::new();
                let mut files: Vec<BrowserEntry> = Vec::new();

                for entry in entries.flatten() {
                    let path = entry.path();
                    let name = entry.file_name().to_string_lossy().to_string();

                    if name.starts_with('.') && !self.show_hidden {
                        continue;
                    }

                    if path.is_dir() {
                        dirs.push(BrowserEntry { name, is_dir: true, path });
                    } else if is_image_file(&path) {
                        files.push(BrowserEntry { name, is_dir: false, path });
                    }
                }

                dirs.sort_by_key(|e| e.name.to_lowercase());
                files.sort_by_key(|e| e.name.to_lowercase());

                self.entries.extend(dirs);
                self.entries.extend(files);
            }
            Err(e) => tracing::warn!("Cannot list {}: {}", self.path.display(), e),
        }

        if self.selected >= self.entries.len() {
            self.selected = 0;
        }
    }

    pub fn move_down(&mut self) {
        if !self.entries.is_empty() {
            self.selected = (self.selected + 1) % self.entries.len();
        }
    }

    pub fn move_up(&mut self) {
        if !self.entries.is_empty() {
            self.selected = self
                .selected
                .checked_sub(1)
                .unwrap_or(self.entries.len() - 1);
        }
    }

    pub fn selected_entry(&self) -> Option<&BrowserEntry> {
        self.entries.get(self.selected)
    }

    /// Enter the highlighted directory, or hand back the highlighted file
    pub fn activate(&mut self) -> BrowserAction {
        match self.selected_entry().cloned() {
            Some(entry) if entry.is_dir => {
                self.change_dir(entry.path);
                BrowserAction::None
            }
            Some(entry) => BrowserAction::Picked(entry.path),
            None => BrowserAction::None,
        }
    }

    pub fn go_parent(&mut self) {
        if let Some(parent) = self.path.parent().map(Path::to_path_buf) {
            self.change_dir(parent);
        }
    }

    pub fn go_home(&mut self) {
        if let Some(home) = dirs::home_dir() {
            self.change_dir(home);
        }
    }

    pub fn toggle_hidden(&mut self) {
        self.show_hidden = !self.show_hidden;
        self.refresh();
    }

    fn change_dir(&mut self, path: PathBuf) {
        self.path = path;
        self.selected = 0;
        self.refresh();
    }
}
