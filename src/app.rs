use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::browser::{BrowserAction, FileBrowser};
use crate::config::AppConfig;
use crate::stylist::{format_bytes, SelectedImage, StyleCategory, StylistForm};
use crate::theme::Theme;

/// Seconds a status message stays on the info line
const STATUS_SECONDS: u64 = 3;

/// Controls in the upload section, in Tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Image,
    Style,
    Analyze,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Image => Focus::Style,
            Focus::Style => Focus::Analyze,
            Focus::Analyze => Focus::Image,
        }
    }

    fn prev(self) -> Self {
        match self {
            Focus::Image => Focus::Analyze,
            Focus::Style => Focus::Image,
            Focus::Analyze => Focus::Style,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Popup {
    None,
    FileBrowser,
    StyleMenu,
    Help,
}

pub struct App {
    pub form: StylistForm,
    pub focus: Focus,
    pub popup: Popup,
    pub theme: Theme,

    // Image picker; kept between openings so it reopens where it was left
    pub browser: Option<FileBrowser>,
    picker_start: PathBuf,
    show_hidden: bool,

    // Highlighted row while the style menu is open
    pub style_menu_selected: usize,

    // Status message (shown in info line, auto-clears after timeout)
    pub status_message: Option<String>,
    pub status_message_time: Option<Instant>,
    pub status_is_error: bool,
}

impl App {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            form: StylistForm::new(),
            focus: Focus::Image,
            popup: Popup::None,
            theme: Theme::load(config.theme_file.as_deref()),

            browser: None,
            picker_start: config.picker_start(),
            show_hidden: config.show_hidden,

            style_menu_selected: 0,

            status_message: None,
            status_message_time: None,
            status_is_error: false,
        }
    }

    /// Set a status message (auto-clears after a few seconds)
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
        self.status_message_time = Some(Instant::now());
        self.status_is_error = false;
    }

    /// Like `set_status`, shown in the danger color
    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.set_status(msg);
        self.status_is_error = true;
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if self.popup != Popup::None {
            return self.handle_popup_key(key);
        }

        self.handle_normal_key(key)
    }

    fn handle_normal_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Tab | KeyCode::Down => self.focus = self.focus.next(),
            KeyCode::BackTab | KeyCode::Up => self.focus = self.focus.prev(),

            KeyCode::Char(' ') | KeyCode::Enter => match self.focus {
                Focus::Image => self.open_image_picker(),
                Focus::Style => self.open_style_menu(),
                Focus::Analyze => self.analyze(),
            },

            // Cycle the dropdown in place when it has focus
            KeyCode::Right | KeyCode::Char('l') if self.focus == Focus::Style => {
                self.form.select_style(self.form.style().next());
            }
            KeyCode::Left if self.focus == Focus::Style => {
                self.form.select_style(self.form.style().prev());
            }

            KeyCode::Char('i') => {
                self.focus = Focus::Image;
                self.open_image_picker();
            }
            KeyCode::Char('s') => {
                self.focus = Focus::Style;
                self.open_style_menu();
            }
            KeyCode::Char('a') => {
                self.focus = Focus::Analyze;
                self.analyze();
            }

            KeyCode::Char('?') | KeyCode::Char('h') => self.popup = Popup::Help,

            _ => {}
        }
        Ok(())
    }

    fn handle_popup_key(&mut self, key: KeyEvent) -> Result<()> {
        match self.popup {
            Popup::FileBrowser => self.handle_browser_key(key),
            Popup::StyleMenu => {
                self.handle_style_menu_key(key);
                Ok(())
            }
            Popup::Help => {
                if matches!(
                    key.code,
                    KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('h') | KeyCode::Enter | KeyCode::Char('q')
                ) {
                    self.popup = Popup::None;
                }
                Ok(())
            }
            Popup::None => Ok(()),
        }
    }

    /// Run the analysis on the current form state
    pub fn analyze(&mut self) {
        self.form.submit();
    }

    fn open_image_picker(&mut self) {
        match self.browser.as_mut() {
            Some(browser) => browser.refresh(),
            None => {
                self.browser = Some(FileBrowser::new(self.picker_start.clone(), self.show_hidden));
            }
        }
        self.popup = Popup::FileBrowser;
    }

    fn handle_browser_key(&mut self, key: KeyEvent) -> Result<()> {
        let Some(browser) = self.browser.as_mut() else {
            self.popup = Popup::None;
            return Ok(());
        };

        match key.code {
            // Cancelling leaves the current selection untouched
            KeyCode::Esc | KeyCode::Char('q') => self.popup = Popup::None,
            KeyCode::Char('j') | KeyCode::Down => browser.move_down(),
            KeyCode::Char('k') | KeyCode::Up => browser.move_up(),
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let BrowserAction::Picked(path) = browser.activate() {
                    self.pick_image(&path);
                }
            }
            KeyCode::Backspace => browser.go_parent(),
            KeyCode::Char('h') | KeyCode::Char('~') => browser.go_home(),
            KeyCode::Char('.') => browser.toggle_hidden(),
            _ => {}
        }
        Ok(())
    }

    /// Load a picked file into the form and close the picker. A read
    /// failure keeps the picker open and the form unchanged.
    fn pick_image(&mut self, path: &Path) {
        match SelectedImage::load(path) {
            Ok(image) => {
                let msg = format!("Selected {} ({})", image.name, format_bytes(image.size()));
                self.form.select_image(image);
                self.popup = Popup::None;
                self.set_status(msg);
            }
            Err(e) => {
                tracing::warn!("{}", e);
                self.set_error(format!("Cannot read: {}", e));
            }
        }
    }

    fn open_style_menu(&mut self) {
        self.style_menu_selected = self.form.style().index();
        self.popup = Popup::StyleMenu;
    }

    fn handle_style_menu_key(&mut self, key: KeyEvent) {
        let count = StyleCategory::ALL.len();
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.popup = Popup::None,
            KeyCode::Char('j') | KeyCode::Down => {
                self.style_menu_selected = (self.style_menu_selected + 1) % count;
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.style_menu_selected = (self.style_menu_selected + count - 1) % count;
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.form.select_style(StyleCategory::ALL[self.style_menu_selected]);
                self.popup = Popup::None;
            }
            _ => {}
        }
    }

    pub fn tick(&mut self) {
        // Clear status message after timeout
        if let Some(time) = self.status_message_time {
            if time.elapsed().as_secs() >= STATUS_SECONDS {
                self.status_message = None;
                self.status_message_time = None;
                self.status_is_error = false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use std::fs;
    use std::time::Duration;

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE)).unwrap();
    }

    fn app_in(dir: &Path) -> App {
        let config = AppConfig {
            start_dir: Some(dir.to_path_buf()),
            ..AppConfig::default()
        };
        App::new(&config)
    }

    fn photo_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("shirt.png"), vec![0u8; 2048]).unwrap();
        fs::write(dir.path().join("trousers.jpg"), b"jpg").unwrap();
        fs::write(dir.path().join("readme.md"), b"md").unwrap();
        dir
    }

    /// Open the picker and choose the entry with `name`
    fn pick(app: &mut App, name: &str) {
        press(app, KeyCode::Char('i'));
        let index = app
            .browser
            .as_ref()
            .unwrap()
            .entries
            .iter()
            .position(|e| e.name == name)
            .unwrap();
        app.browser.as_mut().unwrap().selected = index;
        press(app, KeyCode::Enter);
    }

    #[test]
    fn test_tab_cycles_focus() {
        let dir = photo_dir();
        let mut app = app_in(dir.path());
        assert_eq!(app.focus, Focus::Image);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Focus::Style);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Focus::Analyze);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Focus::Image);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.focus, Focus::Analyze);
    }

    #[test]
    fn test_pick_image_and_analyze() {
        let dir = photo_dir();
        let mut app = app_in(dir.path());

        pick(&mut app, "shirt.png");
        assert_eq!(app.popup, Popup::None);
        assert_eq!(app.form.image_label(), "shirt.png");
        assert_eq!(app.status_message.as_deref(), Some("Selected shirt.png (2.0 KiB)"));

        press(&mut app, KeyCode::Char('a'));
        assert_eq!(
            app.form.response(),
            Some("LLM response for shirt.png with style casual")
        );
    }

    #[test]
    fn test_picker_hides_non_images() {
        let dir = photo_dir();
        let mut app = app_in(dir.path());
        press(&mut app, KeyCode::Char('i'));
        let names: Vec<&str> = app
            .browser
            .as_ref()
            .unwrap()
            .entries
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(names, vec!["..", "shirt.png", "trousers.jpg"]);
    }

    #[test]
    fn test_cancel_picker_keeps_selection() {
        let dir = photo_dir();
        let mut app = app_in(dir.path());
        pick(&mut app, "shirt.png");

        press(&mut app, KeyCode::Char('i'));
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.popup, Popup::None);
        assert_eq!(app.form.image_label(), "shirt.png");
    }

    #[test]
    fn test_repick_replaces_image() {
        let dir = photo_dir();
        let mut app = app_in(dir.path());
        pick(&mut app, "shirt.png");
        pick(&mut app, "trousers.jpg");
        assert_eq!(app.form.image_label(), "trousers.jpg");
    }

    #[test]
    fn test_unreadable_pick_keeps_picker_open() {
        let dir = photo_dir();
        let mut app = app_in(dir.path());
        press(&mut app, KeyCode::Char('i'));
        fs::remove_file(dir.path().join("shirt.png")).unwrap();
        app.browser.as_mut().unwrap().selected = 1;
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.popup, Popup::FileBrowser);
        assert!(app.form.image().is_none());
        assert!(app.status_message.as_deref().unwrap().starts_with("Cannot read"));
        assert!(app.status_is_error);
    }

    #[test]
    fn test_style_menu_select_and_cancel() {
        let dir = photo_dir();
        let mut app = app_in(dir.path());

        press(&mut app, KeyCode::Char('s'));
        assert_eq!(app.popup, Popup::StyleMenu);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.form.style(), StyleCategory::Sporty);

        press(&mut app, KeyCode::Char('s'));
        assert_eq!(app.style_menu_selected, 2);
        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.form.style(), StyleCategory::Sporty);
    }

    #[test]
    fn test_arrows_cycle_focused_style() {
        let dir = photo_dir();
        let mut app = app_in(dir.path());
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.form.style(), StyleCategory::Vintage);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.form.style(), StyleCategory::Casual);
    }

    #[test]
    fn test_enter_on_analyze_button() {
        let dir = photo_dir();
        let mut app = app_in(dir.path());
        app.focus = Focus::Analyze;
        press(&mut app, KeyCode::Enter);
        assert_eq!(
            app.form.response(),
            Some("LLM response for no image with style casual")
        );
    }

    #[test]
    fn test_tick_clears_expired_status() {
        let dir = photo_dir();
        let mut app = app_in(dir.path());
        app.set_error("Cannot read: shirt.png");
        app.status_message_time = Some(Instant::now() - Duration::from_secs(STATUS_SECONDS));

        app.tick();
        assert_eq!(app.status_message, None);
        assert_eq!(app.status_message_time, None);
        assert!(!app.status_is_error);
    }

    #[test]
    fn test_tick_keeps_fresh_status() {
        let dir = photo_dir();
        let mut app = app_in(dir.path());
        app.set_error("Cannot read: shirt.png");

        app.tick();
        assert_eq!(app.status_message.as_deref(), Some("Cannot read: shirt.png"));
        assert!(app.status_is_error);
    }

    #[test]
    fn test_help_popup_toggles() {
        let dir = photo_dir();
        let mut app = app_in(dir.path());
        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.popup, Popup::Help);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.popup, Popup::None);
    }
}
