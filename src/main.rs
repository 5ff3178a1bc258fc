mod app;
mod browser;
mod config;
mod error;
mod stylist;
mod theme;
mod ui;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use app::{App, Popup};
use config::AppConfig;
use error::StylistError;
use stylist::{is_image_file, SelectedImage, StyleCategory, StylistForm};

#[derive(Parser, Debug)]
#[command(name = "stylist")]
#[command(version)]
#[command(about = "Pick an image and a style preference, get a style analysis")]
struct Args {
    /// Image to preselect
    #[arg(short, long)]
    image: Option<PathBuf>,

    /// Style to preselect: casual, formal, sporty or vintage
    #[arg(short, long)]
    style: Option<StyleCategory>,

    /// Print the analysis and exit instead of opening the TUI
    #[arg(short, long)]
    analyze: bool,

    /// With --analyze, print the result as JSON
    #[arg(long, requires = "analyze")]
    json: bool,

    /// Config file (default: ~/.config/stylist/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let (config, config_error) = match AppConfig::load(args.config.as_deref()) {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    init_logging(&config.log_level, !args.analyze);
    if let Some(e) = config_error {
        tracing::warn!("Using default config: {}", e);
    }

    if args.analyze {
        return print_analysis(&args);
    }

    run_tui(&args, &config)
}

/// TUI logs go to a file so they don't draw over the screen
fn init_logging(level: &str, to_file: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let registry = tracing_subscriber::registry().with(filter);

    if !to_file {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init();
        return;
    }

    match open_log_file() {
        Ok(file) => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(Mutex::new(file))
                    .with_ansi(false),
            )
            .init(),
        Err(_) => registry.init(),
    }
}

fn open_log_file() -> Result<std::fs::File> {
    let dir = dirs::cache_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?
        .join("stylist");
    std::fs::create_dir_all(&dir)?;

    Ok(std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("stylist.log"))?)
}

/// Apply command-line selections the same way the picker and dropdown would
fn preselect(form: &mut StylistForm, image: Option<&Path>, style: Option<StyleCategory>) -> Result<()> {
    if let Some(path) = image {
        if !is_image_file(path) {
            return Err(StylistError::NotAnImage(path.to_path_buf()).into());
        }
        form.select_image(SelectedImage::load(path)?);
    }

    if let Some(style) = style {
        form.select_style(style);
    }

    Ok(())
}

fn print_analysis(args: &Args) -> Result<()> {
    let mut form = StylistForm::new();
    preselect(&mut form, args.image.as_deref(), args.style)?;
    form.submit();

    if args.json {
        println!("{}", serde_json::to_string(&analysis_json(&form))?);
    } else {
        println!("{}", form.response().unwrap_or_default());
    }
    Ok(())
}

fn analysis_json(form: &StylistForm) -> serde_json::Value {
    serde_json::json!({
        "image": form.image().map(|i| i.name.as_str()),
        "path": form.image().map(|i| i.path.display().to_string()),
        "style": form.style(),
        "response": form.response(),
    })
}

fn run_tui(args: &Args, config: &AppConfig) -> Result<()> {
    // Resolve CLI selections before touching the terminal
    let mut app = App::new(config);
    preselect(&mut app.form, args.image.as_deref(), args.style)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') if app.popup == Popup::None => return Ok(()),
                        KeyCode::Char('c') if key.modifiers.contains(event::KeyModifiers::CONTROL) => {
                            return Ok(())
                        }
                        _ => {
                            if let Err(e) = app.handle_key(key) {
                                tracing::warn!("Key handling failed: {}", e);
                                app.set_error(format!("Error: {}", e));
                            }
                        }
                    }
                }
            }
        }

        app.tick();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_style() {
        let args = Args::try_parse_from(["stylist", "--analyze", "--style", "vintage"]).unwrap();
        assert!(args.analyze);
        assert_eq!(args.style, Some(StyleCategory::Vintage));
    }

    #[test]
    fn test_cli_rejects_unknown_style() {
        assert!(Args::try_parse_from(["stylist", "--style", "punk"]).is_err());
    }

    #[test]
    fn test_json_requires_analyze() {
        assert!(Args::try_parse_from(["stylist", "--json"]).is_err());
    }

    #[test]
    fn test_preselect_image_and_style() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shirt.png");
        std::fs::write(&path, b"png").unwrap();

        let mut form = StylistForm::new();
        preselect(&mut form, Some(&path), Some(StyleCategory::Formal)).unwrap();
        assert_eq!(form.submit(), "LLM response for shirt.png with style formal");
    }

    #[test]
    fn test_preselect_rejects_non_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, b"txt").unwrap();

        let mut form = StylistForm::new();
        assert!(preselect(&mut form, Some(&path), None).is_err());
        assert!(form.image().is_none());
    }

    #[test]
    fn test_analysis_json() {
        let mut form = StylistForm::new();
        form.select_style(StyleCategory::Sporty);
        form.submit();
        assert_eq!(
            analysis_json(&form),
            serde_json::json!({
                "image": null,
                "path": null,
                "style": "sporty",
                "response": "LLM response for no image with style sporty",
            })
        );
    }

    #[test]
    fn test_analysis_json_with_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shirt.png");
        std::fs::write(&path, b"png").unwrap();

        let mut form = StylistForm::new();
        preselect(&mut form, Some(&path), None).unwrap();
        form.submit();

        let json = analysis_json(&form);
        assert_eq!(json["image"], "shirt.png");
        assert_eq!(json["path"], path.display().to_string());
        assert_eq!(json["style"], "casual");
        assert_eq!(json["response"], "LLM response for shirt.png with style casual");
    }
}
