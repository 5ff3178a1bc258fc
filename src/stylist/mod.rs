//! Domain types for the stylist form: style categories, the picked image,
//! and the response template.

mod form;

pub use form::StylistForm;

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{Result, StylistError};

/// Label shown on the image control before anything is picked
pub const IMAGE_PLACEHOLDER: &str = "Choose an image";

/// Substituted for the file name when analyzing without an image
pub const NO_IMAGE: &str = "no image";

/// Closed set of style preferences offered by the dropdown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleCategory {
    #[default]
    Casual,
    Formal,
    Sporty,
    Vintage,
}

impl StyleCategory {
    /// Dropdown order
    pub const ALL: [StyleCategory; 4] = [
        StyleCategory::Casual,
        StyleCategory::Formal,
        StyleCategory::Sporty,
        StyleCategory::Vintage,
    ];

    /// Value used in the response text, CLI and JSON output
    pub fn value(self) -> &'static str {
        match self {
            Self::Casual => "casual",
            Self::Formal => "formal",
            Self::Sporty => "sporty",
            Self::Vintage => "vintage",
        }
    }

    /// Display label in the dropdown
    pub fn label(self) -> &'static str {
        match self {
            Self::Casual => "Casual",
            Self::Formal => "Formal",
            Self::Sporty => "Sporty",
            Self::Vintage => "Vintage",
        }
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for StyleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

impl FromStr for StyleCategory {
    type Err = StylistError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|style| style.value().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| StylistError::UnknownStyle(s.to_string()))
    }
}

/// A file picked through the image control, held in memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedImage {
    pub name: String,
    pub path: PathBuf,
    pub bytes: Vec<u8>,
}

impl SelectedImage {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            bytes,
        }
    }

    /// Read a picked file into memory
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|source| StylistError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());

        Ok(Self::new(name, path, bytes))
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Mirror of an `accept="image/*"` picker filter: true when the guessed
/// MIME type of the path is an image type
pub fn is_image_file(path: &Path) -> bool {
    mime_guess::from_path(path)
        .iter()
        .any(|mime| mime.type_() == mime_guess::mime::IMAGE)
}

/// Placeholder analysis. A real recommendation backend would replace this.
pub fn compose_response(image: Option<&SelectedImage>, style: StyleCategory) -> String {
    let name = image.map(|i| i.name.as_str()).unwrap_or(NO_IMAGE);
    format!("LLM response for {} with style {}", name, style.value())
}

/// Format bytes to human-readable string
pub fn format_bytes(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = KIB * 1024;
    const GIB: u64 = MIB * 1024;

    if bytes >= GIB {
        format!("{:.1} GiB", bytes as f64 / GIB as f64)
    } else if bytes >= MIB {
        format!("{:.1} MiB", bytes as f64 / MIB as f64)
    } else if bytes >= KIB {
        format!("{:.1} KiB", bytes as f64 / KIB as f64)
    } else {
        format!("{} B", bytes)
    }
}
