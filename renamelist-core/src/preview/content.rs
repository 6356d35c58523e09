//! Read-only previews of a single file's content.

use crate::engine::extension_of;
use crate::error::{RenameError, Result};
use image::ImageReader;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

const IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".gif", ".bmp", ".tiff", ".webp"];
const DOCUMENT_EXTENSIONS: &[&str] = &[".pdf"];
const TEXT_EXTENSIONS: &[&str] = &[
    ".txt", ".csv", ".json", ".xml", ".html", ".md", ".py", ".js", ".css", ".log", ".ini", ".cfg",
];

/// How a file can be previewed, decided once from its extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PreviewKind {
    Image,
    Document,
    Text,
    Unsupported,
}

impl PreviewKind {
    pub fn from_file_name(name: &str) -> Self {
        let ext = extension_of(name).to_lowercase();
        if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
            Self::Image
        } else if DOCUMENT_EXTENSIONS.contains(&ext.as_str()) {
            Self::Document
        } else if TEXT_EXTENSIONS.contains(&ext.as_str()) {
            Self::Text
        } else {
            Self::Unsupported
        }
    }

    pub fn from_path(path: &Path) -> Self {
        path.file_name()
            .map_or(Self::Unsupported, |name| {
                Self::from_file_name(&name.to_string_lossy())
            })
    }
}

#[derive(Debug, Clone)]
pub struct PreviewOptions {
    pub max_width: u32,
    pub max_height: u32,
    /// Characters of text shown before truncating
    pub text_chars: usize,
    /// Where to save the scaled image, if anywhere
    pub thumbnail_out: Option<PathBuf>,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            max_width: 800,
            max_height: 600,
            text_chars: 2000,
            thumbnail_out: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentPreview {
    Image {
        width: u32,
        height: u32,
        preview_width: u32,
        preview_height: u32,
        thumbnail: Option<PathBuf>,
    },
    Document {
        size: u64,
        note: String,
    },
    Text {
        content: String,
        truncated: bool,
        size: u64,
    },
    Unsupported {
        extension: String,
    },
}

impl ContentPreview {
    pub fn kind(&self) -> PreviewKind {
        match self {
            Self::Image { .. } => PreviewKind::Image,
            Self::Document { .. } => PreviewKind::Document,
            Self::Text { .. } => PreviewKind::Text,
            Self::Unsupported { .. } => PreviewKind::Unsupported,
        }
    }
}

/// Largest size with the same aspect ratio that fits inside `max_width` × `max_height`
pub fn fit_within(width: u32, height: u32, max_width: u32, max_height: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (0, 0);
    }
    let scale = f64::min(
        f64::from(max_width) / f64::from(width),
        f64::from(max_height) / f64::from(height),
    );
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let scaled = |v: u32| ((f64::from(v) * scale).round() as u32).max(1);
    (scaled(width), scaled(height))
}

/// Build a preview of `path` according to its extension
pub fn preview_file(path: &Path, options: &PreviewOptions) -> Result<ContentPreview> {
    let metadata = fs::metadata(path).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            RenameError::NotFound(path.to_path_buf())
        } else {
            RenameError::io(path, e)
        }
    })?;
    let size = metadata.len();

    match PreviewKind::from_path(path) {
        PreviewKind::Image => preview_image(path, options),
        PreviewKind::Document => Ok(ContentPreview::Document {
            size,
            note: "Page rendering is not available; open the file to view it".to_string(),
        }),
        PreviewKind::Text => preview_text(path, size, options.text_chars),
        PreviewKind::Unsupported => Ok(unsupported(path)),
    }
}

fn unsupported(path: &Path) -> ContentPreview {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    ContentPreview::Unsupported {
        extension: extension_of(&name).to_string(),
    }
}

fn preview_image(path: &Path, options: &PreviewOptions) -> Result<ContentPreview> {
    let image_error = |e: image::ImageError| RenameError::io(path, io::Error::other(e.to_string()));

    let image = ImageReader::open(path)
        .map_err(|e| RenameError::io(path, e))?
        .with_guessed_format()
        .map_err(|e| RenameError::io(path, e))?
        .decode()
        .map_err(image_error)?;

    let (width, height) = (image.width(), image.height());
    let (preview_width, preview_height) =
        fit_within(width, height, options.max_width, options.max_height);

    let thumbnail = match &options.thumbnail_out {
        Some(out) => {
            image
                .thumbnail_exact(preview_width, preview_height)
                .save(out)
                .map_err(image_error)?;
            Some(out.clone())
        },
        None => None,
    };

    Ok(ContentPreview::Image {
        width,
        height,
        preview_width,
        preview_height,
        thumbnail,
    })
}

fn preview_text(path: &Path, size: u64, max_chars: usize) -> Result<ContentPreview> {
    // A char is at most 4 bytes, so this is always enough to fill the preview.
    let limit = (max_chars as u64).saturating_mul(4).saturating_add(4);
    let mut bytes = Vec::new();
    File::open(path)
        .and_then(|file| file.take(limit).read_to_end(&mut bytes))
        .map_err(|e| RenameError::io(path, e))?;

    if content_inspector::inspect(&bytes).is_binary() {
        return Ok(unsupported(path));
    }

    let text = String::from_utf8_lossy(&bytes);
    let content: String = text.chars().take(max_chars).collect();
    let truncated = (content.len() as u64) < size;

    Ok(ContentPreview::Text {
        content,
        truncated,
        size,
    })
}
