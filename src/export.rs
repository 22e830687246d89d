//! Image export sinks.
//!
//! `save()` renders the committed shapes offscreen and hands the raster to
//! an [`ImageExporter`]. The shipped exporter writes timestamped PNG files;
//! hosts can substitute their own sink (clipboard, network, test spy).

use cairo::ImageSurface;
use chrono::Local;
use std::fs::{self, File};
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while persisting a rendered raster.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write image: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode image: {0}")]
    Encode(#[from] cairo::IoError),
}

/// Persists a rendered raster and reports where it landed.
pub trait ImageExporter {
    fn write(&mut self, image: &ImageSurface) -> Result<PathBuf, ExportError>;
}

/// Writes timestamped PNG files into a target directory.
///
/// Filenames follow `draw-<timestamp>.png`; the timestamp portion is a
/// chrono format template so hosts can adjust granularity.
#[derive(Debug, Clone)]
pub struct PngExporter {
    directory: PathBuf,
    filename_template: String,
}

impl PngExporter {
    /// Default filename template, e.g. `draw-2026-08-06_14-30-05.png`.
    pub const DEFAULT_TEMPLATE: &'static str = "draw-%Y-%m-%d_%H-%M-%S";

    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            filename_template: Self::DEFAULT_TEMPLATE.to_string(),
        }
    }

    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.filename_template = template.into();
        self
    }

    /// Generates a filename from the template and the current local time.
    fn generate_filename(&self) -> String {
        let now = Local::now();
        format!("{}.png", now.format(&self.filename_template))
    }

    /// Ensures the target directory exists, creating it if necessary.
    fn ensure_directory_exists(&self) -> Result<(), ExportError> {
        if !self.directory.exists() {
            log::info!("Creating export directory: {}", self.directory.display());
            fs::create_dir_all(&self.directory)?;
        }
        Ok(())
    }

    fn unique_path(&self) -> PathBuf {
        let filename = self.generate_filename();
        let stem = filename.trim_end_matches(".png").to_string();
        let mut path = self.directory.join(&filename);
        // Two saves inside one timestamp tick must not clobber each other.
        let mut attempt = 1;
        while path.exists() {
            path = self.directory.join(format!("{stem}-{attempt}.png"));
            attempt += 1;
        }
        path
    }
}

impl ImageExporter for PngExporter {
    fn write(&mut self, image: &ImageSurface) -> Result<PathBuf, ExportError> {
        self.ensure_directory_exists()?;

        let file_path = self.unique_path();
        log::info!(
            "Saving drawing to: {} ({}x{})",
            file_path.display(),
            image.width(),
            image.height()
        );

        let mut file = File::create(&file_path)?;
        image.write_to_png(&mut file)?;

        // Restrict to user read/write
        #[cfg(unix)]
        {
            use std::fs::Permissions;
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&file_path, Permissions::from_mode(0o600))?;
        }

        log::info!("Drawing saved: {}", file_path.display());
        Ok(file_path)
    }
}

/// Expand tilde (~) in path strings.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}

/// Default export directory: `<pictures>/sketchboard`, falling back to the
/// current directory when the host has no pictures folder.
pub fn default_export_directory() -> PathBuf {
    dirs::picture_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("sketchboard")
}

#[cfg(test)]
mod tests {
    use super::*;
    use cairo::{Context, Format};
    use tempfile::TempDir;

    fn small_surface() -> ImageSurface {
        let surface = ImageSurface::create(Format::ARgb32, 4, 4).unwrap();
        let ctx = Context::new(&surface).unwrap();
        ctx.set_source_rgb(0.2, 0.4, 0.6);
        ctx.paint().unwrap();
        surface
    }

    #[test]
    fn writes_png_with_draw_prefix() {
        let dir = TempDir::new().unwrap();
        let mut exporter = PngExporter::new(dir.path());

        let path = exporter.write(&small_surface()).unwrap();
        let name = path.file_name().unwrap().to_string_lossy().into_owned();

        assert!(name.starts_with("draw-"));
        assert!(name.ends_with(".png"));
        let bytes = fs::read(&path).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn creates_missing_directories() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        let mut exporter = PngExporter::new(&nested);

        let path = exporter.write(&small_surface()).unwrap();
        assert!(path.starts_with(&nested));
        assert!(path.exists());
    }

    #[test]
    fn rapid_saves_do_not_clobber() {
        let dir = TempDir::new().unwrap();
        let mut exporter = PngExporter::new(dir.path());

        let first = exporter.write(&small_surface()).unwrap();
        let second = exporter.write(&small_surface()).unwrap();
        assert_ne!(first, second);
        assert!(first.exists() && second.exists());
    }

    #[test]
    fn expand_tilde_resolves_home() {
        let expanded = expand_tilde("~/Pictures");
        assert!(!expanded.to_string_lossy().starts_with('~'));

        let no_tilde = expand_tilde("/absolute/path");
        assert_eq!(no_tilde, PathBuf::from("/absolute/path"));
    }
}
