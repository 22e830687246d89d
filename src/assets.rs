//! Texture asset loading.
//!
//! The core never touches the filesystem directly for textures; it asks an
//! [`AssetProvider`] for decoded raster data by name. The shipped provider
//! resolves names against a directory of PNG files, but tests and embedding
//! hosts can supply their own source.

use cairo::ImageSurface;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while resolving a texture asset.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("texture asset '{0}' not found")]
    NotFound(String),

    #[error("failed to read texture '{name}': {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode texture '{name}': {source}")]
    Decode {
        name: String,
        #[source]
        source: cairo::IoError,
    },
}

/// Source of decoded texture rasters, looked up by name.
///
/// Implementations must be deterministic: the same name yields the same
/// pixels for the lifetime of the drawing surface. The paint cache relies on
/// this to decode each asset at most once.
pub trait AssetProvider {
    /// Resolves `name` to a decoded raster.
    ///
    /// # Errors
    /// [`AssetError::NotFound`] when the name is unresolvable; the drawing
    /// core recovers by keeping the previously active paint.
    fn load_texture(&self, name: &str) -> Result<ImageSurface, AssetError>;
}

/// Resolves texture names against `<directory>/<name>.png`.
#[derive(Debug, Clone)]
pub struct DirTextureProvider {
    directory: PathBuf,
}

impl DirTextureProvider {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }
}

impl AssetProvider for DirTextureProvider {
    fn load_texture(&self, name: &str) -> Result<ImageSurface, AssetError> {
        let path = self.directory.join(format!("{name}.png"));
        if !path.is_file() {
            return Err(AssetError::NotFound(name.to_string()));
        }

        let file = File::open(&path).map_err(|source| AssetError::Io {
            name: name.to_string(),
            source,
        })?;
        let mut reader = BufReader::new(file);

        let surface =
            ImageSurface::create_from_png(&mut reader).map_err(|source| AssetError::Decode {
                name: name.to_string(),
                source,
            })?;

        log::debug!(
            "Decoded texture '{}' ({}x{}) from {}",
            name,
            surface.width(),
            surface.height(),
            path.display()
        );

        Ok(surface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cairo::{Context, Format};
    use tempfile::TempDir;

    fn write_png(dir: &std::path::Path, name: &str) {
        let surface = ImageSurface::create(Format::ARgb32, 8, 8).unwrap();
        let ctx = Context::new(&surface).unwrap();
        ctx.set_source_rgb(0.0, 0.5, 1.0);
        ctx.paint().unwrap();
        drop(ctx);

        let mut file = File::create(dir.join(format!("{name}.png"))).unwrap();
        surface.write_to_png(&mut file).unwrap();
    }

    #[test]
    fn loads_png_by_name() {
        let dir = TempDir::new().unwrap();
        write_png(dir.path(), "canvas");

        let provider = DirTextureProvider::new(dir.path());
        let surface = provider.load_texture("canvas").unwrap();
        assert_eq!(surface.width(), 8);
        assert_eq!(surface.height(), 8);
    }

    #[test]
    fn unknown_name_is_not_found() {
        let dir = TempDir::new().unwrap();
        let provider = DirTextureProvider::new(dir.path());

        match provider.load_texture("missing") {
            Err(AssetError::NotFound(name)) => assert_eq!(name, "missing"),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn invalid_png_is_a_decode_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("broken.png"), b"not a png").unwrap();

        let provider = DirTextureProvider::new(dir.path());
        assert!(matches!(
            provider.load_texture("broken"),
            Err(AssetError::Decode { .. })
        ));
    }
}
