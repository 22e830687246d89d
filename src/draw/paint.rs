//! Paint resolution and memoization.
//!
//! A [`PaintCache`] turns a (brush, stroke width) pair into renderable cairo
//! attributes exactly once and hands back the cached descriptor on every
//! later request. Texture assets are decoded at most once per name, no
//! matter how many stroke widths they are paired with.

use super::color::Color;
use super::shape::Brush;
use crate::assets::{AssetError, AssetProvider};
use cairo::{Context, Extend, ImageSurface, SurfacePattern};
use std::collections::HashMap;

/// Composite cache key for resolved paints.
///
/// Color paints and texture paints at the same nominal width must never
/// collide, so the key is a tagged union rather than a concatenated string.
/// Float components are keyed by their bit patterns.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum PaintKey {
    Solid { rgba: [u64; 4], width: u64 },
    Texture { name: String, width: u64 },
}

impl PaintKey {
    fn new(brush: &Brush, stroke_width: f64) -> Self {
        let width = stroke_width.to_bits();
        match brush {
            Brush::Solid(color) => PaintKey::Solid {
                rgba: [
                    color.r.to_bits(),
                    color.g.to_bits(),
                    color.b.to_bits(),
                    color.a.to_bits(),
                ],
                width,
            },
            Brush::Texture(name) => PaintKey::Texture {
                name: name.clone(),
                width,
            },
        }
    }
}

/// The resolved paint source: a solid fill or a repeat-tiled texture.
#[derive(Debug)]
pub enum PaintSource {
    Solid(Color),
    Tiled(SurfacePattern),
}

/// Resolved rendering attributes for one (brush, stroke width) pair.
///
/// Descriptors are stable for the lifetime of the cache, so repeated
/// rendering of the same shape always uses identical attributes.
#[derive(Debug)]
pub struct PaintDescriptor {
    source: PaintSource,
    stroke_width: f64,
}

impl PaintDescriptor {
    /// Applies this paint to a cairo context: source, stroke width, rounded
    /// caps and joins, anti-aliasing on.
    pub fn apply(&self, ctx: &Context) {
        ctx.set_antialias(cairo::Antialias::Best);
        ctx.set_line_width(self.stroke_width);
        ctx.set_line_cap(cairo::LineCap::Round);
        ctx.set_line_join(cairo::LineJoin::Round);

        match &self.source {
            PaintSource::Solid(color) => {
                ctx.set_source_rgba(color.r, color.g, color.b, color.a);
            }
            PaintSource::Tiled(pattern) => {
                let _ = ctx.set_source(pattern);
            }
        }
    }

    pub fn stroke_width(&self) -> f64 {
        self.stroke_width
    }

    /// Whether this paint tiles a texture rather than filling a solid color.
    pub fn is_tiled(&self) -> bool {
        matches!(self.source, PaintSource::Tiled(_))
    }
}

/// Memoizing resolver from (brush, stroke width) to [`PaintDescriptor`].
///
/// Owned exclusively by one drawing surface; there is no cross-surface
/// sharing and therefore no locking.
pub struct PaintCache {
    assets: Box<dyn AssetProvider>,
    /// Decoded texture surfaces, one per distinct asset name
    textures: HashMap<String, ImageSurface>,
    /// Resolved descriptors keyed by brush + width
    paints: HashMap<PaintKey, PaintDescriptor>,
}

impl PaintCache {
    pub fn new(assets: Box<dyn AssetProvider>) -> Self {
        Self {
            assets,
            textures: HashMap::new(),
            paints: HashMap::new(),
        }
    }

    /// Resolves a brush and stroke width to a cached paint descriptor.
    ///
    /// Deterministic: the same key always returns an equivalent descriptor.
    /// The first texture request for a name decodes the asset via the
    /// provider; later requests (including at other widths) reuse the
    /// decoded surface.
    ///
    /// # Errors
    /// Propagates [`AssetError`] for unresolvable textures. The caller keeps
    /// the previously active paint in that case; resolution failures never
    /// abort a gesture.
    pub fn resolve(
        &mut self,
        brush: &Brush,
        stroke_width: f64,
    ) -> Result<&PaintDescriptor, AssetError> {
        let key = PaintKey::new(brush, stroke_width);

        if !self.paints.contains_key(&key) {
            let source = match brush {
                Brush::Solid(color) => PaintSource::Solid(*color),
                Brush::Texture(name) => {
                    let surface = self.texture_surface(name)?;
                    let pattern = SurfacePattern::create(&surface);
                    pattern.set_extend(Extend::Repeat);
                    PaintSource::Tiled(pattern)
                }
            };

            self.paints.insert(
                key.clone(),
                PaintDescriptor {
                    source,
                    stroke_width,
                },
            );
        }

        Ok(&self.paints[&key])
    }

    /// Returns the decoded surface for `name`, decoding it on first use.
    fn texture_surface(&mut self, name: &str) -> Result<ImageSurface, AssetError> {
        if let Some(surface) = self.textures.get(name) {
            return Ok(surface.clone());
        }

        let surface = self.assets.load_texture(name)?;
        log::debug!(
            "Caching texture '{}' ({}x{})",
            name,
            surface.width(),
            surface.height()
        );
        self.textures.insert(name.to_string(), surface.clone());
        Ok(surface)
    }

    /// Number of distinct resolved paints (diagnostics).
    pub fn cached_paints(&self) -> usize {
        self.paints.len()
    }

    /// Number of distinct decoded textures (diagnostics).
    pub fn cached_textures(&self) -> usize {
        self.textures.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{RED, WHITE};
    use cairo::Format;
    use std::sync::{Arc, Mutex};

    struct CountingProvider {
        loads: Arc<Mutex<Vec<String>>>,
    }

    impl CountingProvider {
        fn new() -> (Self, Arc<Mutex<Vec<String>>>) {
            let loads = Arc::new(Mutex::new(Vec::new()));
            (
                Self {
                    loads: loads.clone(),
                },
                loads,
            )
        }
    }

    impl AssetProvider for CountingProvider {
        fn load_texture(&self, name: &str) -> Result<ImageSurface, AssetError> {
            if name == "missing" {
                return Err(AssetError::NotFound(name.to_string()));
            }
            self.loads.lock().unwrap().push(name.to_string());
            Ok(ImageSurface::create(Format::ARgb32, 4, 4).unwrap())
        }
    }

    #[test]
    fn solid_resolution_is_idempotent() {
        let (provider, _) = CountingProvider::new();
        let mut cache = PaintCache::new(Box::new(provider));

        let brush = Brush::Solid(RED);
        {
            let paint = cache.resolve(&brush, 4.0).unwrap();
            assert!(!paint.is_tiled());
            assert_eq!(paint.stroke_width(), 4.0);
        }
        cache.resolve(&brush, 4.0).unwrap();
        assert_eq!(cache.cached_paints(), 1);
    }

    #[test]
    fn texture_decoded_once_across_widths() {
        let (provider, loads) = CountingProvider::new();
        let mut cache = PaintCache::new(Box::new(provider));

        let brush = Brush::Texture("canvas".into());
        assert!(cache.resolve(&brush, 4.0).unwrap().is_tiled());
        cache.resolve(&brush, 8.0).unwrap();
        cache.resolve(&brush, 4.0).unwrap();

        assert_eq!(loads.lock().unwrap().as_slice(), ["canvas"]);
        assert_eq!(cache.cached_paints(), 2);
        assert_eq!(cache.cached_textures(), 1);
    }

    #[test]
    fn color_and_texture_keys_never_collide() {
        let (provider, _) = CountingProvider::new();
        let mut cache = PaintCache::new(Box::new(provider));

        cache.resolve(&Brush::Solid(WHITE), 6.0).unwrap();
        cache.resolve(&Brush::Texture("dots".into()), 6.0).unwrap();

        assert_eq!(cache.cached_paints(), 2);
    }

    #[test]
    fn unknown_texture_fails_without_poisoning_the_cache() {
        let (provider, _) = CountingProvider::new();
        let mut cache = PaintCache::new(Box::new(provider));

        assert!(matches!(
            cache.resolve(&Brush::Texture("missing".into()), 4.0),
            Err(AssetError::NotFound(_))
        ));
        assert_eq!(cache.cached_paints(), 0);

        cache.resolve(&Brush::Solid(RED), 4.0).unwrap();
        assert_eq!(cache.cached_paints(), 1);
    }
}
