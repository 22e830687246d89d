//! Drawing surface orchestration.
//!
//! [`DrawingBoard`] ties the tool state, gesture controller, history, and
//! paint cache together behind the operation surface a host drives: tool
//! selection, pointer events, undo/redo/clear, and save. The host supplies
//! the display target through [`SurfaceHost`] and the persistence sink
//! through [`crate::export::ImageExporter`].
//!
//! Every discrete pointer event or history operation performs exactly one
//! lock -> replay (+preview) -> present cycle against the host.


use crate::assets::AssetProvider;
use crate::draw::{
    self, Brush, Color, HistoryStore, PaintCache, Point, Shape, ShapeKind, color,
};
use crate::export::{ExportError, ImageExporter};
use crate::input::{GestureController, PointerAction, ToolState};
use cairo::{Context, Format, ImageSurface};
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the display target.
#[derive(Debug, Error)]
pub enum SurfaceError {
    /// Render requested before the host signalled readiness
    #[error("drawing surface is not ready")]
    NotReady,

    #[error("surface error: {0}")]
    Cairo(#[from] cairo::Error),
}

/// Errors surfaced by `save()`.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error(transparent)]
    Render(#[from] draw::RenderError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Display target supplied by the host.
///
/// The board drives one lock/present cycle per discrete input event or
/// history operation; `present` consumes the locked context so a cycle can
/// never be left open.
pub trait SurfaceHost {
    /// Current surface dimensions in pixels.
    fn size(&self) -> (i32, i32);

    /// Locks the surface and returns a drawing context for one repaint.
    fn lock_canvas(&mut self) -> Result<Context, SurfaceError>;

    /// Finishes the cycle begun by `lock_canvas` and presents the pixels.
    fn present(&mut self, ctx: Context) -> Result<(), SurfaceError>;
}

/// Offscreen host over a plain raster.
///
/// Used by the CLI host and tests; embedding applications provide their own
/// window-backed implementation.
pub struct MemorySurfaceHost {
    surface: ImageSurface,
    presents: usize,
}

impl MemorySurfaceHost {
    pub fn new(width: i32, height: i32) -> Result<Self, SurfaceError> {
        let surface = ImageSurface::create(Format::ARgb32, width, height)?;
        Ok(Self {
            surface,
            presents: 0,
        })
    }

    /// How many lock/present cycles have completed (diagnostics).
    pub fn presents(&self) -> usize {
        self.presents
    }

    /// Direct access to the backing raster for pixel inspection.
    pub fn surface_mut(&mut self) -> &mut ImageSurface {
        &mut self.surface
    }
}

impl SurfaceHost for MemorySurfaceHost {
    fn size(&self) -> (i32, i32) {
        (self.surface.width(), self.surface.height())
    }

    fn lock_canvas(&mut self) -> Result<Context, SurfaceError> {
        Ok(Context::new(&self.surface)?)
    }

    fn present(&mut self, ctx: Context) -> Result<(), SurfaceError> {
        drop(ctx);
        self.surface.flush();
        self.presents += 1;
        Ok(())
    }
}

/// The drawing surface core.
///
/// Single-threaded by construction: the board owns its history and paint
/// cache exclusively, and `&mut self` on every operation is the mutual
/// exclusion the export path needs against in-progress gestures.
pub struct DrawingBoard<H: SurfaceHost> {
    host: H,
    exporter: Box<dyn ImageExporter>,
    paints: PaintCache,
    history: HistoryStore,
    tool: ToolState,
    gesture: GestureController,
    background: Color,
    ready: bool,
}

impl<H: SurfaceHost> DrawingBoard<H> {
    /// Creates a board over a host surface, asset source, and export sink.
    ///
    /// The board starts inactive; the host calls [`activate`](Self::activate)
    /// once its surface is valid.
    pub fn new(
        host: H,
        assets: Box<dyn AssetProvider>,
        exporter: Box<dyn ImageExporter>,
    ) -> Self {
        Self {
            host,
            exporter,
            paints: PaintCache::new(assets),
            history: HistoryStore::new(),
            tool: ToolState::default(),
            gesture: GestureController::new(),
            background: color::WHITE,
            ready: false,
        }
    }

    /// Replaces the gesture controller's random source with a seeded one.
    pub fn with_gesture_seed(mut self, seed: u64) -> Self {
        self.gesture = GestureController::with_seed(seed);
        self
    }

    /// Sets the background color used by repaints and `clear()`.
    pub fn set_background(&mut self, background: Color) {
        self.background = background;
    }

    /// The explicit readiness signal, replacing any host-side polling.
    ///
    /// Paints the initial background and starts accepting events. Calling
    /// it twice is harmless.
    pub fn activate(&mut self) -> Result<(), SurfaceError> {
        if self.ready {
            log::debug!("Surface already active");
            return Ok(());
        }
        self.ready = true;
        self.repaint_with(None)?;
        log::info!("Drawing surface active");
        Ok(())
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn tool(&self) -> &ToolState {
        &self.tool
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    // ------------------------------------------------------------------
    // Tool selection
    // ------------------------------------------------------------------

    pub fn select_color(&mut self, color: Color) {
        self.tool.set_color(color);
    }

    /// Switches to a texture brush after validating the asset.
    ///
    /// An unresolvable texture keeps the current brush active; the failure
    /// is a warning, never a crash of the gesture loop.
    pub fn select_texture(&mut self, name: &str) {
        let brush = Brush::Texture(name.to_string());
        match self.paints.resolve(&brush, self.tool.stroke_width) {
            Ok(_) => self.tool.set_texture(name),
            Err(err) => log::warn!("Keeping current brush: {err}"),
        }
    }

    pub fn select_shape_kind(&mut self, kind: ShapeKind) {
        self.tool.set_kind(kind);
    }

    pub fn select_stroke_size(&mut self, px: f64) {
        self.tool.set_stroke_width(px);
    }

    pub fn enable_random_color(&mut self) {
        self.tool.enable_random_color();
    }

    // ------------------------------------------------------------------
    // Pointer input
    // ------------------------------------------------------------------

    /// Raw pointer-event entry point.
    ///
    /// Dropped with a diagnostic while the surface is not ready.
    pub fn on_pointer_event(&mut self, action: PointerAction, x: f64, y: f64) {
        if !self.ready {
            log::debug!("Dropping pointer event before surface readiness");
            return;
        }

        let outcome = self
            .gesture
            .on_pointer_event(&self.tool, action, Point::new(x, y));

        // Replay the committed history, then the candidate on top - the
        // candidate only joins the history after this frame.
        if let Err(err) = self.repaint_with(outcome.shape.as_ref()) {
            log::warn!("Repaint failed: {err}");
        }

        if outcome.commit
            && let Some(shape) = outcome.shape
        {
            self.history.commit(shape);
        }

        if let Some(next) = outcome.recolor {
            log::debug!("Next stroke color: {}", color::color_to_name(&next));
            self.tool.set_color(next);
        }
    }

    // ------------------------------------------------------------------
    // History operations
    // ------------------------------------------------------------------

    /// Removes the most recent shape. Empty history is a silent no-op.
    pub fn undo(&mut self) {
        if !self.ready {
            log::debug!("Dropping undo before surface readiness");
            return;
        }
        if self.history.undo().is_none() {
            log::debug!("Nothing to undo");
            return;
        }
        if let Err(err) = self.repaint_with(None) {
            log::warn!("Repaint after undo failed: {err}");
        }
    }

    /// Restores the most recently undone shape, if any.
    pub fn redo(&mut self) {
        if !self.ready {
            log::debug!("Dropping redo before surface readiness");
            return;
        }
        if self.history.redo().is_none() {
            log::debug!("Nothing to redo");
            return;
        }
        if let Err(err) = self.repaint_with(None) {
            log::warn!("Repaint after redo failed: {err}");
        }
    }

    /// Paints the surface over with the background color, undoably.
    pub fn clear(&mut self) {
        if !self.ready {
            log::debug!("Dropping clear before surface readiness");
            return;
        }
        let (width, height) = self.host.size();
        self.history
            .clear_to(Shape::background(width as f64, height as f64, self.background));
        if let Err(err) = self.repaint_with(None) {
            log::warn!("Repaint after clear failed: {err}");
        }
    }

    // ------------------------------------------------------------------
    // Export
    // ------------------------------------------------------------------

    /// Renders the committed shapes offscreen and hands them to the
    /// exporter.
    ///
    /// Returns `Ok(None)` without touching the exporter when there is
    /// nothing to save (empty history, or surface not ready yet); the
    /// snapshot is taken under this `&mut self` borrow, so no gesture can
    /// mutate the list mid-export.
    pub fn save(&mut self) -> Result<Option<PathBuf>, SaveError> {
        if !self.ready {
            log::debug!("Dropping save before surface readiness");
            return Ok(None);
        }
        if self.history.is_empty() {
            log::debug!("Nothing to save");
            return Ok(None);
        }

        let (width, height) = self.host.size();
        let image = draw::render_offscreen(
            self.history.snapshot(),
            width,
            height,
            self.background,
            &mut self.paints,
        )?;

        let path = self.exporter.write(&image)?;
        Ok(Some(path))
    }

    // ------------------------------------------------------------------

    /// One lock -> replay (+preview) -> present cycle.
    fn repaint_with(&mut self, preview: Option<&Shape>) -> Result<(), SurfaceError> {
        let ctx = self.host.lock_canvas()?;

        draw::repaint(
            &ctx,
            self.history.snapshot(),
            self.background,
            &mut self.paints,
        );
        if let Some(shape) = preview {
            draw::render_shapes(&ctx, std::slice::from_ref(shape), &mut self.paints);
        }

        self.host.present(ctx)
    }
}
