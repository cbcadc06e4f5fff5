//! Drawing session: the single owner of all drawing state.
//!
//! [`DrawingSession`] ties the input controller, the color picker model and the
//! canvas surface together and exposes the operations a hosting view calls into.
//! Everything here runs on the owning thread; only encoded PNG bytes ever leave it.

use crate::access::{self, AccessError, StorageAccess};
use crate::config::Config;
use crate::draw::color::{BLACK, WHITE};
use crate::draw::{
    BackgroundError, BackgroundImage, BrushSize, BrushState, CanvasSurface, Color, StrokeHistory,
};
use crate::export::{self, ExportError, ExportManager, ExportTicket, FileSaveConfig};
use crate::input::{ColorPicker, InputState, TouchEvent};
use thiserror::Error;


/// External image chooser used for background import.
pub trait ImagePicker {
    /// Returns the encoded bytes of the chosen image, or `None` if nothing was chosen.
    fn pick(&mut self) -> Option<Vec<u8>>;
}

/// Errors raised by background import.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("No image selected")]
    NothingSelected,

    #[error(transparent)]
    Decode(#[from] BackgroundError),

    #[error(transparent)]
    Access(#[from] AccessError),
}

/// One drawing canvas with its history, brush, color picker and export settings.
pub struct DrawingSession {
    input: InputState,
    color_picker: ColorPicker,
    canvas: CanvasSurface,
    save_config: FileSaveConfig,
    share_after_save: bool,
}

impl DrawingSession {
    /// Creates a session for a `width` x `height` view from the user configuration.
    pub fn new(config: &Config, width: i32, height: i32) -> Result<Self, cairo::Error> {
        let density = config.display.density;
        let brush = BrushState::new(
            config.drawing.default_color.to_color_or(BLACK),
            config.drawing.default_brush_size.dp(&config.brush),
            density,
        );
        let canvas = CanvasSurface::new(
            width,
            height,
            config.canvas.background_color.to_color_or(WHITE),
            config.canvas.flatten_strokes,
        )?;

        log::debug!(
            "Created {}x{} drawing session (density {:.2}, flatten {})",
            width,
            height,
            density,
            config.canvas.flatten_strokes
        );

        Ok(Self {
            input: InputState::new(brush, config.brush.clone()),
            color_picker: ColorPicker::new(),
            canvas,
            save_config: FileSaveConfig::from(&config.export),
            share_after_save: config.export.share_after_save,
        })
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn history(&self) -> &StrokeHistory {
        self.input.history()
    }

    pub fn canvas(&self) -> &CanvasSurface {
        &self.canvas
    }

    /// Export destination used by [`DrawingSession::export`].
    pub fn save_config(&self) -> &FileSaveConfig {
        &self.save_config
    }

    pub fn set_save_config(&mut self, save_config: FileSaveConfig) {
        self.save_config = save_config;
    }

    /// Feeds one touch event to the input controller.
    ///
    /// Returns `false` for events that were not consumed.
    pub fn handle_touch(&mut self, event: TouchEvent) -> bool {
        let consumed = self.input.handle_touch(event);
        if consumed && matches!(event, TouchEvent::Release) {
            self.canvas.sync(self.input.history());
        }
        consumed
    }

    pub fn undo(&mut self) {
        self.input.undo();
        self.canvas.sync(self.input.history());
    }

    /// Erases all strokes. The background image is kept.
    pub fn clear(&mut self) {
        self.input.clear();
        self.canvas.sync(self.input.history());
    }

    pub fn set_brush_size(&mut self, size: BrushSize) {
        self.input.set_brush_size(size);
    }

    /// Sets the brush thickness in device-independent units.
    pub fn set_brush_thickness(&mut self, dp: f64) {
        self.input.set_brush_thickness(dp);
    }

    /// Sets the brush color directly, bypassing the picker.
    pub fn set_color(&mut self, color: Color) {
        self.input.set_color(color);
    }

    /// Opens the color picker pre-filled with the current brush color.
    pub fn open_color_picker(&mut self) -> &mut ColorPicker {
        self.color_picker.open(self.input.color());
        &mut self.color_picker
    }

    pub fn color_picker(&mut self) -> &mut ColorPicker {
        &mut self.color_picker
    }

    /// Applies the picker selection to the brush and closes the picker.
    pub fn confirm_color(&mut self) -> Option<Color> {
        let color = self.color_picker.confirm()?;
        self.input.set_color(color);
        Some(color)
    }

    pub fn cancel_color(&mut self) {
        self.color_picker.cancel();
    }

    /// Replaces the background with an image chosen through `picker`.
    ///
    /// Storage access is checked first. On any failure the current background stays.
    pub fn import_background(
        &mut self,
        picker: &mut dyn ImagePicker,
        access: &dyn StorageAccess,
    ) -> Result<(), ImportError> {
        access::ensure_storage_access(access)?;

        let bytes = picker.pick().ok_or(ImportError::NothingSelected)?;
        let image = BackgroundImage::decode(&bytes)?;
        log::info!(
            "Imported {}x{} background image",
            image.width(),
            image.height()
        );

        self.canvas.set_background(Some(image));
        self.input.needs_redraw = true;
        Ok(())
    }

    pub fn clear_background(&mut self) {
        if self.canvas.has_background() {
            self.canvas.set_background(None);
            self.input.needs_redraw = true;
        }
    }

    /// Adapts the canvas to a new view size.
    pub fn resize(&mut self, width: i32, height: i32) -> Result<(), cairo::Error> {
        self.canvas.resize(width, height)?;
        self.input.needs_redraw = true;
        Ok(())
    }

    /// Whether the view should be redrawn; clears the flag.
    pub fn take_redraw(&mut self) -> bool {
        self.input.take_redraw()
    }

    /// Draws the composited view onto `ctx`.
    pub fn render(&mut self, ctx: &cairo::Context) {
        self.canvas.render(ctx, self.input.history());
    }

    /// Renders the current view and encodes it as PNG.
    pub fn snapshot_png(&mut self) -> Result<Vec<u8>, ExportError> {
        let snapshot = self.canvas.snapshot(self.input.history())?;
        export::encode_png(&snapshot)
    }

    /// Starts a background export of the current view.
    ///
    /// The view is snapshotted and encoded before this returns, so later drawing
    /// does not affect the exported image.
    pub fn export(
        &mut self,
        manager: &ExportManager,
        access: &dyn StorageAccess,
    ) -> Result<ExportTicket, ExportError> {
        access::ensure_storage_access(access)?;

        let png = self.snapshot_png()?;
        manager.request_export(png, self.save_config.clone(), self.share_after_save)
    }
}
