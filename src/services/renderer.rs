use crate::error::RenderError;
use crate::rendering::{encode_png, CanvasRenderer, CanvasStyle};
use glyph_dither::DitherResult;
use std::sync::Arc;

/// Canvas rendering plus PNG encoding, off the async runtime
pub struct RenderService {
    /// The canvas renderer
    pub canvas: Arc<CanvasRenderer>,
    optimize_png: bool,
}

impl RenderService {
    pub fn new(canvas: CanvasRenderer, optimize_png: bool) -> Self {
        Self {
            canvas: Arc::new(canvas),
            optimize_png,
        }
    }

    /// Render and encode synchronously
    pub fn render_png(
        &self,
        result: &DitherResult,
        style: &CanvasStyle,
    ) -> Result<Vec<u8>, RenderError> {
        let pixmap = self.canvas.render(result, style)?;
        encode_png(&pixmap, self.optimize_png)
    }

    /// Render and encode in a blocking context
    ///
    /// Uses spawn_blocking to avoid blocking the async runtime during
    /// rasterization and PNG optimization.
    pub async fn render_png_blocking(
        &self,
        result: Arc<DitherResult>,
        style: CanvasStyle,
    ) -> Result<Vec<u8>, RenderError> {
        let canvas = self.canvas.clone();
        let optimize = self.optimize_png;

        tokio::task::spawn_blocking(move || {
            let pixmap = canvas.render(&result, &style)?;
            encode_png(&pixmap, optimize)
        })
        .await
        .map_err(task_failed)?
    }
}

fn task_failed(e: tokio::task::JoinError) -> RenderError {
    tracing::error!(error = %e, "Render task failed");
    RenderError::TaskFailed(e.to_string())
}
