use std::sync::Arc;

use image::imageops;
use image::RgbaImage;
use runway_core::BookingRenderInfo;

use crate::assets::{AssetStore, TextPainter};
use crate::barcode;
use crate::error::RenderError;
use crate::layout::PassLayout;
use crate::registry::RendererHandle;

/// Turns layouts into images using shared, read-only assets.
#[derive(Clone)]
pub struct Compositor {
    assets: AssetStore,
    painter: Arc<dyn TextPainter>,
}

impl Compositor {
    pub fn new(assets: AssetStore, painter: Arc<dyn TextPainter>) -> Self {
        Self { assets, painter }
    }

    /// Template, then text in layout order, then the barcode on top.
    pub fn compose(&self, layout: &PassLayout) -> Result<RgbaImage, RenderError> {
        let mut canvas = self.assets.load_template(&layout.templates)?;

        for op in &layout.texts {
            self.painter.paint(&mut canvas, op)?;
        }

        if let Some(op) = &layout.barcode {
            let bars = barcode::encode(&op.payload, op.width, op.height);
            imageops::overlay(&mut canvas, &bars, op.x, op.y);
        }

        Ok(canvas)
    }

    /// Lays out and draws a boarding pass with the resolved renderer.
    pub fn draw(&self, handle: &RendererHandle, info: &BookingRenderInfo) -> Result<RgbaImage, RenderError> {
        let layout = handle.renderer.layout(info, &handle.params)?;
        self.compose(&layout)
    }
}

impl std::fmt::Debug for Compositor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Compositor").field("assets", &self.assets).finish_non_exhaustive()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::layout::{TextOp, WHITE};
    use image::Rgba;

    /// Paints a solid block per text line so output does not depend on fonts.
    pub(crate) struct BlockPainter;

    impl TextPainter for BlockPainter {
        fn paint(&self, canvas: &mut RgbaImage, op: &TextOp) -> Result<(), RenderError> {
            let width = (op.text.chars().count() as f32 * op.size / 2.0) as u32;
            let height = op.size as u32;
            for dx in 0..width {
                for dy in 0..height {
                    let (x, y) = (op.x as i64 + dx as i64, op.y as i64 + dy as i64);
                    if x >= 0 && y >= 0 && (x as u32) < canvas.width() && (y as u32) < canvas.height() {
                        canvas.put_pixel(x as u32, y as u32, op.color);
                    }
                }
            }
            Ok(())
        }
    }

    pub(crate) fn template_dir(names: &[&str], width: u32, height: u32) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for name in names {
            RgbaImage::from_pixel(width, height, Rgba([10, 20, 60, 255]))
                .save(dir.path().join(name))
                .unwrap();
        }
        dir
    }

    #[test]
    fn test_compose_places_text_and_barcode() {
        let dir = template_dir(&["plain.png"], 600, 100);
        let compositor = Compositor::new(AssetStore::new(dir.path()), Arc::new(BlockPainter));

        let mut layout = PassLayout::with_templates(["plain.png"]);
        layout.text(5, 5, 10.0, WHITE, "AB");
        layout.barcode(100, 50, 400, 40, "AB12_KL1234_X".to_string());

        let img = compositor.compose(&layout).unwrap();
        assert_eq!(img.dimensions(), (600, 100));
        assert_eq!(*img.get_pixel(6, 6), WHITE);
        assert_eq!(*img.get_pixel(150, 5), Rgba([10, 20, 60, 255]));

        // the barcode box starts with its white quiet zone
        assert_eq!(*img.get_pixel(100, 60), Rgba([255, 255, 255, 255]));
        let has_bars = (100..500).any(|x| img.get_pixel(x, 70)[0] < 128);
        assert!(has_bars);
    }

    #[test]
    fn test_compose_is_pixel_identical() {
        let dir = template_dir(&["plain.png"], 120, 60);
        let compositor = Compositor::new(AssetStore::new(dir.path()), Arc::new(BlockPainter));
        let mut layout = PassLayout::with_templates(["plain.png"]);
        layout.text(1, 1, 8.0, WHITE, "KL1234");
        layout.barcode(10, 20, 100, 30, "P_Q_R".to_string());

        assert_eq!(compositor.compose(&layout).unwrap(), compositor.compose(&layout).unwrap());
    }

    #[test]
    fn test_missing_template_is_an_error() {
        let dir = template_dir(&[], 1, 1);
        let compositor = Compositor::new(AssetStore::new(dir.path()), Arc::new(BlockPainter));
        let layout = PassLayout::with_templates(["default_economy.png"]);
        assert!(matches!(compositor.compose(&layout), Err(RenderError::TemplateNotFound(_))));
    }
}
