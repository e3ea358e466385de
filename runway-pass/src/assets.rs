use std::path::{Path, PathBuf};

use ab_glyph::{Font, FontArc, PxScale};
use image::RgbaImage;
use imageproc::drawing::draw_text_mut;
use tracing::{debug, info};

use crate::error::RenderError;
use crate::layout::TextOp;

/// Read-only directory of template images.
#[derive(Debug, Clone)]
pub struct AssetStore {
    root: PathBuf,
}

impl AssetStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Path of a template, if `name` is a plain file name that exists.
    /// Anything with a directory component is refused.
    pub fn template_path(&self, name: &str) -> Option<PathBuf> {
        let candidate = Path::new(name);
        let plain = candidate.file_name().is_some_and(|f| f == candidate.as_os_str());
        if name.is_empty() || !plain {
            return None;
        }
        let path = self.root.join(candidate);
        path.is_file().then_some(path)
    }

    /// Loads the first template in `candidates` that exists.
    pub fn load_template(&self, candidates: &[String]) -> Result<RgbaImage, RenderError> {
        let (name, path) = candidates
            .iter()
            .find_map(|name| self.template_path(name).map(|path| (name, path)))
            .ok_or_else(|| RenderError::TemplateNotFound(candidates.to_vec()))?;

        debug!(template = %name, "Loading boarding pass template");
        let img = image::open(&path).map_err(|source| RenderError::Template {
            name: name.clone(),
            source,
        })?;
        Ok(img.to_rgba8())
    }
}

/// Draws one line of text onto a canvas.
pub trait TextPainter: Send + Sync {
    fn paint(&self, canvas: &mut RgbaImage, op: &TextOp) -> Result<(), RenderError>;
}

/// Paints text with a TrueType/OpenType font.
#[derive(Clone)]
pub struct FontPainter {
    font: FontArc,
}

impl FontPainter {
    pub fn new(font: FontArc) -> Self {
        Self { font }
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, RenderError> {
        let font = FontArc::try_from_vec(bytes).map_err(|e| RenderError::Font(e.to_string()))?;
        Ok(Self::new(font))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, RenderError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .map_err(|e| RenderError::Font(format!("{}: {}", path.display(), e)))?;
        let painter = Self::from_bytes(bytes)?;
        info!(font = %path.display(), "Loaded boarding pass font");
        Ok(painter)
    }

    /// Scale at which one em is `size` pixels tall.
    fn scale(&self, size: f32) -> PxScale {
        match self.font.units_per_em() {
            Some(upem) if upem > 0.0 => PxScale::from(size * self.font.height_unscaled() / upem),
            _ => PxScale::from(size),
        }
    }
}

impl std::fmt::Debug for FontPainter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontPainter").finish_non_exhaustive()
    }
}

impl TextPainter for FontPainter {
    fn paint(&self, canvas: &mut RgbaImage, op: &TextOp) -> Result<(), RenderError> {
        if op.text.is_empty() {
            return Ok(());
        }
        draw_text_mut(canvas, op.color, op.x, op.y, self.scale(op.size), &self.font, &op.text);
        Ok(())
    }
}
