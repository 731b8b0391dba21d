//! Font resolution and glyph rasterization.
//!
//! Resolution walks a fallback chain and never fails: bundled files in the
//! font directory, then a short list of well-known system fonts, then a font
//! embedded in the binary. Callers always get something they can measure and
//! draw with.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use rusttype::{point, Font as RtFont, Scale};
use tracing::{debug, warn};

use crate::raster::canvas::{Canvas, Mask};
use crate::raster::compose::Rgba8;

/// Ordered font preference list plus a pixel size.
#[derive(Clone, Copy, Debug)]
pub struct FontSpec {
    pub candidates: &'static [&'static str],
    pub size: u32,
}

impl FontSpec {
    pub const fn new(candidates: &'static [&'static str], size: u32) -> Self {
        Self { candidates, size }
    }

    pub const fn with_size(self, size: u32) -> Self {
        Self {
            candidates: self.candidates,
            size,
        }
    }

    /// Scale the pixel size, truncating to whole pixels.
    pub fn scaled(self, factor: f32) -> Self {
        Self {
            candidates: self.candidates,
            size: (self.size as f32 * factor) as u32,
        }
    }
}

/// A rasterized run of text: coverage mask plus its offset from the
/// draw origin (left edge, ascender top).
pub struct GlyphPatch {
    pub mask: Mask,
    pub left: i32,
    pub top: i32,
}

/// Measurement and rasterization capability of a resolved font.
///
/// `(x, y)` passed to [`draw_text`] addresses the left edge and the ascender
/// top of the line, matching how the layout arithmetic positions text blocks.
pub trait Typeface {
    fn px_size(&self) -> f32;

    /// Advance width of the whole run, kerning included.
    fn advance_width(&self, text: &str) -> f32;

    /// Height of the ink bounding box. Whitespace-only runs report the
    /// nominal pixel size so empty measurements stay non-degenerate.
    fn ink_height(&self, text: &str) -> f32;

    fn ascent(&self) -> f32;

    fn rasterize(&self, text: &str) -> Option<GlyphPatch>;
}

/// Blend a text run onto the canvas at `(x, y)` (left edge, ascender top).
pub fn draw_text(canvas: &mut Canvas, face: &dyn Typeface, text: &str, x: i32, y: i32, color: Rgba8) {
    if let Some(patch) = face.rasterize(text) {
        canvas.blit_mask(&patch.mask, x + patch.left, y + patch.top, color);
    }
}

/// Where a resolved font came from, for logging and diagnostics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FontSource {
    Bundled(PathBuf),
    System(PathBuf),
    Builtin,
}

/// A concrete font at a fixed pixel size.
#[derive(Clone)]
pub struct ResolvedFont {
    font: Arc<RtFont<'static>>,
    size: f32,
    source: FontSource,
}

impl ResolvedFont {
    fn new(font: Arc<RtFont<'static>>, size: u32, source: FontSource) -> Self {
        Self {
            font,
            size: size as f32,
            source,
        }
    }

    pub fn source(&self) -> &FontSource {
        &self.source
    }

    fn scale(&self) -> Scale {
        Scale::uniform(self.size)
    }

    /// Ink bounding box of `text` laid out with the baseline at the ascender,
    /// relative to the (left, ascender-top) origin.
    fn ink_bbox(&self, text: &str) -> Option<(i32, i32, i32, i32)> {
        let v = self.font.v_metrics(self.scale());
        let mut min_x = i32::MAX;
        let mut min_y = i32::MAX;
        let mut max_x = i32::MIN;
        let mut max_y = i32::MIN;
        for g in self.font.layout(text, self.scale(), point(0.0, v.ascent)) {
            if let Some(bb) = g.pixel_bounding_box() {
                min_x = min_x.min(bb.min.x);
                min_y = min_y.min(bb.min.y);
                max_x = max_x.max(bb.max.x);
                max_y = max_y.max(bb.max.y);
            }
        }
        if min_x == i32::MAX {
            None
        } else {
            Some((min_x, min_y, max_x, max_y))
        }
    }
}

impl Typeface for ResolvedFont {
    fn px_size(&self) -> f32 {
        self.size
    }

    fn advance_width(&self, text: &str) -> f32 {
        let v = self.font.v_metrics(self.scale());
        let glyphs: Vec<_> = self
            .font
            .layout(text, self.scale(), point(0.0, v.ascent))
            .collect();
        match glyphs.last() {
            Some(g) => g.position().x + g.unpositioned().h_metrics().advance_width,
            None => 0.0,
        }
    }

    fn ink_height(&self, text: &str) -> f32 {
        match self.ink_bbox(text) {
            Some((_, min_y, _, max_y)) => (max_y - min_y) as f32,
            None => self.size,
        }
    }

    fn ascent(&self) -> f32 {
        self.font.v_metrics(self.scale()).ascent
    }

    fn rasterize(&self, text: &str) -> Option<GlyphPatch> {
        let (min_x, min_y, max_x, max_y) = self.ink_bbox(text)?;
        let w = (max_x - min_x).max(0) as u32;
        let h = (max_y - min_y).max(0) as u32;
        if w == 0 || h == 0 {
            return None;
        }
        let mut mask = Mask::new(w, h);
        let v = self.font.v_metrics(self.scale());
        for g in self.font.layout(text, self.scale(), point(0.0, v.ascent)) {
            let Some(bb) = g.pixel_bounding_box() else {
                continue;
            };
            g.draw(|gx, gy, cov| {
                let mx = bb.min.x + gx as i32 - min_x;
                let my = bb.min.y + gy as i32 - min_y;
                if mx < 0 || my < 0 || mx as u32 >= w || my as u32 >= h {
                    return;
                }
                let c = (cov * 255.0).round().clamp(0.0, 255.0) as u8;
                // Overlapping glyph boxes keep the stronger coverage.
                if c > mask.get(mx as u32, my as u32) {
                    mask.put(mx as u32, my as u32, c);
                }
            });
        }
        Some(GlyphPatch {
            mask,
            left: min_x,
            top: min_y,
        })
    }
}

/// System font names tried after every bundled candidate missed.
const SYSTEM_FALLBACKS: &[&str] = &["arial.ttf", "Arial.ttf", "DejaVuSans.ttf", "Verdana.ttf"];

/// Conventional directories searched for the system fallbacks.
const SYSTEM_FONT_DIRS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu",
    "/usr/share/fonts/truetype/msttcorefonts",
    "/usr/share/fonts/truetype",
    "/usr/share/fonts",
    "/usr/local/share/fonts",
    "/Library/Fonts",
    "/System/Library/Fonts",
    "C:\\Windows\\Fonts",
];

static BUILTIN_FONT_BYTES: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");

fn builtin_font() -> Arc<RtFont<'static>> {
    static BUILTIN: OnceLock<Arc<RtFont<'static>>> = OnceLock::new();
    BUILTIN
        .get_or_init(|| {
            Arc::new(
                RtFont::try_from_bytes(BUILTIN_FONT_BYTES)
                    .expect("embedded default font is a valid TTF"),
            )
        })
        .clone()
}

/// Resolves ordered candidate lists to usable fonts, caching by
/// (candidate list, size). Resolution is deterministic and never fails.
pub struct FontResolver {
    font_dir: PathBuf,
    cache: HashMap<(String, u32), ResolvedFont>,
}

impl FontResolver {
    pub fn new(font_dir: impl Into<PathBuf>) -> Self {
        Self {
            font_dir: font_dir.into(),
            cache: HashMap::new(),
        }
    }

    /// Default bundled-font location relative to the working directory.
    pub fn bundled() -> Self {
        Self::new("assets/fonts")
    }

    pub fn font_dir(&self) -> &Path {
        &self.font_dir
    }

    pub fn resolve_spec(&mut self, spec: FontSpec) -> ResolvedFont {
        self.resolve(spec.candidates, spec.size)
    }

    pub fn resolve(&mut self, candidates: &[&str], size: u32) -> ResolvedFont {
        let key = (candidates.join("|"), size);
        if let Some(hit) = self.cache.get(&key) {
            return hit.clone();
        }
        let resolved = self.resolve_uncached(candidates, size);
        self.cache.insert(key, resolved.clone());
        resolved
    }

    fn resolve_uncached(&self, candidates: &[&str], size: u32) -> ResolvedFont {
        for name in candidates {
            let path = self.font_dir.join(name);
            if !path.exists() {
                debug!(font = %path.display(), "bundled font not present");
                continue;
            }
            match load_font_file(&path) {
                Some(font) => {
                    debug!(font = %path.display(), size, "loaded bundled font");
                    return ResolvedFont::new(font, size, FontSource::Bundled(path));
                }
                None => warn!(font = %path.display(), "bundled font failed to parse"),
            }
        }

        warn!(?candidates, "no bundled font matched, trying system fallbacks");
        for name in SYSTEM_FALLBACKS {
            for dir in SYSTEM_FONT_DIRS {
                let path = Path::new(dir).join(name);
                if !path.exists() {
                    continue;
                }
                if let Some(font) = load_font_file(&path) {
                    debug!(font = %path.display(), size, "loaded system fallback font");
                    return ResolvedFont::new(font, size, FontSource::System(path));
                }
            }
        }

        warn!("all font candidates failed, using embedded default");
        ResolvedFont::new(builtin_font(), size, FontSource::Builtin)
    }
}

fn load_font_file(path: &Path) -> Option<Arc<RtFont<'static>>> {
    let bytes = match std::fs::read(path) {
        Ok(b) => b,
        Err(err) => {
            warn!(font = %path.display(), %err, "could not read font file");
            return None;
        }
    };
    RtFont::try_from_vec(bytes).map(Arc::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset_dir() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/fonts")
    }

    #[test]
    fn resolves_bundled_font_first() {
        let mut r = FontResolver::new(asset_dir());
        let f = r.resolve(&["DejaVuSans-Bold.ttf", "DejaVuSans.ttf"], 40);
        match f.source() {
            FontSource::Bundled(p) => {
                assert!(p.ends_with("DejaVuSans-Bold.ttf"));
            }
            other => panic!("expected bundled font, got {other:?}"),
        }
    }

    #[test]
    fn missing_candidates_degrade_without_error() {
        let mut r = FontResolver::new("/nonexistent/font/dir");
        let f = r.resolve(&["NoSuchFont.ttf"], 32);
        // Lands on a system DejaVu or the embedded copy; either way it works.
        assert!(f.advance_width("hello") > 0.0);
    }

    #[test]
    fn cache_returns_identical_source() {
        let mut r = FontResolver::new(asset_dir());
        let a = r.resolve(&["DejaVuSans.ttf"], 40);
        let b = r.resolve(&["DejaVuSans.ttf"], 40);
        assert_eq!(a.source(), b.source());
    }

    #[test]
    fn advance_width_grows_with_text() {
        let mut r = FontResolver::new(asset_dir());
        let f = r.resolve(&["DejaVuSans.ttf"], 40);
        let short = f.advance_width("hi");
        let long = f.advance_width("hi there, much longer");
        assert!(long > short);
        assert_eq!(f.advance_width(""), 0.0);
    }

    #[test]
    fn ink_height_reasonable_for_size() {
        let mut r = FontResolver::new(asset_dir());
        let f = r.resolve(&["DejaVuSans.ttf"], 80);
        let h = f.ink_height("Mg"); // ascender + descender coverage
        assert!(h > 20.0 && h < 160.0, "h = {h}");
        // Whitespace-only runs fall back to the nominal size.
        assert_eq!(f.ink_height("   "), 80.0);
    }

    #[test]
    fn rasterize_produces_nonempty_mask() {
        let mut r = FontResolver::new(asset_dir());
        let f = r.resolve(&["DejaVuSans.ttf"], 40);
        let patch = f.rasterize("A").unwrap();
        assert!(patch.mask.width() > 0);
        assert!(patch.mask.data().iter().any(|&v| v > 0));
        assert!(f.rasterize("   ").is_none());
    }

    #[test]
    fn builtin_font_parses() {
        let f = ResolvedFont::new(builtin_font(), 24, FontSource::Builtin);
        assert!(f.advance_width("fallback") > 0.0);
    }

    #[test]
    fn scaled_spec_truncates_like_integer_math() {
        let spec = FontSpec::new(&["x.ttf"], 80);
        assert_eq!(spec.scaled(1.05).size, 84);
        assert_eq!(spec.scaled(1.2).size, 96);
    }
}
