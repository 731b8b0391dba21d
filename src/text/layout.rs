//! Greedy word-wrapping and iterative font-size fitting.

use crate::text::font::{FontResolver, FontSpec, ResolvedFont, Typeface};

/// Starting pixel size for title fitting.
pub const BASE_TITLE_SIZE: u32 = 80;
/// Hard floor for the fitting loop.
pub const MIN_TITLE_SIZE: u32 = 30;
/// Size reduction per fitting attempt.
pub const SIZE_STEP: u32 = 5;
/// Wrapped line-count bound the fitting loop drives toward.
pub const MAX_TITLE_LINES: usize = 6;

/// Inter-line spacing factor applied to every line after the first.
pub const LINE_SPACING: f32 = 1.3;
/// Spacing factor applied to the first line only.
pub const FIRST_LINE_SPACING: f32 = 1.2;

/// Greedy word wrap against a measured maximum advance width.
///
/// Words accumulate into a line until appending the next one (with a single
/// space) would exceed `max_width`; a word wider than `max_width` on its own
/// gets its own overflowing line, never broken mid-word.
pub fn wrap(text: &str, face: &dyn Typeface, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if face.advance_width(&candidate) <= max_width {
            current = candidate;
        } else {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Result of the fitting loop: wrapped lines plus the metrics every style's
/// vertical arithmetic consumes.
pub struct FittedText {
    pub lines: Vec<String>,
    pub font: ResolvedFont,
    pub size: u32,
    /// Ink bounding-box height per line, measured at the final size.
    pub line_heights: Vec<f32>,
    /// Block height under the asymmetric spacing rule:
    /// `Σ(hᵢ·1.3) − h₀·(1.3 − 1.2)`. Every template's vertical arithmetic
    /// consumes this exact value.
    pub total_height: f32,
}

impl FittedText {
    /// Vertical advance consumed by line `i` (first line spaced tighter).
    pub fn line_advance(&self, i: usize) -> f32 {
        let factor = if i == 0 { FIRST_LINE_SPACING } else { LINE_SPACING };
        self.line_heights[i] * factor
    }
}

/// Re-wrap at decreasing sizes until the line count fits or the floor is hit.
///
/// Starts at `spec.size`, steps down [`SIZE_STEP`] to [`MIN_TITLE_SIZE`];
/// the last attempt is returned even if it still exceeds `max_lines`.
pub fn auto_fit(
    resolver: &mut FontResolver,
    spec: FontSpec,
    text: &str,
    max_width: f32,
    max_lines: usize,
) -> FittedText {
    let mut size = spec.size;
    let mut font = resolver.resolve(spec.candidates, size);
    let mut lines = wrap(text, &font, max_width);
    while lines.len() > max_lines && size > MIN_TITLE_SIZE {
        size -= SIZE_STEP;
        tracing::debug!(size, lines = lines.len(), "re-wrapping at reduced size");
        font = resolver.resolve(spec.candidates, size);
        lines = wrap(text, &font, max_width);
    }

    let line_heights: Vec<f32> = lines.iter().map(|l| font.ink_height(l)).collect();
    let total_height = total_text_height(&line_heights);

    FittedText {
        lines,
        font,
        size,
        line_heights,
        total_height,
    }
}

/// The block-height formula shared by all styles.
pub fn total_text_height(line_heights: &[f32]) -> f32 {
    if line_heights.is_empty() {
        return 0.0;
    }
    let sum: f32 = line_heights.iter().map(|h| h * LINE_SPACING).sum();
    sum - line_heights[0] * (LINE_SPACING - FIRST_LINE_SPACING)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::canvas::Mask;
    use crate::text::font::GlyphPatch;

    /// Fixed-advance fake: every char is 10px wide, ink height = size.
    struct FakeFont {
        size: f32,
    }

    impl Typeface for FakeFont {
        fn px_size(&self) -> f32 {
            self.size
        }

        fn advance_width(&self, text: &str) -> f32 {
            text.chars().count() as f32 * 10.0
        }

        fn ink_height(&self, _text: &str) -> f32 {
            self.size
        }

        fn ascent(&self) -> f32 {
            self.size * 0.8
        }

        fn rasterize(&self, _text: &str) -> Option<GlyphPatch> {
            Some(GlyphPatch {
                mask: Mask::new(1, 1),
                left: 0,
                top: 0,
            })
        }
    }

    #[test]
    fn wrap_never_exceeds_width_except_single_words() {
        let face = FakeFont { size: 20.0 };
        let text = "alpha beta gamma delta epsilon zeta eta theta";
        let max_width = 130.0;
        let lines = wrap(text, &face, max_width);
        for line in &lines {
            let within = face.advance_width(line) <= max_width;
            let single_word = !line.contains(' ');
            assert!(within || single_word, "line {line:?} breaks the contract");
        }
        // All words survive, in order.
        let rejoined = lines.join(" ");
        assert_eq!(rejoined, text);
    }

    #[test]
    fn wrap_gives_oversized_word_its_own_line() {
        let face = FakeFont { size: 20.0 };
        let lines = wrap("hi incomprehensibilities yo", &face, 100.0);
        assert_eq!(lines, vec!["hi", "incomprehensibilities", "yo"]);
    }

    #[test]
    fn wrap_packs_greedily() {
        let face = FakeFont { size: 20.0 };
        // "aa bb" = 5 chars = 50px fits in 50; adding " cc" would be 80.
        let lines = wrap("aa bb cc", &face, 50.0);
        assert_eq!(lines, vec!["aa bb", "cc"]);
    }

    #[test]
    fn wrap_empty_text_is_empty() {
        let face = FakeFont { size: 20.0 };
        assert!(wrap("", &face, 100.0).is_empty());
        assert!(wrap("   ", &face, 100.0).is_empty());
    }

    #[test]
    fn total_height_applies_first_line_correction() {
        let heights = [10.0f32, 10.0, 10.0];
        // 3·13 − 10·0.1 = 38
        let total = total_text_height(&heights);
        assert!((total - 38.0).abs() < 1e-4, "total = {total}");
        assert_eq!(total_text_height(&[]), 0.0);
    }

    #[test]
    fn line_advance_uses_asymmetric_spacing() {
        let fitted = FittedText {
            lines: vec!["a".into(), "b".into()],
            font: {
                let mut r = FontResolver::new(
                    std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/fonts"),
                );
                r.resolve(&["DejaVuSans.ttf"], 10)
            },
            size: 10,
            line_heights: vec![10.0, 10.0],
            total_height: 0.0,
        };
        assert!((fitted.line_advance(0) - 12.0).abs() < 1e-4);
        assert!((fitted.line_advance(1) - 13.0).abs() < 1e-4);
    }
}
