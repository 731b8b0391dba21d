//! The five fixed visual templates.
//!
//! Each template implements the same five-stage contract and the pipeline
//! drives them style-agnostically. What used to be a per-style conditional
//! cascade is a dispatch table over unit structs plus the shared drawing
//! helpers in this module.

pub mod descriptor;

mod banner_bars;
mod curve_sweep;
mod lower_panel;
mod overlay_card;
mod radial_gold;

use crate::foundation::error::PinResult;
use crate::model::{RenderRequest, StyleId, CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::raster::canvas::Canvas;
use crate::raster::compose::Rgba8;
use crate::raster::{enhance, mask_gen};
use crate::text::font::{draw_text, FontResolver, Typeface};
use crate::text::layout::FittedText;

pub use descriptor::{descriptor, StyleDescriptor};

/// Per-request context handed to every template stage.
pub struct StyleCx<'a> {
    pub resolver: &'a mut FontResolver,
    pub request: &'a RenderRequest,
}

impl StyleCx<'_> {
    pub fn branding(&self) -> Option<&str> {
        let t = self.request.branding_text.trim();
        if t.is_empty() {
            None
        } else {
            Some(t)
        }
    }
}

/// The five-operation template contract.
///
/// Stages run in pipeline order: background, title (including any text
/// backdrop), pre-clip branding, decoration, then `finalize` which owns the
/// corner clip and anything drawn after it.
pub trait StyleTemplate {
    fn id(&self) -> StyleId;

    fn descriptor(&self) -> &'static StyleDescriptor {
        descriptor(self.id())
    }

    fn apply_background(&self, canvas: &mut Canvas, cx: &mut StyleCx) -> PinResult<()>;

    fn place_title(&self, canvas: &mut Canvas, cx: &mut StyleCx, title: &FittedText)
        -> PinResult<()>;

    fn place_branding(&self, canvas: &mut Canvas, cx: &mut StyleCx) -> PinResult<()>;

    fn place_decoration(&self, canvas: &mut Canvas, cx: &mut StyleCx) -> PinResult<()>;

    fn finalize(&self, canvas: Canvas, cx: &mut StyleCx) -> PinResult<Canvas>;
}

pub fn style_for(id: StyleId) -> &'static dyn StyleTemplate {
    match id {
        StyleId::Style1 => &overlay_card::OverlayCard,
        StyleId::Style2 => &radial_gold::RadialGold,
        StyleId::Style3 => &banner_bars::BannerBars,
        StyleId::Style4 => &lower_panel::LowerPanel,
        StyleId::Style5 => &curve_sweep::CurveSweep,
    }
}

// ---------------------------------------------------------------------------
// Shared drawing helpers
// ---------------------------------------------------------------------------

/// Softening pass every template applies before its own background work:
/// slightly lowered contrast, a cool tint, and a vertical darkening gradient.
pub(crate) fn soft_base_treatment(canvas: &mut Canvas) {
    enhance::contrast(canvas, 0.85);
    canvas.blend_rect(
        0,
        0,
        canvas.width() as i32,
        canvas.height() as i32,
        [66, 66, 77, 25],
    );
    enhance::vertical_darken(canvas);
}

/// Horizontal position for a centered line, kept at least `margin` from both
/// edges; recentering shifts left first, exactly as wide lines did before.
pub(crate) fn centered_line_x(face: &dyn Typeface, line: &str, margin: i32) -> i32 {
    let w = face.advance_width(line);
    let mut x = ((CANVAS_WIDTH as f32 - w) / 2.0).floor() as i32;
    if x as f32 + w > (CANVAS_WIDTH as i32 - margin) as f32 {
        x = margin.max(((CANVAS_WIDTH as i32 - margin) as f32 - w).floor() as i32);
    }
    x
}

/// Shadow layers drawn under a text run, farthest first.
pub(crate) type ShadowLayers = &'static [((i32, i32), Rgba8)];

/// Draw one text run with optional shadow layers and an optional 8-direction
/// stroke outline beneath the fill.
pub(crate) fn draw_shadowed_line(
    canvas: &mut Canvas,
    face: &dyn Typeface,
    text: &str,
    x: i32,
    y: i32,
    shadows: ShadowLayers,
    stroke: Option<Rgba8>,
    fill: Rgba8,
) {
    for ((dx, dy), color) in shadows {
        draw_text(canvas, face, text, x + dx, y + dy, *color);
    }
    if let Some(stroke_color) = stroke {
        const DIRS: [(i32, i32); 8] = [
            (0, 1),
            (1, 0),
            (0, -1),
            (-1, 0),
            (1, 1),
            (-1, -1),
            (1, -1),
            (-1, 1),
        ];
        for (dx, dy) in DIRS {
            draw_text(canvas, face, text, x + dx, y + dy, stroke_color);
        }
    }
    draw_text(canvas, face, text, x, y, fill);
}

/// Title top position for the full-bleed templates: fixed 80px from the top,
/// pushed up when a long block would collide with the bottom furniture.
pub(crate) fn top_aligned_title_y(total_height: f32) -> i32 {
    let text_y = 80i32;
    let available = CANVAS_HEIGHT as f32;
    if text_y as f32 + total_height > available - 200.0 {
        (40f32).max(available - 200.0 - total_height) as i32
    } else {
        text_y
    }
}

const BOTTOM_BAR_HEIGHT: i32 = 60;

/// The 60px branding bar used by the full-bleed templates: dark strip across
/// the bottom with layered-shadow text centered in it.
pub(crate) fn bottom_branding_bar(
    canvas: &mut Canvas,
    cx: &mut StyleCx,
    fonts: &'static [&'static str],
    size: u32,
    text_color: Rgba8,
) {
    let Some(text) = cx.branding().map(str::to_owned) else {
        return;
    };
    let h = CANVAS_HEIGHT as i32;
    canvas.blend_rect(0, h - BOTTOM_BAR_HEIGHT, CANVAS_WIDTH as i32, h, [0, 0, 0, 200]);

    let face = cx.resolver.resolve(fonts, size);
    let w = face.advance_width(&text);
    let th = face.ink_height(&text);
    let x = ((CANVAS_WIDTH as f32 - w) / 2.0).floor() as i32;
    let y = (h as f32 - BOTTOM_BAR_HEIGHT as f32 / 2.0 - th / 2.0) as i32;

    const BAR_SHADOWS: [((i32, i32), Rgba8); 3] = [
        ((3, 3), [0, 0, 0, 100]),
        ((2, 2), [0, 0, 0, 130]),
        ((1, 1), [0, 0, 0, 150]),
    ];
    draw_shadowed_line(canvas, &face, &text, x, y, &BAR_SHADOWS, None, text_color);
}

const BUTTON_TEXT: &str = "Read More";
const BUTTON_FONT_SIZE: u32 = 33;
const BUTTON_HEIGHT: i32 = 70;
const BUTTON_RADIUS: i32 = 25;

/// The pill-shaped call-to-action used by the first three templates.
pub(crate) fn read_more_button(
    canvas: &mut Canvas,
    cx: &mut StyleCx,
    fonts: &'static [&'static str],
    button_y: i32,
    button_color: Rgba8,
    text_color: Rgba8,
) -> PinResult<()> {
    let face = cx.resolver.resolve(fonts, BUTTON_FONT_SIZE);
    let text_w = face.advance_width(BUTTON_TEXT);
    let text_h = face.ink_height(BUTTON_TEXT);

    let button_w = (CANVAS_WIDTH as f32 * 0.45) as i32;
    let button_x = (CANVAS_WIDTH as i32 - button_w) / 2;

    // Shapes overwrite each other on the scratch overlay, then composite once.
    let mut overlay = Canvas::new(canvas.width(), canvas.height());
    let shadow_offset = 4;
    overlay.set_rounded_rect(
        button_x + shadow_offset,
        button_y + shadow_offset,
        button_x + button_w + shadow_offset,
        button_y + BUTTON_HEIGHT + shadow_offset,
        BUTTON_RADIUS,
        [0, 0, 0, 90],
    );
    overlay.set_rounded_rect(
        button_x,
        button_y,
        button_x + button_w,
        button_y + BUTTON_HEIGHT,
        BUTTON_RADIUS,
        button_color,
    );
    canvas.blend_over(&overlay)?;

    let tx = button_x + ((button_w as f32 - text_w) / 2.0).floor() as i32;
    let ty = button_y + ((BUTTON_HEIGHT as f32 - text_h) / 2.0).floor() as i32;
    draw_text(canvas, &face, BUTTON_TEXT, tx, ty, text_color);
    Ok(())
}

/// A centered rounded box near the bottom edge holding the branding text,
/// used by the templates that embed branding instead of drawing a bar.
pub(crate) struct BrandingBox {
    pub fonts: &'static [&'static str],
    pub size: u32,
    pub box_color: Rgba8,
    pub radius: i32,
    pub bottom_padding: i32,
    pub text_color: Rgba8,
    /// Applied to the vertically centered text top.
    pub vertical_adjust: i32,
    /// Center horizontally on the ink box instead of the advance width.
    pub center_on_ink: bool,
}

pub(crate) fn draw_branding_box(canvas: &mut Canvas, cx: &mut StyleCx, spec: &BrandingBox) {
    let Some(text) = cx.branding().map(str::to_owned) else {
        return;
    };
    let face = cx.resolver.resolve(spec.fonts, spec.size);
    let advance = face.advance_width(&text);
    let ink_h = face.ink_height(&text);

    let box_padding_x = 60.0;
    let box_padding_y = 20.0;
    let box_w = advance + box_padding_x;
    let box_h = ink_h + box_padding_y;

    let box_x = ((CANVAS_WIDTH as f32 - box_w) / 2.0).floor() as i32;
    let box_y = CANVAS_HEIGHT as i32 - spec.bottom_padding - box_h as i32;

    canvas.blend_rounded_rect(
        box_x,
        box_y,
        box_x + box_w as i32,
        box_y + box_h as i32,
        spec.radius,
        spec.box_color,
    );

    let center_x = box_x as f32 + box_w / 2.0;
    let center_y = box_y as f32 + box_h / 2.0;
    let text_w = if spec.center_on_ink {
        face.rasterize(&text)
            .map(|p| p.mask.width() as f32)
            .unwrap_or(advance)
    } else {
        advance
    };
    let tx = (center_x - text_w / 2.0) as i32;
    let ty = (center_y - ink_h / 2.0) as i32 + spec.vertical_adjust;
    draw_text(canvas, &face, &text, tx, ty, spec.text_color);
}

/// Clip the whole canvas to rounded corners. Runs after every other draw so
/// it overrides earlier transparency decisions.
pub(crate) fn round_corners(canvas: &Canvas, radius: u32) -> PinResult<Canvas> {
    let mask = mask_gen::rounded_rect(canvas.width(), canvas.height(), radius);
    canvas.clipped_by(&mask)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::font::GlyphPatch;
    use crate::raster::canvas::Mask;

    struct FixedFace {
        advance: f32,
    }

    impl Typeface for FixedFace {
        fn px_size(&self) -> f32 {
            10.0
        }
        fn advance_width(&self, _text: &str) -> f32 {
            self.advance
        }
        fn ink_height(&self, _text: &str) -> f32 {
            10.0
        }
        fn ascent(&self) -> f32 {
            8.0
        }
        fn rasterize(&self, _text: &str) -> Option<GlyphPatch> {
            Some(GlyphPatch {
                mask: Mask::new(self.advance as u32, 10),
                left: 0,
                top: 0,
            })
        }
    }

    #[test]
    fn centered_x_is_symmetric_for_narrow_lines() {
        let face = FixedFace { advance: 400.0 };
        assert_eq!(centered_line_x(&face, "x", 40), 300);
    }

    #[test]
    fn centered_x_clamps_wide_lines_to_margin() {
        let face = FixedFace { advance: 950.0 };
        let x = centered_line_x(&face, "x", 40);
        assert_eq!(x, 40);
        let face = FixedFace { advance: 980.0 };
        assert_eq!(centered_line_x(&face, "x", 50), 50);
    }

    #[test]
    fn top_aligned_y_is_fixed_until_collision() {
        assert_eq!(top_aligned_title_y(100.0), 80);
        // 80 + 1250 > 1300 forces the block upward, floored at 40.
        assert_eq!(top_aligned_title_y(1250.0), 50);
        assert_eq!(top_aligned_title_y(1400.0), 40);
    }

    #[test]
    fn every_style_id_dispatches() {
        for id in StyleId::ALL {
            assert_eq!(style_for(id).id(), id);
        }
    }
}
