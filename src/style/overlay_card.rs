//! Template 1: full-bleed photo, semi-opaque rounded card behind the title,
//! gold text, optional bottom branding bar, "Read More" pill.

use crate::foundation::error::PinResult;
use crate::model::{StyleId, CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::raster::canvas::Canvas;
use crate::raster::compose::Rgba8;
use crate::style::descriptor::{GOLD, OVERLAY_CARD_TITLE_FONTS};
use crate::style::{
    bottom_branding_bar, centered_line_x, draw_shadowed_line, read_more_button, round_corners,
    soft_base_treatment, top_aligned_title_y, StyleCx, StyleTemplate,
};
use crate::text::layout::FittedText;
use crate::text::font::Typeface;

pub(crate) struct OverlayCard;

const CARD_PADDING: f32 = 35.0;
const CARD_SIDE_PADDING: f32 = 50.0;
const CARD_RADIUS: i32 = 25;
const CARD_COLOR: Rgba8 = [0, 0, 0, 180];
const CARD_SHADOW: Rgba8 = [0, 0, 0, 70];
const CARD_SHADOW_OFFSET: i32 = 5;

const TITLE_SHADOWS: [((i32, i32), Rgba8); 1] = [((3, 3), [0, 0, 0, 150])];

impl StyleTemplate for OverlayCard {
    fn id(&self) -> StyleId {
        StyleId::Style1
    }

    fn apply_background(&self, canvas: &mut Canvas, _cx: &mut StyleCx) -> PinResult<()> {
        soft_base_treatment(canvas);
        Ok(())
    }

    fn place_title(
        &self,
        canvas: &mut Canvas,
        cx: &mut StyleCx,
        title: &FittedText,
    ) -> PinResult<()> {
        let text_y = top_aligned_title_y(title.total_height);

        draw_backdrop_card(canvas, title, text_y)?;

        let face = cx
            .resolver
            .resolve(OVERLAY_CARD_TITLE_FONTS, scaled(title.size, self.descriptor().title_scale));
        let mut current_y = text_y as f32;
        for (i, line) in title.lines.iter().enumerate() {
            let x = centered_line_x(&face, line, self.descriptor().title_margin);
            draw_shadowed_line(
                canvas,
                &face,
                line,
                x,
                current_y as i32,
                &TITLE_SHADOWS,
                None,
                self.descriptor().title_color,
            );
            current_y += title.line_advance(i);
        }
        Ok(())
    }

    fn place_branding(&self, canvas: &mut Canvas, cx: &mut StyleCx) -> PinResult<()> {
        bottom_branding_bar(canvas, cx, OVERLAY_CARD_TITLE_FONTS, 36, GOLD);
        Ok(())
    }

    fn place_decoration(&self, canvas: &mut Canvas, cx: &mut StyleCx) -> PinResult<()> {
        let button_y = (CANVAS_HEIGHT as f32 * 0.88) as i32;
        read_more_button(
            canvas,
            cx,
            OVERLAY_CARD_TITLE_FONTS,
            button_y,
            [200, 200, 200, 240],
            [80, 80, 80, 255],
        )
    }

    fn finalize(&self, canvas: Canvas, _cx: &mut StyleCx) -> PinResult<Canvas> {
        round_corners(&canvas, self.descriptor().corner_radius)
    }
}

fn scaled(size: u32, factor: f32) -> u32 {
    (size as f32 * factor) as u32
}

/// Card rectangle for the measured text block: expand the per-line bounding
/// box by padding, then clamp to the canvas. `None` when there is nothing to
/// draw behind.
pub(crate) fn card_rect(title: &FittedText, text_y: i32) -> Option<(i32, i32, i32, i32)> {
    if title.lines.is_empty() {
        return None;
    }

    let mut min_x = CANVAS_WIDTH as f32;
    let mut max_x = 0.0f32;
    let min_y = text_y as f32;
    let mut max_y = 0.0f32;
    let mut current_y = text_y as f32;
    for (i, line) in title.lines.iter().enumerate() {
        let w = title.font.advance_width(line);
        let line_x = ((CANVAS_WIDTH as f32 - w) / 2.0).floor();
        let advance = title.line_advance(i);
        min_x = min_x.min(line_x);
        max_x = max_x.max(line_x + w);
        max_y = max_y.max(current_y + advance);
        current_y += advance;
    }

    let box_left = ((min_x - CARD_SIDE_PADDING) as i32).max(0);
    let box_top = ((min_y - CARD_PADDING) as i32).max(0);
    let box_right = ((max_x + CARD_SIDE_PADDING) as i32).min(CANVAS_WIDTH as i32);
    let box_bottom = ((max_y + CARD_PADDING * 0.8) as i32).min(CANVAS_HEIGHT as i32);
    if box_right <= box_left || box_bottom <= box_top {
        return None;
    }
    Some((box_left, box_top, box_right, box_bottom))
}

/// Composite the card with its own drop shadow before the glyphs land.
fn draw_backdrop_card(canvas: &mut Canvas, title: &FittedText, text_y: i32) -> PinResult<()> {
    let Some((box_left, box_top, box_right, box_bottom)) = card_rect(title, text_y) else {
        return Ok(());
    };

    let mut overlay = Canvas::new(canvas.width(), canvas.height());
    overlay.set_rounded_rect(
        box_left + CARD_SHADOW_OFFSET,
        box_top + CARD_SHADOW_OFFSET,
        box_right + CARD_SHADOW_OFFSET,
        box_bottom + CARD_SHADOW_OFFSET,
        CARD_RADIUS,
        CARD_SHADOW,
    );
    overlay.set_rounded_rect(box_left, box_top, box_right, box_bottom, CARD_RADIUS, CARD_COLOR);
    canvas.blend_over(&overlay)
}
