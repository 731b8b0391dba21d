//! Template 3: near-black banner bars top and bottom, white title centered
//! in the top bar, large branding centered in the bottom bar.
//!
//! The top bar height follows the measured title so short titles get a slim
//! bar and long ones a deeper bar, within fixed aesthetic bounds.

use crate::foundation::error::PinResult;
use crate::model::{StyleId, CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::raster::canvas::Canvas;
use crate::raster::compose::Rgba8;
use crate::style::descriptor::{BANNER_BARS_TITLE_FONTS, WHITE};
use crate::style::{
    centered_line_x, draw_shadowed_line, read_more_button, round_corners, soft_base_treatment,
    StyleCx, StyleTemplate,
};
use crate::text::font::{draw_text, Typeface};
use crate::text::layout::{wrap, FittedText};

pub(crate) struct BannerBars;

const BAR_COLOR: Rgba8 = [33, 33, 35, 240];
const BOTTOM_BAR_HEIGHT: i32 = 180;
const TOP_BAR_MIN: f32 = 170.0;
const TOP_BAR_MAX: f32 = 320.0;
const TOP_BAR_PADDING: f32 = 50.0;
/// Wrap width used only for sizing the top bar.
const BAR_MEASURE_WIDTH: f32 = (CANVAS_WIDTH - 100) as f32;

const TITLE_SHADOWS: [((i32, i32), Rgba8); 1] = [((2, 2), [0, 0, 0, 100])];

/// Bar height from a pre-fit wrap of the title at the nominal 80px size.
/// Deterministic for a given title, so background and title placement agree.
fn top_bar_height(cx: &mut StyleCx) -> i32 {
    let face = cx.resolver.resolve(BANNER_BARS_TITLE_FONTS, 80);
    let lines = wrap(&cx.request.title, &face, BAR_MEASURE_WIDTH);
    let total: f32 = lines.iter().map(|l| face.ink_height(l) * 1.2).sum();
    let h = total + TOP_BAR_PADDING * 2.0;
    h.clamp(TOP_BAR_MIN, TOP_BAR_MAX) as i32
}

impl StyleTemplate for BannerBars {
    fn id(&self) -> StyleId {
        StyleId::Style3
    }

    fn apply_background(&self, canvas: &mut Canvas, cx: &mut StyleCx) -> PinResult<()> {
        soft_base_treatment(canvas);
        let tbh = top_bar_height(cx);
        canvas.blend_rect(0, 0, CANVAS_WIDTH as i32, tbh, BAR_COLOR);
        canvas.blend_rect(
            0,
            CANVAS_HEIGHT as i32 - BOTTOM_BAR_HEIGHT,
            CANVAS_WIDTH as i32,
            CANVAS_HEIGHT as i32,
            BAR_COLOR,
        );
        Ok(())
    }

    fn place_title(
        &self,
        canvas: &mut Canvas,
        cx: &mut StyleCx,
        title: &FittedText,
    ) -> PinResult<()> {
        let tbh = top_bar_height(cx);
        let centered = ((tbh as f32 - title.total_height) / 2.0).floor() as i32;
        let text_y = centered.max(20);

        let face = cx.resolver.resolve(BANNER_BARS_TITLE_FONTS, title.size);
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

    fn place_branding(&self, _canvas: &mut Canvas, _cx: &mut StyleCx) -> PinResult<()> {
        // Drawn in finalize, on top of the corner clip.
        Ok(())
    }

    fn place_decoration(&self, canvas: &mut Canvas, cx: &mut StyleCx) -> PinResult<()> {
        let bar_top = CANVAS_HEIGHT as i32 - BOTTOM_BAR_HEIGHT;
        let button_y = bar_top - 70 - 30;
        read_more_button(
            canvas,
            cx,
            BANNER_BARS_TITLE_FONTS,
            button_y,
            [220, 220, 220, 240],
            [50, 50, 50, 255],
        )
    }

    fn finalize(&self, canvas: Canvas, cx: &mut StyleCx) -> PinResult<Canvas> {
        let mut out = round_corners(&canvas, self.descriptor().corner_radius)?;

        if let Some(text) = cx.branding().map(str::to_owned) {
            let face = cx.resolver.resolve(BANNER_BARS_TITLE_FONTS, 60);
            let w = face.advance_width(&text);
            let th = face.ink_height(&text);
            let bar_top = CANVAS_HEIGHT as i32 - BOTTOM_BAR_HEIGHT;
            let x = ((CANVAS_WIDTH as f32 - w) / 2.0).floor() as i32;
            let y = bar_top + ((BOTTOM_BAR_HEIGHT as f32 - th) / 2.0).floor() as i32;
            draw_text(&mut out, &face, &text, x + 3, y + 3, [0, 0, 0, 150]);
            draw_text(&mut out, &face, &text, x, y, WHITE);
        }
        Ok(out)
    }
}
