//! Template 4: photo on top, fixed dark panel across the lower 450px holding
//! a gold serif title, branding in a centered gold box at the very bottom.

use crate::foundation::error::PinResult;
use crate::model::{StyleId, CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::raster::canvas::Canvas;
use crate::raster::compose::Rgba8;
use crate::style::descriptor::{BLACK, BRIGHT_GOLD, LOWER_PANEL_TITLE_FONTS};
use crate::style::{
    centered_line_x, draw_branding_box, draw_shadowed_line, round_corners, soft_base_treatment,
    BrandingBox, StyleCx, StyleTemplate,
};
use crate::text::layout::FittedText;

pub(crate) struct LowerPanel;

const PANEL_HEIGHT: i32 = 450;
const PANEL_COLOR: Rgba8 = [30, 30, 30, 245];
/// Title sits this far below the panel's top edge.
const PANEL_TOP_PADDING: i32 = 60;

const TITLE_SHADOWS: [((i32, i32), Rgba8); 1] = [((2, 2), [0, 0, 0, 150])];

impl StyleTemplate for LowerPanel {
    fn id(&self) -> StyleId {
        StyleId::Style4
    }

    fn apply_background(&self, canvas: &mut Canvas, _cx: &mut StyleCx) -> PinResult<()> {
        soft_base_treatment(canvas);
        canvas.blend_rect(
            0,
            CANVAS_HEIGHT as i32 - PANEL_HEIGHT,
            CANVAS_WIDTH as i32,
            CANVAS_HEIGHT as i32,
            PANEL_COLOR,
        );
        Ok(())
    }

    fn place_title(
        &self,
        canvas: &mut Canvas,
        cx: &mut StyleCx,
        title: &FittedText,
    ) -> PinResult<()> {
        let text_y = CANVAS_HEIGHT as i32 - PANEL_HEIGHT + PANEL_TOP_PADDING;
        let size = (title.size as f32 * self.descriptor().title_scale) as u32;
        let face = cx.resolver.resolve(LOWER_PANEL_TITLE_FONTS, size);
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
        // Branding is embedded in the gold box drawn after the corner clip.
        Ok(())
    }

    fn place_decoration(&self, _canvas: &mut Canvas, _cx: &mut StyleCx) -> PinResult<()> {
        Ok(())
    }

    fn finalize(&self, canvas: Canvas, cx: &mut StyleCx) -> PinResult<Canvas> {
        let mut out = round_corners(&canvas, self.descriptor().corner_radius)?;
        draw_branding_box(
            &mut out,
            cx,
            &BrandingBox {
                fonts: LOWER_PANEL_TITLE_FONTS,
                size: 40,
                box_color: BRIGHT_GOLD,
                radius: 5,
                bottom_padding: 30,
                text_color: BLACK,
                vertical_adjust: -5,
                center_on_ink: false,
            },
        );
        Ok(out)
    }
}
