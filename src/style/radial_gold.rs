//! Template 2: radial vignette over the photo, outlined gold serif title,
//! bottom branding bar, whole-image drop shadow.

use crate::foundation::error::PinResult;
use crate::model::{StyleId, CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::raster::blur::blur_canvas;
use crate::raster::canvas::Canvas;
use crate::raster::compose::Rgba8;
use crate::raster::enhance;
use crate::style::descriptor::{LIGHT_GOLD, RADIAL_GOLD_BRANDING_FONTS, RADIAL_GOLD_TITLE_FONTS};
use crate::style::{
    bottom_branding_bar, centered_line_x, draw_shadowed_line, read_more_button, round_corners,
    soft_base_treatment, top_aligned_title_y, StyleCx, StyleTemplate,
};
use crate::text::layout::FittedText;

pub(crate) struct RadialGold;

const TITLE_SHADOWS: [((i32, i32), Rgba8); 3] = [
    ((5, 5), [0, 0, 0, 120]),
    ((4, 4), [0, 0, 0, 130]),
    ((3, 3), [0, 0, 0, 150]),
];
const TITLE_STROKE: Rgba8 = [0, 0, 0, 255];

const DROP_SHADOW_OPACITY: u8 = 180;
const DROP_SHADOW_BLUR_RADIUS: u32 = 15;
const DROP_SHADOW_OFFSET: i32 = 10;

impl StyleTemplate for RadialGold {
    fn id(&self) -> StyleId {
        StyleId::Style2
    }

    fn apply_background(&self, canvas: &mut Canvas, _cx: &mut StyleCx) -> PinResult<()> {
        soft_base_treatment(canvas);
        enhance::radial_darken(canvas);
        Ok(())
    }

    fn place_title(
        &self,
        canvas: &mut Canvas,
        cx: &mut StyleCx,
        title: &FittedText,
    ) -> PinResult<()> {
        let text_y = top_aligned_title_y(title.total_height);
        let face = cx.resolver.resolve(RADIAL_GOLD_TITLE_FONTS, title.size);
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
                Some(TITLE_STROKE),
                self.descriptor().title_color,
            );
            current_y += title.line_advance(i);
        }
        Ok(())
    }

    fn place_branding(&self, canvas: &mut Canvas, cx: &mut StyleCx) -> PinResult<()> {
        bottom_branding_bar(canvas, cx, RADIAL_GOLD_BRANDING_FONTS, 38, LIGHT_GOLD);
        Ok(())
    }

    fn place_decoration(&self, canvas: &mut Canvas, cx: &mut StyleCx) -> PinResult<()> {
        let button_y = (CANVAS_HEIGHT as f32 * 0.85) as i32;
        read_more_button(
            canvas,
            cx,
            RADIAL_GOLD_BRANDING_FONTS,
            button_y,
            [230, 220, 180, 240],
            [90, 80, 50, 255],
        )
    }

    fn finalize(&self, canvas: Canvas, _cx: &mut StyleCx) -> PinResult<Canvas> {
        // Blurred dark copy offset behind the image, then the corner clip.
        let mut shadow = canvas.clone();
        shadow.blend_rect(
            0,
            0,
            CANVAS_WIDTH as i32,
            CANVAS_HEIGHT as i32,
            [0, 0, 0, DROP_SHADOW_OPACITY],
        );
        let shadow = blur_canvas(
            &shadow,
            DROP_SHADOW_BLUR_RADIUS,
            DROP_SHADOW_BLUR_RADIUS as f32 / 2.0,
        )?;

        let mut composite = Canvas::new(
            CANVAS_WIDTH + 2 * DROP_SHADOW_OFFSET as u32,
            CANVAS_HEIGHT + 2 * DROP_SHADOW_OFFSET as u32,
        );
        composite.paste(&shadow, DROP_SHADOW_OFFSET, DROP_SHADOW_OFFSET);
        composite.paste(&canvas, 0, 0);
        let cropped = composite.crop(0, 0, CANVAS_WIDTH, CANVAS_HEIGHT)?;

        round_corners(&cropped, self.descriptor().corner_radius)
    }
}
