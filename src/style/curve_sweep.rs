//! Template 5: photo shifted up behind a parabolic dark sweep, bold white
//! title inside the dark band, branding in a white box near the bottom.

use crate::foundation::error::PinResult;
use crate::model::{StyleId, CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::raster::canvas::Canvas;
use crate::raster::compose::Rgba8;
use crate::raster::mask_gen;
use crate::style::descriptor::{BLACK, CURVE_SWEEP_TITLE_FONTS};
use crate::style::{
    centered_line_x, draw_branding_box, draw_shadowed_line, round_corners, soft_base_treatment,
    BrandingBox, StyleCx, StyleTemplate,
};
use crate::text::layout::FittedText;

pub(crate) struct CurveSweep;

const DARK_SECTION_HEIGHT: u32 = 1300;
const PEAK_HEIGHT_RATIO: f32 = 0.6;
const STEEPNESS_FACTOR: f32 = 0.3;
const DARK_COLOR: Rgba8 = [30, 30, 35, 255];
/// The photo shifts up by this much so its lower part hides behind the sweep.
const PHOTO_OFFSET_Y: i32 = -150;

// Title-band constants; the placement clamps below are tuned against these
// exact values, independent of the sweep mask height.
const BAND_VISIBLE_HEIGHT: f32 = 450.0;
const BAND_CURVE_OFFSET: f32 = 40.0;
const BAND_BOTTOM_RESERVE: f32 = 120.0;

const TITLE_SHADOWS: [((i32, i32), Rgba8); 1] = [((3, 3), [0, 0, 0, 130])];

impl StyleTemplate for CurveSweep {
    fn id(&self) -> StyleId {
        StyleId::Style5
    }

    fn apply_background(&self, canvas: &mut Canvas, _cx: &mut StyleCx) -> PinResult<()> {
        soft_base_treatment(canvas);

        let mut composed = Canvas::new(CANVAS_WIDTH, CANVAS_HEIGHT);
        composed.paste(canvas, 0, PHOTO_OFFSET_Y);

        let mask = mask_gen::parabola(
            CANVAS_WIDTH,
            CANVAS_HEIGHT,
            DARK_SECTION_HEIGHT,
            PEAK_HEIGHT_RATIO,
            STEEPNESS_FACTOR,
        );
        let overlay = Canvas::filled(CANVAS_WIDTH, CANVAS_HEIGHT, DARK_COLOR).clipped_by(&mask)?;
        composed.blend_over(&overlay)?;

        *canvas = composed;
        Ok(())
    }

    fn place_title(
        &self,
        canvas: &mut Canvas,
        cx: &mut StyleCx,
        title: &FittedText,
    ) -> PinResult<()> {
        let h = CANVAS_HEIGHT as f32;
        let mut text_y = h - BAND_VISIBLE_HEIGHT
            + ((BAND_VISIBLE_HEIGHT - title.total_height) / 2.0).floor()
            + BAND_CURVE_OFFSET;
        if text_y + title.total_height > h - BAND_BOTTOM_RESERVE {
            text_y = h - BAND_BOTTOM_RESERVE - title.total_height;
        }

        let size = (title.size as f32 * self.descriptor().title_scale) as u32;
        let face = cx.resolver.resolve(CURVE_SWEEP_TITLE_FONTS, size);
        let mut current_y = text_y;
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
        // Branding is embedded in the white box drawn after the corner clip.
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
                fonts: CURVE_SWEEP_TITLE_FONTS,
                size: 40,
                box_color: [255, 255, 255, 245],
                radius: 8,
                bottom_padding: 40,
                text_color: BLACK,
                vertical_adjust: 8,
                center_on_ink: true,
            },
        );
        Ok(out)
    }
}
