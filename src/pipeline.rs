//! The fixed-order compositing pipeline.
//!
//! Every render walks the same eleven stages: decode and normalize the base
//! photo, enhance, then hand the canvas through the selected template's
//! stages, and finally flatten to RGB and encode a PNG. The pipeline itself
//! is style-agnostic; templates own everything style-specific.

use std::io::Cursor;

use crate::foundation::error::{PinError, PinResult};
use crate::model::{RenderRequest, CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::raster::canvas::Canvas;
use crate::raster::enhance;
use crate::style::{style_for, StyleCx};
use crate::text::font::{FontResolver, FontSpec};
use crate::text::layout::{auto_fit, BASE_TITLE_SIZE, MAX_TITLE_LINES};

/// Render a request to the final (corner-clipped, still RGBA) canvas.
pub fn render_canvas(request: &RenderRequest, resolver: &mut FontResolver) -> PinResult<Canvas> {
    let mut canvas = decode_base_image(&request.base_image)?;

    enhance::contrast(&mut canvas, 1.1);
    enhance::saturation(&mut canvas, 1.15);
    enhance::brightness(&mut canvas, 1.05);

    let style = style_for(request.style);
    let descriptor = style.descriptor();
    let mut cx = StyleCx { resolver, request };

    style.apply_background(&mut canvas, &mut cx)?;

    let max_width = (CANVAS_WIDTH - descriptor.title_max_width_inset) as f32;
    let title = auto_fit(
        cx.resolver,
        FontSpec::new(crate::style::descriptor::MAIN_FONTS, BASE_TITLE_SIZE),
        &request.title,
        max_width,
        MAX_TITLE_LINES,
    );
    tracing::debug!(
        lines = title.lines.len(),
        size = title.size,
        "title fitted"
    );

    style.place_title(&mut canvas, &mut cx, &title)?;
    style.place_branding(&mut canvas, &mut cx)?;
    style.place_decoration(&mut canvas, &mut cx)?;
    style.finalize(canvas, &mut cx)
}

/// Render a request all the way to encoded PNG bytes (1000×1500, RGB).
#[tracing::instrument(skip_all, fields(style = request.style.as_str()))]
pub fn render_png(request: &RenderRequest, resolver: &mut FontResolver) -> PinResult<Vec<u8>> {
    let canvas = render_canvas(request, resolver)?;
    encode_rgb_png(&canvas)
}

/// Decode the base image, force RGB, and resize to the target dimensions.
fn decode_base_image(bytes: &[u8]) -> PinResult<Canvas> {
    let decoded = image::load_from_memory(bytes)
        .map_err(|e| PinError::render(format!("could not decode base image: {e}")))?;
    let rgb = decoded.to_rgb8();
    let rgb = if rgb.dimensions() != (CANVAS_WIDTH, CANVAS_HEIGHT) {
        image::imageops::resize(
            &rgb,
            CANVAS_WIDTH,
            CANVAS_HEIGHT,
            image::imageops::FilterType::Lanczos3,
        )
    } else {
        rgb
    };

    let mut rgba = Vec::with_capacity((CANVAS_WIDTH * CANVAS_HEIGHT * 4) as usize);
    for px in rgb.pixels() {
        rgba.extend_from_slice(&[px.0[0], px.0[1], px.0[2], 255]);
    }
    Canvas::from_rgba8(CANVAS_WIDTH, CANVAS_HEIGHT, rgba)
}

/// Flatten to RGB (dropping alpha: clipped corners become black) and encode.
fn encode_rgb_png(canvas: &Canvas) -> PinResult<Vec<u8>> {
    let rgb = image::RgbImage::from_raw(canvas.width(), canvas.height(), canvas.rgb_bytes())
        .ok_or_else(|| PinError::render("final canvas buffer has unexpected size"))?;
    let mut out = Vec::new();
    image::DynamicImage::ImageRgb8(rgb)
        .write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
        .map_err(|e| PinError::render(format!("png encode failed: {e}")))?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_resizes_to_target() {
        let img = image::RgbImage::from_pixel(64, 64, image::Rgb([120, 90, 60]));
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();

        let canvas = decode_base_image(&buf).unwrap();
        assert_eq!(canvas.width(), CANVAS_WIDTH);
        assert_eq!(canvas.height(), CANVAS_HEIGHT);
        assert_eq!(canvas.get(0, 0)[3], 255);
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(decode_base_image(b"not an image").is_err());
    }

    #[test]
    fn encode_produces_png_magic() {
        let canvas = Canvas::filled(4, 4, [1, 2, 3, 255]);
        let png = encode_rgb_png(&canvas).unwrap();
        assert_eq!(&png[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    }
}
