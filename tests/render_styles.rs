//! End-to-end renders of every template: output contract, determinism, and
//! the visible presence/absence of per-style furniture.

mod common;

use common::{base_photo_png, bundled_resolver};
use pinforge::{render_png, RenderRequest, StyleId, CANVAS_HEIGHT, CANVAS_WIDTH};

fn render(style: StyleId, title: &str, branding: &str) -> Vec<u8> {
    let mut resolver = bundled_resolver();
    let request = RenderRequest::new(base_photo_png([210, 180, 150]), title, style)
        .with_branding(branding);
    render_png(&request, &mut resolver).unwrap()
}

fn decode(png: &[u8]) -> image::RgbImage {
    let img = image::load_from_memory(png).unwrap();
    assert!(matches!(img, image::DynamicImage::ImageRgb8(_)), "output must be RGB");
    img.to_rgb8()
}

#[test]
fn every_style_produces_the_output_contract() {
    for style in StyleId::ALL {
        let png = render(style, "Test Image", "example.com");
        let img = decode(&png);
        assert_eq!(img.dimensions(), (CANVAS_WIDTH, CANVAS_HEIGHT), "{style:?}");
        // Rounded corners flatten to black in the RGB output.
        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0], "{style:?} corner");
        assert_eq!(
            img.get_pixel(CANVAS_WIDTH - 1, CANVAS_HEIGHT - 1).0,
            [0, 0, 0],
            "{style:?} corner"
        );
        // Interior keeps image content.
        assert_ne!(img.get_pixel(500, 400).0, [0, 0, 0], "{style:?} interior");
    }
}

#[test]
fn rendering_twice_is_byte_identical() {
    for style in [StyleId::Style1, StyleId::Style5] {
        let a = render(style, "Determinism check", "example.com");
        let b = render(style, "Determinism check", "example.com");
        assert_eq!(a, b, "{style:?} output varies between runs");
    }
}

#[test]
fn empty_branding_skips_the_bottom_bar() {
    let with = decode(&render(StyleId::Style1, "Test Image", "example.com"));
    let without = decode(&render(StyleId::Style1, "Test Image", ""));

    // Inside the 60px bar region, clear of the centered branding glyphs:
    // dark when branded, photo-bright otherwise.
    let branded = with.get_pixel(150, 1465).0;
    let plain = without.get_pixel(150, 1465).0;
    assert!(branded[0] < 90, "branding bar missing: {branded:?}");
    assert!(plain[0] > 120, "unexpected bar without branding: {plain:?}");
}

#[test]
fn long_titles_still_render_within_bounds() {
    let title = "one two three four five six seven eight nine ten eleven twelve \
                 thirteen fourteen fifteen sixteen seventeen eighteen nineteen twenty";
    let png = render(StyleId::Style1, title, "");
    let img = decode(&png);
    assert_eq!(img.dimensions(), (CANVAS_WIDTH, CANVAS_HEIGHT));
}

#[test]
fn banner_bars_cover_top_and_bottom() {
    let img = decode(&render(StyleId::Style3, "Banner title", "example.com"));
    // Top bar over the bright photo reads near-black.
    let top = img.get_pixel(60, 10).0;
    assert!(top[0] < 70 && top[1] < 70, "top bar missing: {top:?}");
    // Bottom bar likewise, probed clear of the centered branding text.
    let bottom = img.get_pixel(100, 1420).0;
    assert!(bottom[0] < 90, "bottom bar missing: {bottom:?}");
}

#[test]
fn lower_panel_darkens_the_lower_region_only() {
    let img = decode(&render(StyleId::Style4, "Panel title", ""));
    let upper = img.get_pixel(500, 300).0;
    let panel = img.get_pixel(500, 1070).0;
    assert!(upper[0] > 120, "photo region too dark: {upper:?}");
    assert!(panel[0] < 60, "panel missing: {panel:?}");
}

#[test]
fn lower_panel_branding_box_is_gold() {
    let img = decode(&render(StyleId::Style4, "Panel title", "example.com"));
    // Scan the bottom band for the gold box fill.
    let mut found = false;
    for y in 1420..1470 {
        for x in 300..700 {
            let p = img.get_pixel(x, y).0;
            if p[0] > 200 && p[1] > 150 && p[2] < 120 {
                found = true;
            }
        }
    }
    assert!(found, "no gold branding box in the bottom band");
}

#[test]
fn curve_sweep_is_dark_below_and_photo_above() {
    let img = decode(&render(StyleId::Style5, "Sweep title", ""));
    let top = img.get_pixel(500, 60).0;
    assert!(top[0] > 120, "photo region too dark: {top:?}");
    let bottom = img.get_pixel(500, 1450).0;
    assert_eq!(bottom, [30, 30, 35], "dark sweep not opaque at bottom");
}

#[test]
fn curve_sweep_branding_box_is_white() {
    let img = decode(&render(StyleId::Style5, "Sweep title", "example.com"));
    let mut found = false;
    for y in 1400..1470 {
        for x in 300..700 {
            let p = img.get_pixel(x, y).0;
            if p[0] > 240 && p[1] > 240 && p[2] > 240 {
                found = true;
            }
        }
    }
    assert!(found, "no white branding box in the bottom band");
}

#[test]
fn radial_style_vignettes_the_edges() {
    let img = decode(&render(StyleId::Style2, "Vignette", ""));
    let center = img.get_pixel(500, 750).0;
    let edge = img.get_pixel(500, 1490).0;
    assert!(
        u32::from(edge[0]) < u32::from(center[0]),
        "edge {edge:?} not darker than center {center:?}"
    );
}
