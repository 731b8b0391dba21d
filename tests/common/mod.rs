#![allow(dead_code)] // each integration binary uses its own subset

use std::io::Cursor;
use std::path::Path;

use pinforge::FontResolver;

/// Resolver over the fonts bundled with the crate, independent of cwd.
pub fn bundled_resolver() -> FontResolver {
    FontResolver::new(Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/fonts"))
}

/// A solid-color stand-in for the upstream photo, PNG-encoded at the
/// collaborator's native square size.
pub fn base_photo_png(rgb: [u8; 3]) -> Vec<u8> {
    let img = image::RgbImage::from_pixel(1024, 1024, image::Rgb(rgb));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}
