//! Wrap and auto-fit behavior against the real bundled fonts.

mod common;

use common::bundled_resolver;
use pinforge::text::layout::{auto_fit, wrap, BASE_TITLE_SIZE, MIN_TITLE_SIZE};
use pinforge::{FontSpec, Typeface};

const FONTS: &[&str] = &["DejaVuSans-Bold.ttf"];

#[test]
fn wrapped_lines_respect_max_width_except_single_words() {
    let mut resolver = bundled_resolver();
    let face = resolver.resolve(FONTS, 48);
    let text = "The quick brown fox jumps over the lazy dog while the \
                photographer waits patiently for golden hour light";
    let max_width = 400.0;
    let lines = wrap(text, &face, max_width);
    assert!(lines.len() > 1);
    for line in &lines {
        let fits = face.advance_width(line) <= max_width;
        assert!(
            fits || !line.contains(' '),
            "line {line:?} exceeds the wrap width"
        );
    }
}

#[test]
fn oversized_single_word_overflows_alone() {
    let mut resolver = bundled_resolver();
    let face = resolver.resolve(FONTS, 60);
    let lines = wrap("tiny pneumonoultramicroscopicsilicovolcanoconiosis end", &face, 200.0);
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[1], "pneumonoultramicroscopicsilicovolcanoconiosis");
    assert!(face.advance_width(&lines[1]) > 200.0);
}

#[test]
fn twenty_word_title_fits_within_six_lines() {
    let mut resolver = bundled_resolver();
    let title = "one two three four five six seven eight nine ten \
                 eleven twelve thirteen fourteen fifteen sixteen \
                 seventeen eighteen nineteen twenty";
    let fitted = auto_fit(
        &mut resolver,
        FontSpec::new(FONTS, BASE_TITLE_SIZE),
        title,
        880.0,
        6,
    );
    assert!(fitted.lines.len() <= 6, "got {} lines", fitted.lines.len());
    assert!(fitted.size <= BASE_TITLE_SIZE);
    assert!(fitted.size >= MIN_TITLE_SIZE);
    // The schedule only ever steps in 5px decrements from the base size.
    assert_eq!((BASE_TITLE_SIZE - fitted.size) % 5, 0);
}

#[test]
fn auto_fit_never_goes_below_the_floor() {
    let mut resolver = bundled_resolver();
    // A wall of long words that cannot fit six lines at any size.
    let title = "incomprehensibilities ".repeat(40);
    let fitted = auto_fit(
        &mut resolver,
        FontSpec::new(FONTS, BASE_TITLE_SIZE),
        &title,
        880.0,
        6,
    );
    assert_eq!(fitted.size, MIN_TITLE_SIZE);
}

#[test]
fn short_title_keeps_the_base_size() {
    let mut resolver = bundled_resolver();
    let fitted = auto_fit(
        &mut resolver,
        FontSpec::new(FONTS, BASE_TITLE_SIZE),
        "Hello",
        880.0,
        6,
    );
    assert_eq!(fitted.size, BASE_TITLE_SIZE);
    assert_eq!(fitted.lines.len(), 1);
    assert!(fitted.total_height > 0.0);
}

#[test]
fn metrics_are_measured_at_the_final_size() {
    let mut resolver = bundled_resolver();
    let title = "a reasonably long headline that wraps a few times over";
    let fitted = auto_fit(
        &mut resolver,
        FontSpec::new(FONTS, BASE_TITLE_SIZE),
        title,
        400.0,
        6,
    );
    assert_eq!(fitted.line_heights.len(), fitted.lines.len());
    for (line, h) in fitted.lines.iter().zip(&fitted.line_heights) {
        assert!(*h > 0.0);
        assert!(fitted.font.advance_width(line) > 0.0);
    }
}
