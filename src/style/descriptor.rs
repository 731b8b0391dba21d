//! Static per-style configuration tables.
//!
//! One read-only row per template. Every font preference list ends in a
//! DejaVu face bundled under `assets/fonts/`, so a clean checkout resolves
//! deterministically without system fonts.

use crate::model::StyleId;
use crate::raster::compose::Rgba8;

pub const GOLD: Rgba8 = [215, 189, 69, 255];
pub const BRIGHT_GOLD: Rgba8 = [230, 190, 60, 255];
pub const LIGHT_GOLD: Rgba8 = [255, 240, 180, 255];
pub const WHITE: Rgba8 = [255, 255, 255, 255];
pub const BLACK: Rgba8 = [0, 0, 0, 255];

/// Title fitting font chain shared by the auto-fit pass.
pub const MAIN_FONTS: &[&str] = &[
    "PoetsenOne-Regular.ttf",
    "LeagueSpartan-Bold.ttf",
    "Montserrat-Bold.ttf",
    "Lato-Bold.ttf",
    "OpenSans-Bold.ttf",
    "Poppins-Bold.ttf",
    "arialbd.ttf",
    "Arial-Bold.ttf",
    "DejaVuSans-Bold.ttf",
];

/// Light text chain for generic branding lines.
pub const BRANDING_FONTS: &[&str] = &[
    "DejaVuSans-Light.ttf",
    "Calibril.ttf",
    "seguisli.ttf",
    "LeagueSpartan-Light.ttf",
    "Montserrat-Light.ttf",
    "Lato-Light.ttf",
    "OpenSans-Light.ttf",
    "Poppins-Light.ttf",
    "arial.ttf",
    "DejaVuSans-ExtraLight.ttf",
];

pub const OVERLAY_CARD_TITLE_FONTS: &[&str] = &[
    "LeagueSpartan-Bold.ttf",
    "Montserrat-Bold.ttf",
    "DejaVuSans-Bold.ttf",
];

pub const RADIAL_GOLD_TITLE_FONTS: &[&str] = &["EBGaramond-Bold.ttf", "DejaVuSerif-Bold.ttf"];

pub const RADIAL_GOLD_BRANDING_FONTS: &[&str] = &[
    "EBGaramond-Bold.ttf",
    "LeagueSpartan-Bold.ttf",
    "Montserrat-Bold.ttf",
    "DejaVuSerif-Bold.ttf",
];

pub const BANNER_BARS_TITLE_FONTS: &[&str] = &[
    "Nunito-ExtraBold.ttf",
    "Montserrat-ExtraBold.ttf",
    "OpenSans-ExtraBold.ttf",
    "Lato-Bold.ttf",
    "Poppins-Bold.ttf",
    "DejaVuSans-Bold.ttf",
];

pub const LOWER_PANEL_TITLE_FONTS: &[&str] = &[
    "Vidaloka-Regular.ttf",
    "PlayfairDisplay-Bold.ttf",
    "Merriweather-Bold.ttf",
    "DejaVuSerif-Bold.ttf",
];

pub const CURVE_SWEEP_TITLE_FONTS: &[&str] = &[
    "LeagueSpartan-Bold.ttf",
    "Montserrat-Bold.ttf",
    "OpenSans-Bold.ttf",
    "Lato-Bold.ttf",
    "Arial-Bold.ttf",
    "arialbd.ttf",
    "DejaVuSans-Bold.ttf",
];

/// The numbers that vary uniformly across templates. Behavior that differs in
/// shape (bars, boxes, curves) lives in each template implementation.
pub struct StyleDescriptor {
    pub title_fonts: &'static [&'static str],
    /// Multiplier applied to the fitted size when drawing the title.
    pub title_scale: f32,
    /// Subtracted from the canvas width to get the wrap width.
    pub title_max_width_inset: u32,
    /// Minimum distance from either vertical edge for title lines.
    pub title_margin: i32,
    pub title_color: Rgba8,
    /// Radius of the final corner clip.
    pub corner_radius: u32,
}

static OVERLAY_CARD: StyleDescriptor = StyleDescriptor {
    title_fonts: OVERLAY_CARD_TITLE_FONTS,
    title_scale: 1.05,
    title_max_width_inset: 120,
    title_margin: 40,
    title_color: GOLD,
    corner_radius: 60,
};

static RADIAL_GOLD: StyleDescriptor = StyleDescriptor {
    title_fonts: RADIAL_GOLD_TITLE_FONTS,
    title_scale: 1.0,
    title_max_width_inset: 160,
    title_margin: 40,
    title_color: GOLD,
    corner_radius: 40,
};

static BANNER_BARS: StyleDescriptor = StyleDescriptor {
    title_fonts: BANNER_BARS_TITLE_FONTS,
    title_scale: 1.0,
    title_max_width_inset: 120,
    title_margin: 50,
    title_color: WHITE,
    corner_radius: 60,
};

static LOWER_PANEL: StyleDescriptor = StyleDescriptor {
    title_fonts: LOWER_PANEL_TITLE_FONTS,
    title_scale: 1.1,
    title_max_width_inset: 120,
    title_margin: 40,
    title_color: GOLD,
    corner_radius: 30,
};

static CURVE_SWEEP: StyleDescriptor = StyleDescriptor {
    title_fonts: CURVE_SWEEP_TITLE_FONTS,
    title_scale: 1.2,
    title_max_width_inset: 120,
    title_margin: 40,
    title_color: WHITE,
    corner_radius: 40,
};

pub fn descriptor(id: StyleId) -> &'static StyleDescriptor {
    match id {
        StyleId::Style1 => &OVERLAY_CARD,
        StyleId::Style2 => &RADIAL_GOLD,
        StyleId::Style3 => &BANNER_BARS,
        StyleId::Style4 => &LOWER_PANEL,
        StyleId::Style5 => &CURVE_SWEEP,
    }
}
