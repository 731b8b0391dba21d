pub mod blur;
pub mod canvas;
pub mod compose;
pub mod enhance;
pub mod mask_gen;
