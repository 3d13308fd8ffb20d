pub mod app;
pub mod braille;
pub mod globe;
pub mod hash;
pub mod starfield;
pub mod surface;
pub mod ui;
