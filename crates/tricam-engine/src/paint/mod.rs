//! Color values shared by configuration and renderers.

mod color;

pub use color::Color;
