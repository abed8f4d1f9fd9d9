//! Pigment core crate.
//!
//! A color value with interchangeable gray, RGB, HSB, HSL and gradient
//! representations, plus the small geometry and paint collaborators it needs.
//!
//! ```
//! use pigment_core::color::{Color, Representation};
//!
//! let mut c: Color = "#ff0000".parse().unwrap();
//! assert_eq!(c.hue().unwrap(), 0.0);
//! c.set_lightness(0.25).unwrap();
//! assert_eq!(c.representation(), Representation::Hsl);
//! assert_eq!(c.to_css(false).unwrap(), "rgb(128, 0, 0)");
//! ```

pub mod color;
pub mod coords;
pub mod logging;
pub mod paint;

pub use color::{Color, ColorArg, ColorError, Representation};
