//! The polymorphic color value.
//!
//! Scope:
//! - the representation table and the conversion engine
//! - named component access with in-place conversion on write
//! - argument and CSS string parsing
//! - derived output (CSS, paint styles, display, serialized form)
//!
//! Colors are single-threaded: caches and owner links live behind `Rc` and
//! `RefCell`. The named color cache is the only process-wide state.

mod access;
mod component;
pub mod convert;
mod css;
mod error;
mod format;
mod names;
mod ops;
mod output;
mod owner;
mod parse;
mod repr;
mod value;

pub use component::Component;
pub use error::ColorError;
pub use format::NumberFormat;
pub use names::NamedColorCache;
pub use output::SerializedValue;
pub use owner::StyleOwner;
pub use parse::{parse, ColorArg, ColorProps, ParsedColor, PropValue};
pub use repr::{ComponentInfo, ComponentKind, Representation};
pub use value::{Color, GradientId};

pub(crate) use value::ColorLink;
