//! Static representation table: every representation and, in order, the
//! components it stores. Accessors, parsing, display and serialization are
//! all driven from here.

use core::fmt;
use core::str::FromStr;

use super::ColorError;

// ── Component kinds ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKind {
    /// Channel value clamped to `[0, 1]`.
    Scalar,
    /// Angle in degrees, wrapped into `[0, 360)`.
    Hue,
    /// Shared gradient reference.
    Gradient,
    /// Required anchor point.
    Point,
    /// Anchor point that may be absent.
    OptionalPoint,
}

impl ComponentKind {
    #[inline]
    pub fn is_numeric(self) -> bool {
        matches!(self, ComponentKind::Scalar | ComponentKind::Hue)
    }

    #[inline]
    pub fn is_point(self) -> bool {
        matches!(self, ComponentKind::Point | ComponentKind::OptionalPoint)
    }

    pub fn expected(self) -> &'static str {
        match self {
            ComponentKind::Scalar | ComponentKind::Hue => "a number",
            ComponentKind::Gradient => "a gradient",
            ComponentKind::Point | ComponentKind::OptionalPoint => "a point",
        }
    }

    /// Normalizes a numeric value for storage.
    ///
    /// Non-finite numbers become 0. Non-numeric kinds pass the value
    /// through unchanged.
    pub fn normalize(self, value: f64) -> f64 {
        if self.is_numeric() && !value.is_finite() {
            return 0.0;
        }
        match self {
            ComponentKind::Scalar => value.clamp(0.0, 1.0),
            ComponentKind::Hue => ((value % 360.0) + 360.0) % 360.0,
            _ => value,
        }
    }
}

// ── Component info ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
pub struct ComponentInfo {
    pub name: &'static str,
    pub kind: ComponentKind,
    pub doc:  &'static str,
}

const GRAY: &[ComponentInfo] = &[
    ComponentInfo { name: "gray", kind: ComponentKind::Scalar, doc: "Gray level, 0 black to 1 white." },
];

const RGB: &[ComponentInfo] = &[
    ComponentInfo { name: "red",   kind: ComponentKind::Scalar, doc: "Red channel." },
    ComponentInfo { name: "green", kind: ComponentKind::Scalar, doc: "Green channel." },
    ComponentInfo { name: "blue",  kind: ComponentKind::Scalar, doc: "Blue channel." },
];

const HSB: &[ComponentInfo] = &[
    ComponentInfo { name: "hue",        kind: ComponentKind::Hue,    doc: "Hue angle in degrees." },
    ComponentInfo { name: "saturation", kind: ComponentKind::Scalar, doc: "HSB saturation." },
    ComponentInfo { name: "brightness", kind: ComponentKind::Scalar, doc: "HSB brightness (value)." },
];

const HSL: &[ComponentInfo] = &[
    ComponentInfo { name: "hue",        kind: ComponentKind::Hue,    doc: "Hue angle in degrees." },
    ComponentInfo { name: "saturation", kind: ComponentKind::Scalar, doc: "HSL saturation." },
    ComponentInfo { name: "lightness",  kind: ComponentKind::Scalar, doc: "HSL lightness." },
];

const GRADIENT: &[ComponentInfo] = &[
    ComponentInfo { name: "gradient",    kind: ComponentKind::Gradient,      doc: "Shared gradient definition." },
    ComponentInfo { name: "origin",      kind: ComponentKind::Point,         doc: "Start point of the gradient." },
    ComponentInfo { name: "destination", kind: ComponentKind::Point,         doc: "End point, or radius point for radial gradients." },
    ComponentInfo { name: "highlight",   kind: ComponentKind::OptionalPoint, doc: "Focal point of a radial gradient." },
];

// ── Representation ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Representation {
    Gray,
    Rgb,
    Hsb,
    Hsl,
    Gradient,
}

impl Representation {
    /// Table order. Later rows win when a component name is shared.
    pub const ALL: [Representation; 5] = [
        Representation::Gray,
        Representation::Rgb,
        Representation::Hsb,
        Representation::Hsl,
        Representation::Gradient,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Representation::Gray => "gray",
            Representation::Rgb => "rgb",
            Representation::Hsb => "hsb",
            Representation::Hsl => "hsl",
            Representation::Gradient => "gradient",
        }
    }

    pub const fn components(self) -> &'static [ComponentInfo] {
        match self {
            Representation::Gray => GRAY,
            Representation::Rgb => RGB,
            Representation::Hsb => HSB,
            Representation::Hsl => HSL,
            Representation::Gradient => GRADIENT,
        }
    }

    /// Number of components a fully populated value stores.
    #[inline]
    pub const fn len(self) -> usize {
        self.components().len()
    }

    /// Number of components that must be present. Only the gradient highlight
    /// is optional.
    #[inline]
    pub const fn required_len(self) -> usize {
        match self {
            Representation::Gradient => 3,
            _ => self.len(),
        }
    }

    #[inline]
    pub fn is_hue_based(self) -> bool {
        matches!(self, Representation::Hsb | Representation::Hsl)
    }

    pub fn index_of(self, name: &str) -> Option<usize> {
        self.components().iter().position(|c| c.name == name)
    }

    /// Looks up a representation by name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.name() == name)
    }

    /// Returns the representation that owns `name` when it is set on a color
    /// of another representation, together with the component info.
    ///
    /// `hue` and `saturation` exist in both `hsb` and `hsl`; the last table row
    /// (`hsl`) owns them. `hilite` is accepted for `highlight`.
    pub fn owner_of(name: &str) -> Option<(Self, usize, ComponentInfo)> {
        let name = canonical_name(name);
        Self::ALL.into_iter().rev().find_map(|repr| {
            repr.index_of(name).map(|i| (repr, i, repr.components()[i]))
        })
    }
}

/// Maps accepted aliases onto table names.
pub(crate) fn canonical_name(name: &str) -> &str {
    match name {
        "hilite" => "highlight",
        other => other,
    }
}

/// Names shared by `hsb` and `hsl` that are read and written without
/// converting between the two.
#[inline]
pub(crate) fn is_overlap_name(name: &str) -> bool {
    matches!(name, "hue" | "saturation")
}

impl fmt::Display for Representation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Representation {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| ColorError::UnknownRepresentation(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_lengths() {
        assert_eq!(Representation::Gray.len(), 1);
        assert_eq!(Representation::Rgb.len(), 3);
        assert_eq!(Representation::Hsb.len(), 3);
        assert_eq!(Representation::Hsl.len(), 3);
        assert_eq!(Representation::Gradient.len(), 4);
        assert_eq!(Representation::Gradient.required_len(), 3);
    }

    #[test]
    fn names_round_trip() {
        for repr in Representation::ALL {
            assert_eq!(repr.name().parse::<Representation>().unwrap(), repr);
        }
        assert!("cmyk".parse::<Representation>().is_err());
    }

    #[test]
    fn shared_names_belong_to_hsl() {
        let (repr, index, _) = Representation::owner_of("hue").unwrap();
        assert_eq!((repr, index), (Representation::Hsl, 0));
        let (repr, _, _) = Representation::owner_of("brightness").unwrap();
        assert_eq!(repr, Representation::Hsb);
    }

    #[test]
    fn hilite_alias() {
        let (repr, index, info) = Representation::owner_of("hilite").unwrap();
        assert_eq!((repr, index, info.name), (Representation::Gradient, 3, "highlight"));
    }

    #[test]
    fn normalize_rules() {
        assert_eq!(ComponentKind::Scalar.normalize(-0.3), 0.0);
        assert_eq!(ComponentKind::Scalar.normalize(1.7), 1.0);
        assert_eq!(ComponentKind::Hue.normalize(-30.0), 330.0);
        assert_eq!(ComponentKind::Hue.normalize(370.0), 10.0);
        assert_eq!(ComponentKind::Hue.normalize(720.0), 0.0);
    }

    #[test]
    fn non_finite_numbers_become_zero() {
        for v in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert_eq!(ComponentKind::Scalar.normalize(v), 0.0);
            assert_eq!(ComponentKind::Hue.normalize(v), 0.0);
        }
    }
}
