//! Argument parsing for color construction.
//!
//! [`parse`] turns a heterogeneous argument list into a representation, its
//! components and an optional alpha. Recognized shapes, in priority order:
//!
//! 1. a leading representation name (`"hsb"`, ...) used as a type hint
//! 2. numbers (flat or as one list): `rgb` for three or more, `gray` otherwise;
//!    one value past the component count is alpha
//! 3. a single string: hex, `rgb()`/`hsl()` or a named color
//! 4. a single object: a color (copied), a gradient followed by anchors, or a
//!    property bag whose keys select the representation

use core::str::FromStr;
use std::collections::HashMap;
use std::rc::Rc;

use crate::coords::Point;
use crate::paint::{DrawingSurface, Gradient, SoftwareSurface};

use super::access::normalize_component;
use super::css::parse_css_color;
use super::{Color, ColorError, Component, ComponentKind, Representation};

// ── Arguments ─────────────────────────────────────────────────────────────

/// One constructor argument.
#[derive(Debug, Clone)]
pub enum ColorArg {
    Number(f64),
    Numbers(Vec<f64>),
    Str(String),
    Color(Color),
    Gradient(Rc<Gradient>),
    Point(Point),
    Props(ColorProps),
}

impl From<f64> for ColorArg {
    fn from(v: f64) -> Self {
        ColorArg::Number(v)
    }
}

impl From<Vec<f64>> for ColorArg {
    fn from(v: Vec<f64>) -> Self {
        ColorArg::Numbers(v)
    }
}

impl<const N: usize> From<[f64; N]> for ColorArg {
    fn from(v: [f64; N]) -> Self {
        ColorArg::Numbers(v.to_vec())
    }
}

impl From<&str> for ColorArg {
    fn from(s: &str) -> Self {
        ColorArg::Str(s.to_string())
    }
}

impl From<String> for ColorArg {
    fn from(s: String) -> Self {
        ColorArg::Str(s)
    }
}

impl From<Color> for ColorArg {
    fn from(c: Color) -> Self {
        ColorArg::Color(c)
    }
}

impl From<&Color> for ColorArg {
    fn from(c: &Color) -> Self {
        ColorArg::Color(c.clone())
    }
}

impl From<Rc<Gradient>> for ColorArg {
    fn from(g: Rc<Gradient>) -> Self {
        ColorArg::Gradient(g)
    }
}

impl From<Point> for ColorArg {
    fn from(p: Point) -> Self {
        ColorArg::Point(p)
    }
}

impl From<(f64, f64)> for ColorArg {
    fn from(p: (f64, f64)) -> Self {
        ColorArg::Point(p.into())
    }
}

impl From<ColorProps> for ColorArg {
    fn from(p: ColorProps) -> Self {
        ColorArg::Props(p)
    }
}

// ── Property bags ─────────────────────────────────────────────────────────

/// Value in a [`ColorProps`] bag.
#[derive(Debug, Clone)]
pub enum PropValue {
    Number(f64),
    Point(Point),
    Gradient(Rc<Gradient>),
}

impl From<f64> for PropValue {
    fn from(v: f64) -> Self {
        PropValue::Number(v)
    }
}

impl From<Point> for PropValue {
    fn from(p: Point) -> Self {
        PropValue::Point(p)
    }
}

impl From<(f64, f64)> for PropValue {
    fn from(p: (f64, f64)) -> Self {
        PropValue::Point(p.into())
    }
}

impl From<Rc<Gradient>> for PropValue {
    fn from(g: Rc<Gradient>) -> Self {
        PropValue::Gradient(g)
    }
}

impl From<PropValue> for Component {
    fn from(v: PropValue) -> Self {
        match v {
            PropValue::Number(n) => Component::Number(n),
            PropValue::Point(p) => Component::Point(p),
            PropValue::Gradient(g) => Component::Gradient(g),
        }
    }
}

/// Named component values, e.g. `{ hue: 120, saturation: 0.5, brightness: 0.5 }`.
///
/// The keys present decide the representation: `lightness` → hsl, `hue` →
/// hsb, `gradient` → gradient, `gray` → gray, anything else → rgb.
#[derive(Debug, Clone, Default)]
pub struct ColorProps {
    values: HashMap<String, PropValue>,
}

impl ColorProps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<PropValue>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&PropValue> {
        self.values.get(name)
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    fn infer_representation(&self) -> Representation {
        if self.contains("lightness") {
            Representation::Hsl
        } else if self.contains("hue") {
            Representation::Hsb
        } else if self.contains("gradient") {
            Representation::Gradient
        } else if self.contains("gray") {
            Representation::Gray
        } else {
            Representation::Rgb
        }
    }
}

// ── Parsing ───────────────────────────────────────────────────────────────

/// Normalized result of [`parse`].
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedColor {
    pub repr: Representation,
    pub components: Vec<Component>,
    pub alpha: Option<f64>,
}

/// Parses constructor arguments.
///
/// Malformed strings and out-of-range numbers never fail (see
/// [`ColorError`]); only argument lists that cannot describe a color at all
/// return [`ColorError::InvalidArguments`] or [`ColorError::InvalidComponent`].
pub fn parse(args: &[ColorArg], surface: &dyn DrawingSurface) -> Result<ParsedColor, ColorError> {
    let (hint, rest) = match args.split_first() {
        Some((ColorArg::Str(name), rest)) => match Representation::from_name(name) {
            Some(repr) => (Some(repr), rest),
            None => (None, args),
        },
        _ => (None, args),
    };

    if let Some((values, alpha)) = numeric_values(rest) {
        return from_numbers(hint, &values, alpha);
    }

    match rest {
        [] => from_numbers(Some(hint.unwrap_or(Representation::Rgb)), &[], None),
        [ColorArg::Str(s)] => {
            let (rgb, alpha) = parse_css_color(s, surface);
            let parsed = ParsedColor {
                repr: Representation::Rgb,
                components: rgb.into_iter().map(Component::Number).collect(),
                alpha,
            };
            apply_hint(parsed, hint)
        }
        [ColorArg::Color(c)] => apply_hint(
            ParsedColor {
                repr: c.repr,
                components: c.components.clone(),
                alpha: c.alpha,
            },
            hint,
        ),
        [ColorArg::Gradient(g), anchors @ ..] => {
            if hint.is_some_and(|h| h != Representation::Gradient) {
                return Err(ColorError::InvalidArguments(
                    "a gradient can only form a gradient color".to_string(),
                ));
            }
            from_gradient(g, anchors)
        }
        [ColorArg::Props(props)] => from_props(hint, props),
        _ => Err(ColorError::InvalidArguments(format!(
            "unsupported argument list of {} values",
            rest.len()
        ))),
    }
}

/// Numbers given flat (`1, 0, 0`) or as one list (`[1, 0, 0]`, optionally
/// followed by alpha).
fn numeric_values(args: &[ColorArg]) -> Option<(Vec<f64>, Option<f64>)> {
    match args {
        [] => None,
        [ColorArg::Numbers(values)] => Some((values.clone(), None)),
        [ColorArg::Numbers(values), ColorArg::Number(alpha)] => Some((values.clone(), Some(*alpha))),
        _ => args
            .iter()
            .map(|a| match *a {
                ColorArg::Number(v) => Some(v),
                _ => None,
            })
            .collect::<Option<Vec<f64>>>()
            .map(|values| (values, None)),
    }
}

fn from_numbers(
    hint: Option<Representation>,
    values: &[f64],
    alpha: Option<f64>,
) -> Result<ParsedColor, ColorError> {
    let repr = hint.unwrap_or(if values.len() >= 3 {
        Representation::Rgb
    } else {
        Representation::Gray
    });
    if repr == Representation::Gradient {
        return Err(ColorError::InvalidArguments(
            "gradient colors need a gradient reference".to_string(),
        ));
    }
    let components = repr
        .components()
        .iter()
        .enumerate()
        .map(|(i, info)| Component::Number(info.kind.normalize(values.get(i).copied().unwrap_or(0.0))))
        .collect();
    let alpha = alpha.or_else(|| values.get(repr.len()).copied());
    Ok(ParsedColor { repr, components, alpha: alpha.map(|a| ComponentKind::Scalar.normalize(a)) })
}

fn apply_hint(parsed: ParsedColor, hint: Option<Representation>) -> Result<ParsedColor, ColorError> {
    match hint {
        Some(repr) if repr != parsed.repr => {
            let color = Color::create(parsed.repr, parsed.components, parsed.alpha);
            let components = color.convert_components(repr)?;
            Ok(ParsedColor { repr, components, alpha: color.alpha })
        }
        _ => Ok(parsed),
    }
}

fn anchor(arg: &ColorArg) -> Result<Point, ColorError> {
    match arg {
        ColorArg::Point(p) => Ok(*p),
        ColorArg::Numbers(v) if v.len() == 2 => Ok(Point::new(v[0], v[1])),
        _ => Err(ColorError::InvalidComponent { name: "origin", expected: "a point" }),
    }
}

fn from_gradient(gradient: &Rc<Gradient>, anchors: &[ColorArg]) -> Result<ParsedColor, ColorError> {
    if anchors.len() > 3 {
        return Err(ColorError::InvalidArguments(
            "a gradient color takes at most three anchors".to_string(),
        ));
    }
    let mut components = vec![Component::Gradient(Rc::clone(gradient))];
    for i in 0..2 {
        let point = anchors.get(i).map(anchor).transpose()?.unwrap_or_default();
        components.push(Component::Point(point));
    }
    if let Some(highlight) = anchors.get(2) {
        components.push(Component::Point(anchor(highlight)?));
    }
    Ok(ParsedColor { repr: Representation::Gradient, components, alpha: None })
}

fn from_props(hint: Option<Representation>, props: &ColorProps) -> Result<ParsedColor, ColorError> {
    let repr = hint.unwrap_or_else(|| props.infer_representation());
    let mut components = Vec::with_capacity(repr.len());
    for info in repr.components() {
        let value = props
            .get(info.name)
            .or_else(|| (info.name == "highlight").then(|| props.get("hilite")).flatten())
            .cloned();
        let component = match (info.kind, value) {
            (_, Some(value)) => normalize_component(*info, value.into())?,
            (ComponentKind::Scalar | ComponentKind::Hue, None) => Component::Number(0.0),
            (ComponentKind::Point, None) => Component::Point(Point::zero()),
            (ComponentKind::OptionalPoint, None) => break,
            (ComponentKind::Gradient, None) => {
                return Err(ColorError::InvalidArguments(
                    "gradient colors need a gradient reference".to_string(),
                ));
            }
        };
        components.push(component);
    }
    let alpha = match props.get("alpha") {
        Some(PropValue::Number(a)) => Some(ComponentKind::Scalar.normalize(*a)),
        Some(_) => {
            return Err(ColorError::InvalidComponent { name: "alpha", expected: "a number" });
        }
        None => None,
    };
    Ok(ParsedColor { repr, components, alpha })
}

// ── Constructors ──────────────────────────────────────────────────────────

impl Color {
    /// Builds a color from a parse result.
    ///
    /// The component count must fit the representation (only the gradient
    /// highlight may be missing) and every value must fit its slot. Numbers
    /// and alpha are normalized like any stored value.
    pub fn from_parsed(parsed: ParsedColor) -> Result<Self, ColorError> {
        let ParsedColor { repr, components, alpha } = parsed;
        if !(repr.required_len()..=repr.len()).contains(&components.len()) {
            return Err(ColorError::InvalidArguments(format!(
                "{repr} colors take {} components, got {}",
                repr.required_len(),
                components.len()
            )));
        }
        let components = repr
            .components()
            .iter()
            .zip(components)
            .map(|(info, value)| normalize_component(*info, value))
            .collect::<Result<Vec<_>, _>>()?;
        let alpha = alpha.map(|a| ComponentKind::Scalar.normalize(a));
        Ok(Color::create(repr, components, alpha))
    }

    /// Parses `args`, resolving color names with `surface`.
    pub fn from_args_with(args: &[ColorArg], surface: &dyn DrawingSurface) -> Result<Self, ColorError> {
        parse(args, surface).and_then(Self::from_parsed)
    }

    /// Parses `args`, resolving color names with the CSS keyword table.
    pub fn from_args(args: &[ColorArg]) -> Result<Self, ColorError> {
        Self::from_args_with(args, &SoftwareSurface)
    }

    fn scalar(repr: Representation, values: &[f64], alpha: Option<f64>) -> Self {
        let components = repr
            .components()
            .iter()
            .zip(values)
            .map(|(info, &v)| Component::Number(info.kind.normalize(v)))
            .collect();
        Color::create(repr, components, alpha.map(|a| ComponentKind::Scalar.normalize(a)))
    }

    pub fn gray(gray: f64) -> Self {
        Self::scalar(Representation::Gray, &[gray], None)
    }

    pub fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::scalar(Representation::Rgb, &[red, green, blue], None)
    }

    pub fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self::scalar(Representation::Rgb, &[red, green, blue], Some(alpha))
    }

    pub fn hsb(hue: f64, saturation: f64, brightness: f64) -> Self {
        Self::scalar(Representation::Hsb, &[hue, saturation, brightness], None)
    }

    pub fn hsl(hue: f64, saturation: f64, lightness: f64) -> Self {
        Self::scalar(Representation::Hsl, &[hue, saturation, lightness], None)
    }

    /// Gradient color drawing `gradient` from `origin` to `destination`.
    pub fn new_gradient(
        gradient: Rc<Gradient>,
        origin: impl Into<Point>,
        destination: impl Into<Point>,
        highlight: Option<Point>,
    ) -> Self {
        let mut components = vec![
            Component::Gradient(gradient),
            Component::Point(origin.into()),
            Component::Point(destination.into()),
        ];
        components.extend(highlight.map(Component::Point));
        Color::create(Representation::Gradient, components, None)
    }
}

impl FromStr for Color {
    type Err = ColorError;

    /// Parses a CSS color string (`"#0f0"`, `"rgb(255, 0, 0)"`, `"red"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::from_args(&[ColorArg::from(s)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(parsed: &ParsedColor) -> Vec<f64> {
        parsed.components.iter().filter_map(Component::as_number).collect()
    }

    fn parse_default(args: &[ColorArg]) -> ParsedColor {
        parse(args, &SoftwareSurface).unwrap()
    }

    // ── numbers ───────────────────────────────────────────────────────────

    #[test]
    fn three_numbers_are_rgb() {
        let p = parse_default(&[0.1.into(), 0.2.into(), 0.3.into()]);
        assert_eq!(p.repr, Representation::Rgb);
        assert_eq!(numbers(&p), vec![0.1, 0.2, 0.3]);
        assert_eq!(p.alpha, None);
    }

    #[test]
    fn fewer_numbers_are_gray() {
        let p = parse_default(&[0.4.into()]);
        assert_eq!(p.repr, Representation::Gray);
        let p = parse_default(&[0.4.into(), 0.5.into()]);
        assert_eq!((p.repr, p.alpha), (Representation::Gray, Some(0.5)));
    }

    #[test]
    fn trailing_number_is_alpha() {
        let p = parse_default(&[[1.0, 0.0, 0.0, 0.5].into()]);
        assert_eq!(numbers(&p), vec![1.0, 0.0, 0.0]);
        assert_eq!(p.alpha, Some(0.5));
    }

    #[test]
    fn out_of_range_numbers_are_normalized() {
        let p = parse_default(&["hsb".into(), (-30.0).into(), 1.7.into(), (-0.3).into(), 2.0.into()]);
        assert_eq!(p.repr, Representation::Hsb);
        assert_eq!(numbers(&p), vec![330.0, 1.0, 0.0]);
        assert_eq!(p.alpha, Some(1.0));
    }

    #[test]
    fn type_hint_with_list_and_alpha() {
        let p = parse_default(&["gray".into(), [0.5].into(), 0.25.into()]);
        assert_eq!(p.repr, Representation::Gray);
        assert_eq!(numbers(&p), vec![0.5]);
        assert_eq!(p.alpha, Some(0.25));
    }

    #[test]
    fn lone_type_hint_yields_zero_components() {
        let p = parse_default(&["gray".into()]);
        assert_eq!((p.repr, numbers(&p)), (Representation::Gray, vec![0.0]));
    }

    #[test]
    fn no_arguments_is_black_rgb() {
        let p = parse_default(&[]);
        assert_eq!((p.repr, numbers(&p)), (Representation::Rgb, vec![0.0, 0.0, 0.0]));
    }

    // ── strings ───────────────────────────────────────────────────────────

    #[test]
    fn strings_become_rgb() {
        assert_eq!(numbers(&parse_default(&["red".into()])), vec![1.0, 0.0, 0.0]);
        assert_eq!(numbers(&parse_default(&["#00ff00".into()])), vec![0.0, 1.0, 0.0]);
        assert_eq!(numbers(&parse_default(&["#0f0".into()])), vec![0.0, 1.0, 0.0]);
    }

    #[test]
    fn hinted_string_is_converted() {
        let p = parse_default(&["hsb".into(), "#ff0000".into()]);
        assert_eq!(p.repr, Representation::Hsb);
        assert_eq!(numbers(&p), vec![0.0, 1.0, 1.0]);
    }

    // ── objects ───────────────────────────────────────────────────────────

    #[test]
    fn props_select_representation() {
        let hsb = ColorProps::new().with("hue", 120.0).with("saturation", 0.5).with("brightness", 0.5);
        assert_eq!(parse_default(&[hsb.into()]).repr, Representation::Hsb);

        let hsl = ColorProps::new().with("hue", 10.0).with("lightness", 0.5);
        assert_eq!(parse_default(&[hsl.into()]).repr, Representation::Hsl);

        let gray = ColorProps::new().with("gray", 0.3).with("alpha", 0.5);
        let p = parse_default(&[gray.into()]);
        assert_eq!((p.repr, numbers(&p), p.alpha), (Representation::Gray, vec![0.3], Some(0.5)));
    }

    #[test]
    fn unrecognized_props_default_to_black_rgb() {
        let p = parse_default(&[ColorProps::new().with("cyan", 1.0).into()]);
        assert_eq!((p.repr, numbers(&p)), (Representation::Rgb, vec![0.0, 0.0, 0.0]));
        let p = parse_default(&[ColorProps::new().with("green", 0.5).into()]);
        assert_eq!(numbers(&p), vec![0.0, 0.5, 0.0]);
    }

    #[test]
    fn gradient_props() {
        let g = Gradient::linear([(Color::gray(0.0), 0.0), (Color::gray(1.0), 1.0)]);
        let props = ColorProps::new()
            .with("gradient", Rc::clone(&g))
            .with("origin", (1.0, 2.0))
            .with("hilite", (3.0, 4.0));
        let p = parse_default(&[props.into()]);
        assert_eq!(p.repr, Representation::Gradient);
        assert_eq!(p.components.len(), 4);
        assert_eq!(p.components[2], Component::Point(Point::zero()));
        assert_eq!(p.components[3], Component::Point(Point::new(3.0, 4.0)));
    }

    #[test]
    fn gradient_with_positional_anchors() {
        let g = Gradient::radial([(Color::gray(0.0), 0.0), (Color::gray(1.0), 1.0)]);
        let p = parse_default(&[Rc::clone(&g).into(), (0.0, 0.0).into(), [10.0, 0.0].into()]);
        assert_eq!(p.repr, Representation::Gradient);
        assert_eq!(p.components.len(), 3);
        assert_eq!(p.components[2], Component::Point(Point::new(10.0, 0.0)));
    }

    #[test]
    fn color_argument_is_copied() {
        let source = Color::rgba(0.1, 0.2, 0.3, 0.4);
        let p = parse_default(&[(&source).into()]);
        assert_eq!(Color::from_parsed(p).unwrap(), source);
    }

    #[test]
    fn hand_built_parse_results_are_checked() {
        let short = ParsedColor {
            repr: Representation::Rgb,
            components: vec![Component::Number(5.0)],
            alpha: Some(7.0),
        };
        assert!(matches!(Color::from_parsed(short), Err(ColorError::InvalidArguments(_))));

        let wrong_kind = ParsedColor {
            repr: Representation::Gray,
            components: vec![Component::Point(Point::zero())],
            alpha: None,
        };
        assert_eq!(
            Color::from_parsed(wrong_kind),
            Err(ColorError::InvalidComponent { name: "gray", expected: "a number" })
        );

        let out_of_range = ParsedColor {
            repr: Representation::Rgb,
            components: vec![Component::Number(5.0), Component::Number(-1.0), Component::Number(0.5)],
            alpha: Some(7.0),
        };
        let c = Color::from_parsed(out_of_range).unwrap();
        assert_eq!(c, Color::rgba(1.0, 0.0, 0.5, 1.0));
        assert_eq!(c.to_css(false).unwrap(), "rgb(255, 0, 128)");
    }

    // ── failures ──────────────────────────────────────────────────────────

    #[test]
    fn gradient_hint_without_gradient_fails() {
        assert!(matches!(
            parse(&["gradient".into(), 1.0.into()], &SoftwareSurface),
            Err(ColorError::InvalidArguments(_))
        ));
    }

    #[test]
    fn wrong_prop_kind_fails() {
        let props = ColorProps::new().with("red", (1.0, 1.0));
        assert_eq!(
            parse(&[props.into()], &SoftwareSurface),
            Err(ColorError::InvalidComponent { name: "red", expected: "a number" })
        );
    }

    #[test]
    fn mixed_arguments_fail() {
        assert!(matches!(
            parse(&[1.0.into(), "red".into()], &SoftwareSurface),
            Err(ColorError::InvalidArguments(_))
        ));
    }

    #[test]
    fn hinting_a_gradient_into_rgb_fails_loudly() {
        let g = Gradient::linear([(Color::gray(0.0), 0.0)]);
        let c = Color::new_gradient(g, (0.0, 0.0), (1.0, 1.0), None);
        assert_eq!(
            parse(&["rgb".into(), c.into()], &SoftwareSurface),
            Err(ColorError::UnsupportedConversion {
                from: Representation::Gradient,
                to: Representation::Rgb,
            })
        );
    }
}
