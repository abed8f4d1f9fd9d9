//! CSS color string parsing: hex literals, `rgb()`/`hsl()` functions and
//! named colors.

use crate::paint::DrawingSurface;

use super::convert::hsl_to_rgb;
use super::NamedColorCache;

/// RGB channels in `[0, 1]` plus alpha when the string carried one.
pub(crate) type CssColor = ([f64; 3], Option<f64>);

/// Parses a CSS color string.
///
/// Never fails: malformed strings and unknown names resolve to black.
pub(crate) fn parse_css_color(input: &str, surface: &dyn DrawingSurface) -> CssColor {
    let s = input.trim();
    let parsed = if let Some(digits) = s.strip_prefix('#') {
        parse_hex(digits)
    } else if let Some((name, body)) = split_function(s) {
        parse_function(&name, body)
    } else if s.eq_ignore_ascii_case("transparent") {
        Some(([0.0; 3], Some(0.0)))
    } else {
        return (NamedColorCache::global().resolve(s, surface), None);
    };
    parsed.unwrap_or_else(|| {
        log::warn!("malformed color string {input:?}, falling back to black");
        ([0.0; 3], None)
    })
}

#[inline]
fn hex_value(b: u8) -> u8 {
    match b {
        b'0'..=b'9' => b - b'0',
        b'a'..=b'f' => b - b'a' + 10,
        _ => b - b'A' + 10,
    }
}

/// `rgb` or `rgba` with one digit per channel; otherwise five to eight digits
/// read as two-digit groups, a trailing single digit doubled
/// (`12345` → `12 34 55`, `1234567` → `12 34 56` with alpha `77`).
fn parse_hex(digits: &str) -> Option<CssColor> {
    let bytes = digits.as_bytes();
    if !bytes.iter().all(u8::is_ascii_hexdigit) {
        return None;
    }
    let channels: Vec<f64> = match bytes.len() {
        3 | 4 => bytes.iter().map(|&b| f64::from(hex_value(b) * 17) / 255.0).collect(),
        5..=8 => bytes
            .chunks(2)
            .map(|group| match *group {
                [hi, lo] => f64::from(hex_value(hi) * 16 + hex_value(lo)) / 255.0,
                [single] => f64::from(hex_value(single) * 17) / 255.0,
                _ => 0.0,
            })
            .collect(),
        _ => return None,
    };
    Some(([channels[0], channels[1], channels[2]], channels.get(3).copied()))
}

/// Splits `name(body)` for the functions this parser understands.
fn split_function(s: &str) -> Option<(String, &str)> {
    let open = s.find('(')?;
    let body = s[open + 1..].strip_suffix(')')?;
    let name = s[..open].trim().to_ascii_lowercase();
    matches!(name.as_str(), "rgb" | "rgba" | "hsl" | "hsla").then_some((name, body))
}

fn parse_function(name: &str, body: &str) -> Option<CssColor> {
    let parts: Vec<&str> = body
        .split(|c: char| c == ',' || c == '/' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .collect();
    if !(3..=4).contains(&parts.len()) {
        return None;
    }
    let alpha = match parts.get(3) {
        Some(part) => Some(parse_fraction(part, 1.0)?.clamp(0.0, 1.0)),
        None => None,
    };
    let rgb = if name.starts_with("hsl") {
        let hue = parse_angle(parts[0])?;
        let s = parse_fraction(parts[1], 100.0)?.clamp(0.0, 1.0);
        let l = parse_fraction(parts[2], 100.0)?.clamp(0.0, 1.0);
        hsl_to_rgb(((hue % 360.0) + 360.0) % 360.0, s, l)
    } else {
        let mut rgb = [0.0; 3];
        for (channel, part) in rgb.iter_mut().zip(&parts) {
            *channel = parse_fraction(part, 255.0)?.clamp(0.0, 1.0);
        }
        rgb
    };
    Some((rgb, alpha))
}

/// A number divided by `scale`, or a percentage divided by 100.
fn parse_fraction(part: &str, scale: f64) -> Option<f64> {
    match part.strip_suffix('%') {
        Some(pct) => pct.parse::<f64>().ok().map(|v| v / 100.0),
        None => part.parse::<f64>().ok().map(|v| v / scale),
    }
    .filter(|v| v.is_finite())
}

/// Hue with an optional `deg`, `turn`, `rad` or `grad` unit, in degrees.
fn parse_angle(part: &str) -> Option<f64> {
    let number = part.trim_end_matches(|c: char| c.is_ascii_alphabetic());
    let factor = match part[number.len()..].to_ascii_lowercase().as_str() {
        "" | "deg" => 1.0,
        "turn" => 360.0,
        "rad" => 180.0 / core::f64::consts::PI,
        "grad" => 0.9,
        _ => return None,
    };
    number.parse::<f64>().ok().map(|v| v * factor).filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::SoftwareSurface;

    fn parse(s: &str) -> CssColor {
        parse_css_color(s, &SoftwareSurface)
    }

    fn assert_rgb(actual: CssColor, rgb: [f64; 3], alpha: Option<f64>) {
        for (a, e) in actual.0.iter().zip(rgb) {
            assert!((a - e).abs() < 1e-9, "{actual:?} vs {rgb:?}");
        }
        assert_eq!(actual.1, alpha);
    }

    // ── hex ───────────────────────────────────────────────────────────────

    #[test]
    fn hex_long_and_short() {
        assert_rgb(parse("#00ff00"), [0.0, 1.0, 0.0], None);
        assert_rgb(parse("#0f0"), [0.0, 1.0, 0.0], None);
        assert_rgb(parse("#FF8000"), [1.0, 128.0 / 255.0, 0.0], None);
    }

    #[test]
    fn hex_with_alpha() {
        assert_rgb(parse("#ff000080"), [1.0, 0.0, 0.0], Some(128.0 / 255.0));
        assert_rgb(parse("#f008"), [1.0, 0.0, 0.0], Some(136.0 / 255.0));
    }

    #[test]
    fn odd_length_hex_doubles_the_last_digit() {
        assert_rgb(parse("#12345"), [18.0 / 255.0, 52.0 / 255.0, 85.0 / 255.0], None);
        assert_rgb(
            parse("#1234567"),
            [18.0 / 255.0, 52.0 / 255.0, 86.0 / 255.0],
            Some(119.0 / 255.0),
        );
    }

    #[test]
    fn malformed_hex_falls_back_to_black() {
        assert_rgb(parse("#12"), [0.0; 3], None);
        assert_rgb(parse("#123456789"), [0.0; 3], None);
        assert_rgb(parse("#ggg"), [0.0; 3], None);
        assert_rgb(parse("#"), [0.0; 3], None);
    }

    // ── functions ─────────────────────────────────────────────────────────

    #[test]
    fn rgb_function() {
        assert_rgb(parse("rgb(255, 0, 0)"), [1.0, 0.0, 0.0], None);
        assert_rgb(parse("rgba(0, 0, 255, 0.5)"), [0.0, 0.0, 1.0], Some(0.5));
        assert_rgb(parse("rgb(100% 50% 0% / 25%)"), [1.0, 0.5, 0.0], Some(0.25));
    }

    #[test]
    fn hsl_function_with_units() {
        assert_rgb(parse("hsl(120, 100%, 25%)"), [0.0, 0.5, 0.0], None);
        assert_rgb(parse("hsla(0.5turn, 100%, 50%, 1)"), [0.0, 1.0, 1.0], Some(1.0));
        assert_rgb(parse("hsl(-240deg 100% 50%)"), [0.0, 1.0, 0.0], None);
    }

    #[test]
    fn malformed_function_falls_back_to_black() {
        assert_rgb(parse("rgb(1, 2)"), [0.0; 3], None);
        assert_rgb(parse("hsl(1furlong, 0%, 0%)"), [0.0; 3], None);
        assert_rgb(parse("rgb(NaN, 255, 255)"), [0.0; 3], None);
        assert_rgb(parse("rgba(255, 255, 255, inf)"), [0.0; 3], None);
    }

    // ── names ─────────────────────────────────────────────────────────────

    #[test]
    fn named_colors() {
        assert_rgb(parse("red"), [1.0, 0.0, 0.0], None);
        assert_rgb(parse("  navy "), [0.0, 0.0, 128.0 / 255.0], None);
        assert_rgb(parse("transparent"), [0.0; 3], Some(0.0));
        assert_rgb(parse("definitely-not-a-color"), [0.0; 3], None);
    }
}
