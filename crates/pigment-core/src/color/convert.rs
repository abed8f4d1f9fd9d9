//! Conversion engine between scalar representations.
//!
//! RGB is the hub: every scalar representation converts to and from `rgb`, and
//! pairs without a direct formula are routed through it. Alpha is never part
//! of the component slices handled here.

use super::{ColorError, Representation};

/// Selects `(r, g, b)` out of `[v, p, q, t]` for each 60° hue sector.
const HSB_SECTORS: [[usize; 3]; 6] = [
    [0, 3, 1],
    [2, 0, 1],
    [1, 0, 3],
    [1, 2, 0],
    [3, 1, 0],
    [0, 1, 2],
];

type Formula = fn(&[f64]) -> Vec<f64>;

/// Converts `components` from one representation to another.
///
/// Returns [`ColorError::UnsupportedConversion`] when either side is a
/// gradient and the two differ.
pub fn convert(
    from: Representation,
    to: Representation,
    components: &[f64],
) -> Result<Vec<f64>, ColorError> {
    if from == to {
        return Ok(components.to_vec());
    }
    if let Some(formula) = direct(from, to) {
        return Ok(formula(components));
    }
    let to_rgb = direct(from, Representation::Rgb)
        .ok_or(ColorError::UnsupportedConversion { from, to })?;
    let from_rgb = direct(Representation::Rgb, to)
        .ok_or(ColorError::UnsupportedConversion { from, to })?;
    log::trace!("converting {from} to {to} through rgb");
    Ok(from_rgb(&to_rgb(components)))
}

fn direct(from: Representation, to: Representation) -> Option<Formula> {
    use Representation::{Gray, Hsb, Hsl, Rgb};
    let formula: Formula = match (from, to) {
        (Rgb, Hsb) => |c| rgb_to_hsb(c[0], c[1], c[2]).to_vec(),
        (Hsb, Rgb) => |c| hsb_to_rgb(c[0], c[1], c[2]).to_vec(),
        (Rgb, Hsl) => |c| rgb_to_hsl(c[0], c[1], c[2]).to_vec(),
        (Hsl, Rgb) => |c| hsl_to_rgb(c[0], c[1], c[2]).to_vec(),
        (Rgb, Gray) => |c| vec![rgb_to_gray(c[0], c[1], c[2])],
        (Gray, Rgb) => |c| vec![c[0], c[0], c[0]],
        (Gray, Hsb) | (Gray, Hsl) => |c| vec![0.0, 0.0, c[0]],
        _ => return None,
    };
    Some(formula)
}

/// Hue shared by the HSB and HSL conversions, in degrees.
fn hue(r: f64, g: f64, b: f64, max: f64, delta: f64) -> f64 {
    if delta == 0.0 {
        0.0
    } else if max == r {
        ((g - b) / delta + if g < b { 6.0 } else { 0.0 }) * 60.0
    } else if max == g {
        ((b - r) / delta + 2.0) * 60.0
    } else {
        ((r - g) / delta + 4.0) * 60.0
    }
}

pub fn rgb_to_hsb(r: f64, g: f64, b: f64) -> [f64; 3] {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;
    let s = if max == 0.0 { 0.0 } else { delta / max };
    [hue(r, g, b, max, delta), s, max]
}

pub fn hsb_to_rgb(h: f64, s: f64, b: f64) -> [f64; 3] {
    let h = ((h / 60.0) % 6.0 + 6.0) % 6.0;
    let i = h.floor();
    let f = h - i;
    let v = [b, b * (1.0 - s), b * (1.0 - s * f), b * (1.0 - s * (1.0 - f))];
    // `h` is in [0, 6); the `min` guards the rounding edge where it lands on 6.
    let [ri, gi, bi] = HSB_SECTORS[(i as usize).min(5)];
    [v[ri], v[gi], v[bi]]
}

pub fn rgb_to_hsl(r: f64, g: f64, b: f64) -> [f64; 3] {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;
    let l = (max + min) / 2.0;
    let s = if delta == 0.0 {
        0.0
    } else if l < 0.5 {
        delta / (max + min)
    } else {
        delta / (2.0 - max - min)
    };
    [hue(r, g, b, max, delta), s, l]
}

pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> [f64; 3] {
    if s == 0.0 {
        return [l, l, l];
    }
    let h = h / 360.0;
    let t2 = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let t1 = 2.0 * l - t2;
    let channel = |t3: f64| {
        let t3 = if t3 < 0.0 {
            t3 + 1.0
        } else if t3 > 1.0 {
            t3 - 1.0
        } else {
            t3
        };
        if 6.0 * t3 < 1.0 {
            t1 + (t2 - t1) * 6.0 * t3
        } else if 2.0 * t3 < 1.0 {
            t2
        } else if 3.0 * t3 < 2.0 {
            t1 + (t2 - t1) * (2.0 / 3.0 - t3) * 6.0
        } else {
            t1
        }
    };
    [channel(h + 1.0 / 3.0), channel(h), channel(h - 1.0 / 3.0)]
}

/// NTSC luma.
#[inline]
pub fn rgb_to_gray(r: f64, g: f64, b: f64) -> f64 {
    0.2989 * r + 0.587 * g + 0.114 * b
}
