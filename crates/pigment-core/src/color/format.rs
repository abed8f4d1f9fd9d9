/// Fixed-precision number formatting for human readable output.
///
/// Values are rounded to `precision` decimals and printed without trailing
/// zeros (`0.5`, `1`, `120`).
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct NumberFormat {
    pub precision: u32,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self { precision: 5 }
    }
}

impl NumberFormat {
    #[inline]
    pub const fn new(precision: u32) -> Self {
        Self { precision }
    }

    pub fn number(&self, value: f64) -> String {
        let scale = 10f64.powi(self.precision as i32);
        let rounded = (value * scale).round() / scale;
        // Avoid printing `-0`.
        if rounded == 0.0 {
            "0".to_string()
        } else {
            format!("{rounded}")
        }
    }
}
