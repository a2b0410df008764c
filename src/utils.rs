pub mod text {
    use std::str::FromStr;

    use crate::error::{FractionError, Result};

    /// Splits `"a"`, `"a/b"` or `"a/b/c"` into its signed integer parts.
    ///
    /// All whitespace is dropped before splitting, so `"5/ -2 / -4"` is
    /// read as `[5, -2, -4]`.
    pub fn parse_parts(input: &str) -> Result<Vec<i64>> {
        let compact: String = input.chars().filter(|c| !c.is_whitespace()).collect();
        let parts = compact
            .split('/')
            .map(|token| {
                i64::from_str(token)
                    .map_err(|e| FractionError::format(input, format!("{:?}: {}", token, e)))
            })
            .collect::<Result<Vec<_>>>()?;

        match parts.len() {
            1..=3 => Ok(parts),
            n => Err(FractionError::format(
                input,
                format!("expected 1 to 3 parts, found {}", n),
            )),
        }
    }

}

pub mod decimal {
    use num_traits::ToPrimitive;

    use crate::error::{FractionError, Result};

    /// Fractional digits kept before the decimal is split.
    pub const PRECISION: i32 = 5;

    /// Lossy conversion of a decimal into a `(numerator, denominator)` pair.
    ///
    /// The value is rounded half away from zero to [`PRECISION`] fractional
    /// digits, split into integer and fractional part, and both are scaled
    /// by `10^k` where `k` is the length of the printed fractional part
    /// (`"0.75"` gives `k = 4`). The scaled sum is rounded to the nearest
    /// integer, so `0.7` gives `700/1000` even though the `f32` sits just
    /// below it. Values whose `f32` remainder prints with many digits produce
    /// large, unreduced pairs; callers reduce.
    ///
    /// A zero remainder prints as `"0"`, so whole numbers scale by `10`
    /// (`3.0` gives `30/10`, not `3000/1000`). The value is the same once
    /// reduced.
    pub fn to_pair(value: f32) -> Result<(i64, i64)> {
        if !value.is_finite() {
            return Err(FractionError::Overflow("decimal conversion"));
        }
        let scale = 10f64.powi(PRECISION);
        let rounded = ((value as f64) * scale).round() / scale;
        let rounded = rounded as f32;

        let integer = rounded.trunc();
        let fractional = rounded - integer;
        let digits = fractional.to_string().len() as i32;
        let factor = 10f64.powi(digits);

        let numerator = (integer as f64 * factor + fractional as f64 * factor)
            .round()
            .to_i64()
            .ok_or(FractionError::Overflow("decimal conversion"))?;
        let denominator = factor
            .to_i64()
            .ok_or(FractionError::Overflow("decimal conversion"))?;
        Ok((numerator, denominator))
    }

}
