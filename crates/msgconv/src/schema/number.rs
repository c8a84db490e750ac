//! Stream-style float formatting
//!
//! Six significant digits, trailing zeros removed, scientific notation
//! outside `1e-4 ..= 1e6` (`10`, `0.8`, `1834.5`, `1.23457e+06`).

use std::fmt;

const PRECISION: usize = 6;

/// Display wrapper for the numbers inside minimal-schema strings
#[derive(Debug, Clone, Copy)]
pub struct StreamFloat(pub f64);

impl fmt::Display for StreamFloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = self.0;
        if v.is_nan() {
            return f.write_str("nan");
        }
        if v.is_infinite() {
            return f.write_str(if v < 0.0 { "-inf" } else { "inf" });
        }
        if v == 0.0 {
            return f.write_str(if v.is_sign_negative() { "-0" } else { "0" });
        }

        // Exponent after rounding to PRECISION significant digits
        let sci = format!("{:.*e}", PRECISION - 1, v);
        let Some((mantissa, exp)) = sci.split_once('e') else {
            return f.write_str(&sci);
        };
        let Ok(exp) = exp.parse::<i32>() else {
            return f.write_str(&sci);
        };

        if exp < -4 || exp >= PRECISION as i32 {
            let sign = if exp < 0 { '-' } else { '+' };
            write!(f, "{}e{sign}{:02}", trim_fraction(mantissa), exp.abs())
        } else {
            let decimals = (PRECISION as i32 - 1 - exp) as usize;
            let fixed = format!("{:.*}", decimals, v);
            f.write_str(trim_fraction(&fixed))
        }
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}
