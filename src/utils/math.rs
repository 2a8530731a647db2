use std::{fmt, str::FromStr};

use num::Float;
use serde::{Deserialize, Serialize};

/// Logarithm base used by a statistic.
///
/// idf and the cohesion score each carry their own base so a run can
/// reproduce either convention seen in older feature dumps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogBase {
    /// ln
    Natural,
    Base2,
    Base10,
}

impl LogBase {
    #[inline]
    pub fn log<N: Float>(self, x: N) -> N {
        match self {
            LogBase::Natural => x.ln(),
            LogBase::Base2 => x.log2(),
            LogBase::Base10 => x.log10(),
        }
    }
}

impl FromStr for LogBase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "e" | "ln" | "natural" => Ok(LogBase::Natural),
            "2" | "log2" | "base2" => Ok(LogBase::Base2),
            "10" | "log10" | "base10" => Ok(LogBase::Base10),
            other => Err(format!("unknown log base: {other}")),
        }
    }
}

impl fmt::Display for LogBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogBase::Natural => "natural",
            LogBase::Base2 => "base2",
            LogBase::Base10 => "base10",
        };
        f.write_str(s)
    }
}

/// `num / den`, 0 when `den` is 0
#[inline]
pub fn ratio_or_zero(num: usize, den: usize) -> f64 {
    if den == 0 {
        return 0.0;
    }
    num as f64 / den as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_bases_agree_on_their_own_base() {
        assert!((LogBase::Natural.log(std::f64::consts::E) - 1.0).abs() < 1e-12);
        assert!((LogBase::Base2.log(8.0_f64) - 3.0).abs() < 1e-12);
        assert!((LogBase::Base10.log(1000.0_f32) - 3.0).abs() < 1e-5);
    }

    #[test]
    fn parse_log_base() {
        assert_eq!("ln".parse::<LogBase>().unwrap(), LogBase::Natural);
        assert_eq!("Base2".parse::<LogBase>().unwrap(), LogBase::Base2);
        assert_eq!("10".parse::<LogBase>().unwrap(), LogBase::Base10);
        assert!("7".parse::<LogBase>().is_err());
    }

    #[test]
    fn ratio_guards_zero_denominator() {
        assert_eq!(ratio_or_zero(3, 0), 0.0);
        assert_eq!(ratio_or_zero(1, 4), 0.25);
    }
}
