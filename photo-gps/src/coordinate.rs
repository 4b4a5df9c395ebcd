//! Degrees/minutes/seconds to decimal degrees.

use std::fmt;
use std::str::FromStr;

use crate::error::GpsError;

/// A GPS rational component. Wide enough for both signed and unsigned EXIF rationals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rational {
    pub num: i64,
    pub denom: i64,
}

impl Rational {
    pub fn new(num: i64, denom: i64) -> Self {
        Self { num, denom }
    }

    pub fn to_f64(self) -> Result<f64, GpsError> {
        if self.denom == 0 {
            return Err(GpsError::ZeroDenominator);
        }
        Ok(self.num as f64 / self.denom as f64)
    }
}

impl From<&exif::Rational> for Rational {
    fn from(r: &exif::Rational) -> Self {
        Self::new(r.num.into(), r.denom.into())
    }
}

impl From<&exif::SRational> for Rational {
    fn from(r: &exif::SRational) -> Self {
        Self::new(r.num.into(), r.denom.into())
    }
}

/// Hemisphere reference letter stored next to a GPS coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hemisphere {
    North,
    South,
    East,
    West,
}

impl Hemisphere {
    /// -1 for South and West, 1 otherwise.
    pub fn sign(self) -> f64 {
        match self {
            Hemisphere::South | Hemisphere::West => -1.0,
            Hemisphere::North | Hemisphere::East => 1.0,
        }
    }
}

impl FromStr for Hemisphere {
    type Err = GpsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_end_matches('\0') {
            "N" | "n" => Ok(Hemisphere::North),
            "S" | "s" => Ok(Hemisphere::South),
            "E" | "e" => Ok(Hemisphere::East),
            "W" | "w" => Ok(Hemisphere::West),
            other => Err(GpsError::InvalidReference(other.to_string())),
        }
    }
}

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}

/// Converts `[degrees, minutes, seconds]` to signed decimal degrees:
/// `degrees + minutes / 60 + seconds / 3600`, negated for South and West.
///
/// Extra components beyond the third are ignored.
pub fn to_decimal_degrees(dms: &[Rational], hemisphere: Hemisphere) -> Result<f64, GpsError> {
    let [degrees, minutes, seconds] = match dms {
        [d, m, s, ..] => [*d, *m, *s],
        _ => return Err(GpsError::MalformedTriple(dms.len())),
    };
    let magnitude = degrees.to_f64()? + minutes.to_f64()? / 60.0 + seconds.to_f64()? / 3600.0;
    Ok(hemisphere.sign() * magnitude)
}
