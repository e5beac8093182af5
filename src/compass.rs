//! 16-point compass rose
//!
//! Directions are bucketed in two stages: the circle is first cut into 32
//! sub-sectors of 11.25°, then neighbouring sub-sectors are merged into the
//! 16 compass points. Sub-sector `i` belongs to point `((i + 1) / 2) % 16`,
//! so N is assembled from the last sub-sector (348.75°–360°) and the first
//! (0°–11.25°) and straddles the wrap boundary.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of compass points on the rose
pub const COMPASS_POINTS: usize = 16;

/// Angular width of one compass sector in degrees
pub const SECTOR_WIDTH: f64 = 360.0 / COMPASS_POINTS as f64;

/// One of the 16 compass points, in clockwise order starting at north
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CompassPoint {
    N,
    NNE,
    NE,
    ENE,
    E,
    ESE,
    SE,
    SSE,
    S,
    SSW,
    SW,
    WSW,
    W,
    WNW,
    NW,
    NNW,
}

impl CompassPoint {
    /// All points in clockwise order starting at N
    pub const ALL: [CompassPoint; COMPASS_POINTS] = [
        CompassPoint::N,
        CompassPoint::NNE,
        CompassPoint::NE,
        CompassPoint::ENE,
        CompassPoint::E,
        CompassPoint::ESE,
        CompassPoint::SE,
        CompassPoint::SSE,
        CompassPoint::S,
        CompassPoint::SSW,
        CompassPoint::SW,
        CompassPoint::WSW,
        CompassPoint::W,
        CompassPoint::WNW,
        CompassPoint::NW,
        CompassPoint::NNW,
    ];

    /// Clockwise position, 0 for N through 15 for NNW
    pub fn index(self) -> usize {
        self as usize
    }

    /// Point at a clockwise position; wraps modulo 16
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % COMPASS_POINTS]
    }

    /// Point owning the given 11.25° sub-sector
    pub fn from_sub_sector(sub_sector: usize) -> Self {
        Self::from_index((sub_sector + 1) / 2)
    }

    /// Heading of the sector centre in degrees
    pub fn center_degrees(self) -> f64 {
        self.index() as f64 * SECTOR_WIDTH
    }

    pub fn label(self) -> &'static str {
        match self {
            CompassPoint::N => "N",
            CompassPoint::NNE => "NNE",
            CompassPoint::NE => "NE",
            CompassPoint::ENE => "ENE",
            CompassPoint::E => "E",
            CompassPoint::ESE => "ESE",
            CompassPoint::SE => "SE",
            CompassPoint::SSE => "SSE",
            CompassPoint::S => "S",
            CompassPoint::SSW => "SSW",
            CompassPoint::SW => "SW",
            CompassPoint::WSW => "WSW",
            CompassPoint::W => "W",
            CompassPoint::WNW => "WNW",
            CompassPoint::NW => "NW",
            CompassPoint::NNW => "NNW",
        }
    }
}

impl fmt::Display for CompassPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Returned when a string is not one of the 16 compass labels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCompassError(pub String);

impl fmt::Display for ParseCompassError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown compass point '{}'", self.0)
    }
}

impl std::error::Error for ParseCompassError {}

impl FromStr for CompassPoint {
    type Err = ParseCompassError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseCompassError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clockwise_order() {
        let labels: Vec<&str> = CompassPoint::ALL.iter().map(|p| p.label()).collect();
        assert_eq!(
            labels,
            vec![
                "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W",
                "WNW", "NW", "NNW"
            ]
        );
        for (i, point) in CompassPoint::ALL.iter().enumerate() {
            assert_eq!(point.index(), i);
        }
    }

    #[test]
    fn test_sub_sector_collapse_wraps_north() {
        assert_eq!(CompassPoint::from_sub_sector(0), CompassPoint::N);
        assert_eq!(CompassPoint::from_sub_sector(31), CompassPoint::N);
        assert_eq!(CompassPoint::from_sub_sector(1), CompassPoint::NNE);
        assert_eq!(CompassPoint::from_sub_sector(2), CompassPoint::NNE);
        assert_eq!(CompassPoint::from_sub_sector(15), CompassPoint::S);
        assert_eq!(CompassPoint::from_sub_sector(16), CompassPoint::S);
        assert_eq!(CompassPoint::from_sub_sector(29), CompassPoint::NNW);
        assert_eq!(CompassPoint::from_sub_sector(30), CompassPoint::NNW);
    }

    #[test]
    fn test_every_point_gets_two_sub_sectors() {
        let mut hits = [0usize; COMPASS_POINTS];
        for sub in 0..32 {
            hits[CompassPoint::from_sub_sector(sub).index()] += 1;
        }
        assert!(hits.iter().all(|&h| h == 2));
    }

    #[test]
    fn test_parse_round_trip() {
        for point in CompassPoint::ALL {
            assert_eq!(point.to_string().parse::<CompassPoint>().unwrap(), point);
        }
        assert_eq!("wsw".parse::<CompassPoint>().unwrap(), CompassPoint::WSW);
        assert!("NORTH".parse::<CompassPoint>().is_err());
    }

    #[test]
    fn test_center_degrees() {
        assert_eq!(CompassPoint::N.center_degrees(), 0.0);
        assert_eq!(CompassPoint::E.center_degrees(), 90.0);
        assert_eq!(CompassPoint::NNW.center_degrees(), 337.5);
    }
}
