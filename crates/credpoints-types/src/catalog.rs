//! Certification tiers and credit point values.
//!
//! A certification is sorted into one of five [`Category`] buckets by keyword
//! rules ([`TierRule`]); each bucket carries a nominal [`Points`] award.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

/// A credit point amount.
///
/// Stored as a count of half points so that sums of 2.5-point awards stay
/// exact. Serialized as a plain JSON number (`2.5`, `10`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "f64", try_from = "f64")]
pub struct Points(u32);

impl Points {
    pub const ZERO: Points = Points(0);

    /// Build a point amount from a count of half points (`5` -> 2.5 points).
    pub const fn from_halves(halves: u32) -> Self {
        Self(halves)
    }

    /// Build a point amount from whole points.
    pub const fn whole(points: u32) -> Self {
        Self(points * 2)
    }

    pub fn halves(self) -> u32 {
        self.0
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.0) / 2.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Points {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 % 2 == 0 {
            write!(f, "{}", self.0 / 2)
        } else {
            write!(f, "{}.5", self.0 / 2)
        }
    }
}

impl From<Points> for f64 {
    fn from(points: Points) -> Self {
        points.as_f64()
    }
}

impl TryFrom<f64> for Points {
    type Error = String;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        let halves = value * 2.0;
        if !value.is_finite() || value < 0.0 || halves.fract() != 0.0 || halves > f64::from(u32::MAX) {
            return Err(format!("invalid point value: {value} (must be a non-negative multiple of 0.5)"));
        }
        Ok(Self(halves as u32))
    }
}

impl Add for Points {
    type Output = Points;

    fn add(self, rhs: Points) -> Points {
        Points(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Points {
    fn add_assign(&mut self, rhs: Points) {
        *self = *self + rhs;
    }
}

impl Sum for Points {
    fn sum<I: Iterator<Item = Points>>(iter: I) -> Self {
        iter.fold(Points::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Points> for Points {
    fn sum<I: Iterator<Item = &'a Points>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Tier bucket of a certification.
///
/// Maps to the CHECK constraint in the SQLite schema:
/// `CHECK (category IN ('professional', 'specialty', 'associate', 'hashicorp', 'other'))`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Professional,
    Specialty,
    Associate,
    Hashicorp,
    Other,
}

impl Category {
    /// Nominal award for a certification in this tier.
    pub fn nominal_points(self) -> Points {
        match self {
            Category::Professional | Category::Specialty => Points::whole(10),
            Category::Associate | Category::Hashicorp => Points::whole(5),
            Category::Other => Points::from_halves(5),
        }
    }

    /// Human-readable tier label as shown in the points table.
    pub fn label(self) -> &'static str {
        match self {
            Category::Professional | Category::Specialty => "Any Professional or Specialty",
            Category::Associate | Category::Hashicorp => "Any Associate or Hashicorp",
            Category::Other => "Anything Else",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Professional => write!(f, "professional"),
            Category::Specialty => write!(f, "specialty"),
            Category::Associate => write!(f, "associate"),
            Category::Hashicorp => write!(f, "hashicorp"),
            Category::Other => write!(f, "other"),
        }
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "professional" => Ok(Category::Professional),
            "specialty" => Ok(Category::Specialty),
            "associate" => Ok(Category::Associate),
            "hashicorp" => Ok(Category::Hashicorp),
            "other" => Ok(Category::Other),
            other => Err(format!("invalid category: '{other}'")),
        }
    }
}

/// One keyword rule of the tier policy.
///
/// A certification name matches the rule when its lowercased form contains
/// any of `keywords`. Rules are evaluated in ascending `priority`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierRule {
    pub category: Category,
    pub label: String,
    pub points: Points,
    pub keywords: Vec<String>,
    pub priority: u32,
}

/// Resolved catalog entry for a certification name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CertificationRecord {
    pub name: String,
    pub category: Category,
    pub tier_label: String,
    pub points: Points,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_display() {
        assert_eq!(Points::whole(10).to_string(), "10");
        assert_eq!(Points::from_halves(5).to_string(), "2.5");
        assert_eq!(Points::ZERO.to_string(), "0");
    }

    #[test]
    fn test_points_sum_is_exact() {
        let total: Points = [Points::from_halves(5), Points::from_halves(5), Points::whole(10)]
            .iter()
            .sum();
        assert_eq!(total, Points::whole(15));
        assert_eq!(total.to_string(), "15");
    }

    #[test]
    fn test_points_serde_as_number() {
        let json = serde_json::to_string(&Points::from_halves(5)).unwrap();
        assert_eq!(json, "2.5");
        let parsed: Points = serde_json::from_str("10").unwrap();
        assert_eq!(parsed, Points::whole(10));
    }

    #[test]
    fn test_points_rejects_fractional_thirds() {
        assert!(Points::try_from(1.3).is_err());
        assert!(Points::try_from(-5.0).is_err());
        assert!(Points::try_from(f64::NAN).is_err());
    }

    #[test]
    fn test_category_nominal_points() {
        assert_eq!(Category::Professional.nominal_points(), Points::whole(10));
        assert_eq!(Category::Specialty.nominal_points(), Points::whole(10));
        assert_eq!(Category::Associate.nominal_points(), Points::whole(5));
        assert_eq!(Category::Hashicorp.nominal_points(), Points::whole(5));
        assert_eq!(Category::Other.nominal_points(), Points::from_halves(5));
    }

    #[test]
    fn test_category_roundtrip() {
        for category in [
            Category::Professional,
            Category::Specialty,
            Category::Associate,
            Category::Hashicorp,
            Category::Other,
        ] {
            let parsed: Category = category.to_string().parse().unwrap();
            assert_eq!(parsed, category);
        }
    }

    #[test]
    fn test_category_invalid() {
        let err = "gold".parse::<Category>().unwrap_err();
        assert!(err.contains("gold"));
    }
}
