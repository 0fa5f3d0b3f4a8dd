//! Blade styles and the fixed catalog they are drawn from.
//!
//! A [`Style`] is a plain data record of parameter ranges. The four entries of the
//! [`StyleCatalog`] are ordered from shortest ([`StyleName::Mowed`]) to tallest
//! ([`StyleName::Long`]); all sampling is shared and driven by the record's ranges.
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Name of one of the fixed blade styles.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StyleName {
    Mowed,
    Short,
    Medium,
    Long,
}

impl StyleName {
    /// All style names in catalog order.
    pub const ALL: [StyleName; 4] = [
        StyleName::Mowed,
        StyleName::Short,
        StyleName::Medium,
        StyleName::Long,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StyleName::Mowed => "Mowed",
            StyleName::Short => "Short",
            StyleName::Medium => "Medium",
            StyleName::Long => "Long",
        }
    }
}

impl fmt::Display for StyleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for StyleName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        StyleName::ALL
            .into_iter()
            .find(|name| name.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownStyle { name: s.to_owned() })
    }
}

/// Closed parameter range `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamRange {
    pub min: f32,
    pub max: f32,
}

impl ParamRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Height of the bend deformer's pivot, either constant or sampled per blade.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PivotHeight {
    Fixed(f32),
    Range(ParamRange),
}

impl PivotHeight {
    /// Range covering every value this pivot can take.
    pub fn bounds(&self) -> ParamRange {
        match *self {
            PivotHeight::Fixed(v) => ParamRange::new(v, v),
            PivotHeight::Range(r) => r,
        }
    }
}

/// Taper width shared by every style.
pub const TAPER_WIDTH: ParamRange = ParamRange::new(0.02, 0.04);

/// Immutable descriptor of one blade style.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    pub name: StyleName,
    pub height: ParamRange,
    pub bend_curvature: ParamRange,
    pub bend_pivot_height: PivotHeight,
    pub taper_width: ParamRange,
}

static MOWED: Style = Style {
    name: StyleName::Mowed,
    height: ParamRange::new(0.5, 0.7),
    bend_curvature: ParamRange::new(8.0, 10.0),
    bend_pivot_height: PivotHeight::Fixed(0.15),
    taper_width: TAPER_WIDTH,
};

static SHORT: Style = Style {
    name: StyleName::Short,
    height: ParamRange::new(0.7, 1.0),
    bend_curvature: ParamRange::new(10.0, 25.0),
    bend_pivot_height: PivotHeight::Fixed(0.15),
    taper_width: TAPER_WIDTH,
};

static MEDIUM: Style = Style {
    name: StyleName::Medium,
    height: ParamRange::new(1.0, 1.3),
    bend_curvature: ParamRange::new(25.0, 40.0),
    bend_pivot_height: PivotHeight::Range(ParamRange::new(0.15, 0.25)),
    taper_width: TAPER_WIDTH,
};

static LONG: Style = Style {
    name: StyleName::Long,
    height: ParamRange::new(1.3, 1.6),
    bend_curvature: ParamRange::new(25.0, 50.0),
    bend_pivot_height: PivotHeight::Range(ParamRange::new(0.15, 0.25)),
    taper_width: TAPER_WIDTH,
};

/// Process-wide, read-only set of blade styles.
#[derive(Debug, Clone, Copy, Default)]
pub struct StyleCatalog;

impl StyleCatalog {
    pub fn new() -> Self {
        Self
    }

    /// Style record for a known name.
    pub fn get(&self, name: StyleName) -> &'static Style {
        match name {
            StyleName::Mowed => &MOWED,
            StyleName::Short => &SHORT,
            StyleName::Medium => &MEDIUM,
            StyleName::Long => &LONG,
        }
    }

    /// Look up a style by its display name.
    pub fn lookup(&self, name: &str) -> Result<&'static Style> {
        let name: StyleName = name.parse()?;
        Ok(self.get(name))
    }

    /// Every style keyed by name, in catalog order.
    pub fn styles_by_name(&self) -> impl Iterator<Item = (StyleName, &'static Style)> + '_ {
        StyleName::ALL.into_iter().map(move |n| (n, self.get(n)))
    }
}
