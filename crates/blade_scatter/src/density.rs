//! Conversion of a user-entered count into a total number of blades.
//!
//! The density mode decides how the raw count is interpreted: as an absolute number,
//! per unit of surface area, or per surface face. A raw count of zero always resolves
//! to zero, before the mode is even looked at.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::host::{SurfaceId, SurfaceQuery};

/// Largest raw count a request may carry.
pub const MAX_RAW_COUNT: u32 = 1000;

/// Interpretation rule for the raw count.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DensityMode {
    /// The raw count is the number of blades.
    Absolute,
    /// Blades per unit of bounding-box area (area truncated to an integer).
    DensityPerArea,
    /// Blades per surface face.
    DensityPerFace,
}

/// Raw count plus the selected mode, if any.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DensityRequest {
    pub raw_count: u32,
    pub mode: Option<DensityMode>,
}

impl DensityRequest {
    pub fn new(raw_count: u32, mode: Option<DensityMode>) -> Self {
        Self { raw_count, mode }
    }

    pub fn validate(&self) -> Result<()> {
        if self.raw_count > MAX_RAW_COUNT {
            return Err(Error::InvalidConfig(format!(
                "raw count {} exceeds {MAX_RAW_COUNT}",
                self.raw_count
            )));
        }
        Ok(())
    }

    pub fn resolve(&self, metrics: &SurfaceMetrics) -> Result<usize> {
        resolve(self.raw_count, self.mode, metrics)
    }
}

/// Snapshot of the target surface taken once per generation request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceMetrics {
    pub world_width: f32,
    pub world_depth: f32,
    pub face_count: usize,
}

impl SurfaceMetrics {
    pub fn new(world_width: f32, world_depth: f32, face_count: usize) -> Self {
        Self {
            world_width,
            world_depth,
            face_count,
        }
    }

    /// Query the host for the surface's extents and face count.
    pub fn capture<Q: SurfaceQuery + ?Sized>(query: &Q, surface: &SurfaceId) -> Result<Self> {
        if !query.exists(surface) {
            return Err(Error::SurfaceNotFound {
                surface: surface.clone(),
            });
        }
        let extents = query.bounding_extents(surface)?;
        let face_count = query.face_count(surface)?;
        Ok(Self::new(extents.x, extents.y, face_count))
    }

    /// Bounding-box area truncated toward zero, multiplied in double precision.
    pub fn truncated_area(&self) -> usize {
        let area = f64::from(self.world_width) * f64::from(self.world_depth);
        if area.is_finite() && area > 0.0 {
            area as usize
        } else {
            0
        }
    }
}

/// Resolve a raw count into the total number of blades to generate.
pub fn resolve(
    raw_count: u32,
    mode: Option<DensityMode>,
    metrics: &SurfaceMetrics,
) -> Result<usize> {
    if raw_count == 0 {
        return Ok(0);
    }
    let raw = raw_count as usize;
    let (unit, per) = match mode.ok_or(Error::NoDensityModeSelected)? {
        DensityMode::Absolute => return Ok(raw),
        DensityMode::DensityPerArea => (metrics.truncated_area(), "unit of area"),
        DensityMode::DensityPerFace => (metrics.face_count, "face"),
    };
    raw.checked_mul(unit).ok_or_else(|| {
        Error::InvalidConfig(format!(
            "{raw_count} blades per {per} over {unit} overflows the blade count"
        ))
    })
}
