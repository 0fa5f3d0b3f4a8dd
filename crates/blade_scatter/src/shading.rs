//! Fixed description of the grass material.
//!
//! Hosts implementing [`crate::host::ShadingSystem`] build their material from
//! [`GrassMaterial::STANDARD`]: a light green lambert-style surface whose color is
//! driven by a two-stop gradient ramp.

/// Linear RGB triple.
pub type Rgb = [f32; 3];

/// One stop of the gradient ramp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RampStop {
    pub color: Rgb,
    /// Position along the ramp in [0, 1].
    pub position: f32,
}

/// Material parameters shared by every generated blade.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrassMaterial {
    pub base_color: Rgb,
    pub ambient_color: Rgb,
    /// Ramp stops in host entry order; the ramp output drives the color input.
    pub ramp: [RampStop; 2],
}

impl GrassMaterial {
    pub const STANDARD: GrassMaterial = GrassMaterial {
        base_color: [0.45, 0.96, 0.42],
        ambient_color: [0.229, 0.251, 0.0],
        ramp: [
            RampStop {
                color: [0.494, 1.0, 0.418],
                position: 0.8,
            },
            RampStop {
                color: [0.031, 0.115, 0.033],
                position: 0.5,
            },
        ],
    };
}

impl Default for GrassMaterial {
    fn default() -> Self {
        Self::STANDARD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_material_constants() {
        let m = GrassMaterial::default();
        assert_eq!(m.base_color, [0.45, 0.96, 0.42]);
        assert_eq!(m.ambient_color, [0.229, 0.251, 0.0]);
        assert_eq!(m.ramp[0].position, 0.8);
        assert_eq!(m.ramp[1].color, [0.031, 0.115, 0.033]);
    }

    #[test]
    fn ramp_stops_stay_in_unit_range() {
        for stop in GrassMaterial::STANDARD.ramp {
            assert!((0.0..=1.0).contains(&stop.position));
        }
    }
}
