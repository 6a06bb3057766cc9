//! Sky parameters edited from the debug window.
//!
//! The values follow the classic analytic sky model (turbidity, Rayleigh and Mie
//! coefficients, sun elevation/azimuth, exposure). They are mapped onto the
//! engine's physically based atmosphere relative to an Earth-like reference.

use std::ops::RangeInclusive;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Reference values at which the atmosphere matches its Earth preset.
pub const REFERENCE_TURBIDITY: f32 = 2.0;
pub const REFERENCE_MIE_COEFFICIENT: f32 = 0.005;

/// EV100 used for an exposure multiplier of 1 (bright sunlight).
pub const BASE_EV100: f32 = 15.0;

/// Smallest exposure multiplier fed into the log (0 would be infinitely dark).
pub const MIN_EXPOSURE: f32 = 1e-4;

/// A slider range plus its step.
#[derive(Debug, Clone)]
pub struct ParamRange {
    pub range: RangeInclusive<f32>,
    pub step: f64,
}

impl ParamRange {
    const fn new(min: f32, max: f32, step: f64) -> Self {
        Self {
            range: min..=max,
            step,
        }
    }

    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(*self.range.start(), *self.range.end())
    }
}

pub const TURBIDITY_RANGE: ParamRange = ParamRange::new(0.0, 20.0, 0.1);
pub const RAYLEIGH_RANGE: ParamRange = ParamRange::new(0.0, 4.0, 0.001);
pub const MIE_COEFFICIENT_RANGE: ParamRange = ParamRange::new(0.0, 0.1, 0.001);
pub const MIE_DIRECTIONAL_G_RANGE: ParamRange = ParamRange::new(0.0, 1.0, 0.001);
pub const ELEVATION_RANGE: ParamRange = ParamRange::new(0.0, 90.0, 0.1);
pub const AZIMUTH_RANGE: ParamRange = ParamRange::new(-180.0, 180.0, 0.1);
pub const EXPOSURE_RANGE: ParamRange = ParamRange::new(0.0, 1.0, 0.0001);

/// Live sky state. Angles are in degrees.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkySettings {
    pub turbidity: f32,
    pub rayleigh: f32,
    pub mie_coefficient: f32,
    pub mie_directional_g: f32,
    pub elevation: f32,
    pub azimuth: f32,
    pub exposure: f32,
}

impl Default for SkySettings {
    fn default() -> Self {
        Self {
            turbidity: 10.0,
            rayleigh: 3.0,
            mie_coefficient: 0.005,
            mie_directional_g: 0.7,
            elevation: 2.0,
            azimuth: 180.0,
            exposure: 1.0,
        }
    }
}

/// Multipliers applied to the Earth atmosphere preset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatteringScale {
    pub rayleigh: f32,
    pub mie: f32,
    pub mie_asymmetry: f32,
}

impl SkySettings {
    /// Every value pulled into its slider range.
    pub fn clamped(&self) -> Self {
        Self {
            turbidity: TURBIDITY_RANGE.clamp(self.turbidity),
            rayleigh: RAYLEIGH_RANGE.clamp(self.rayleigh),
            mie_coefficient: MIE_COEFFICIENT_RANGE.clamp(self.mie_coefficient),
            mie_directional_g: MIE_DIRECTIONAL_G_RANGE.clamp(self.mie_directional_g),
            elevation: ELEVATION_RANGE.clamp(self.elevation),
            azimuth: AZIMUTH_RANGE.clamp(self.azimuth),
            exposure: EXPOSURE_RANGE.clamp(self.exposure),
        }
    }

    /// Unit vector pointing from the world toward the sun.
    ///
    /// Spherical coordinates with polar angle `90 - elevation` and azimuthal
    /// angle `azimuth`, measured from +Z toward +X.
    pub fn sun_position(&self) -> Vec3 {
        let phi = (90.0 - self.elevation).to_radians();
        let theta = self.azimuth.to_radians();
        Vec3::new(phi.sin() * theta.sin(), phi.cos(), phi.sin() * theta.cos())
    }

    /// Direction sunlight travels (sun toward world).
    pub fn sun_rays(&self) -> Vec3 {
        -self.sun_position()
    }

    pub fn scattering(&self) -> ScatteringScale {
        ScatteringScale {
            rayleigh: self.rayleigh,
            mie: (self.turbidity / REFERENCE_TURBIDITY)
                * (self.mie_coefficient / REFERENCE_MIE_COEFFICIENT),
            mie_asymmetry: self.mie_directional_g,
        }
    }

    /// Camera EV100 for the exposure multiplier. Doubling exposure lowers EV100 by one stop.
    pub fn ev100(&self) -> f32 {
        BASE_EV100 - self.exposure.max(MIN_EXPOSURE).log2()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn test_sun_overhead_at_ninety_degrees() {
        let sky = SkySettings {
            elevation: 90.0,
            ..default()
        };
        assert!(approx(sky.sun_position(), Vec3::Y));
        assert!(approx(sky.sun_rays(), Vec3::NEG_Y));
    }

    #[test]
    fn test_sun_on_horizon_follows_azimuth() {
        let south = SkySettings {
            elevation: 0.0,
            azimuth: 180.0,
            ..default()
        };
        assert!(approx(south.sun_position(), Vec3::NEG_Z));

        let east = SkySettings {
            elevation: 0.0,
            azimuth: 90.0,
            ..default()
        };
        assert!(approx(east.sun_position(), Vec3::X));
    }

    #[test]
    fn test_default_sun_sits_just_above_horizon() {
        let sun = SkySettings::default().sun_position();
        assert!((sun.length() - 1.0).abs() < 1e-5);
        assert!(sun.y > 0.0 && sun.y < 0.05);
    }

    #[test]
    fn test_reference_values_leave_earth_untouched() {
        let sky = SkySettings {
            turbidity: REFERENCE_TURBIDITY,
            rayleigh: 1.0,
            mie_coefficient: REFERENCE_MIE_COEFFICIENT,
            mie_directional_g: 0.8,
            ..default()
        };
        let scale = sky.scattering();
        assert_eq!(scale.rayleigh, 1.0);
        assert!((scale.mie - 1.0).abs() < 1e-6);
        assert_eq!(scale.mie_asymmetry, 0.8);
    }

    #[test]
    fn test_exposure_maps_to_stops() {
        let mut sky = SkySettings::default();
        assert!((sky.ev100() - BASE_EV100).abs() < 1e-6);
        sky.exposure = 0.5;
        assert!((sky.ev100() - (BASE_EV100 + 1.0)).abs() < 1e-5);
        sky.exposure = 0.0;
        assert!(sky.ev100().is_finite());
    }

    #[test]
    fn test_clamped_respects_slider_ranges() {
        let wild = SkySettings {
            turbidity: 99.0,
            rayleigh: -1.0,
            mie_coefficient: 3.0,
            mie_directional_g: 2.0,
            elevation: -10.0,
            azimuth: 720.0,
            exposure: 5.0,
        };
        let sky = wild.clamped();
        assert_eq!(sky.turbidity, 20.0);
        assert_eq!(sky.rayleigh, 0.0);
        assert_eq!(sky.mie_coefficient, 0.1);
        assert_eq!(sky.mie_directional_g, 1.0);
        assert_eq!(sky.elevation, 0.0);
        assert_eq!(sky.azimuth, 180.0);
        assert_eq!(sky.exposure, 1.0);
        assert_eq!(SkySettings::default().clamped(), SkySettings::default());
    }
}
