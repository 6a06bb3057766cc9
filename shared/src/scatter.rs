//! Optional field of stackable boxes around the origin.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Edge length of a scattered box.
pub const BOX_SIZE: f32 = 20.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScatterConfig {
    pub enabled: bool,
    pub count: usize,
    /// Fixed seed for a reproducible layout; random when absent.
    pub seed: Option<u64>,
}

impl Default for ScatterConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            count: 500,
            seed: None,
        }
    }
}

/// A box position plus its colour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterBox {
    pub position: Vec3,
    /// Hue in degrees.
    pub hue: f32,
    pub saturation: f32,
    pub lightness: f32,
}

impl ScatterBox {
    pub fn color(&self) -> Color {
        Color::hsl(self.hue, self.saturation, self.lightness)
    }
}

/// Boxes snapped to a 20-unit grid: 20x20 columns, up to 20 levels high.
pub fn scatter_boxes(rng: &mut impl Rng, count: usize) -> Vec<ScatterBox> {
    (0..count)
        .map(|_| {
            let x = (rng.gen::<f32>() * 20.0 - 10.0).floor() * BOX_SIZE;
            let y = (rng.gen::<f32>() * 20.0).floor() * BOX_SIZE + BOX_SIZE * 0.5;
            let z = (rng.gen::<f32>() * 20.0 - 10.0).floor() * BOX_SIZE;
            ScatterBox {
                position: Vec3::new(x, y, z),
                hue: (rng.gen::<f32>() * 0.2 + 0.5) * 360.0,
                saturation: 0.75,
                lightness: rng.gen::<f32>() * 0.25 + 0.75,
            }
        })
        .collect()
}

impl ScatterConfig {
    /// Generate the configured layout, or nothing when disabled.
    pub fn generate(&self) -> Vec<ScatterBox> {
        if !self.enabled {
            return Vec::new();
        }
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        scatter_boxes(&mut rng, self.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boxes_snap_to_grid() {
        let mut rng = StdRng::seed_from_u64(7);
        let boxes = scatter_boxes(&mut rng, 200);
        assert_eq!(boxes.len(), 200);

        for b in &boxes {
            let p = b.position;
            assert_eq!(p.x % BOX_SIZE, 0.0);
            assert_eq!(p.z % BOX_SIZE, 0.0);
            assert_eq!((p.y - 10.0) % BOX_SIZE, 0.0);
            assert!((-200.0..=180.0).contains(&p.x));
            assert!((-200.0..=180.0).contains(&p.z));
            assert!((10.0..=390.0).contains(&p.y));
            assert!((180.0..=252.0).contains(&b.hue));
            assert!((0.75..=1.0).contains(&b.lightness));
        }
    }

    #[test]
    fn test_seeded_layout_is_reproducible() {
        let config = ScatterConfig {
            enabled: true,
            count: 32,
            seed: Some(1234),
        };
        assert_eq!(config.generate(), config.generate());
    }

    #[test]
    fn test_disabled_scatter_is_empty() {
        let config = ScatterConfig {
            seed: Some(1),
            ..Default::default()
        };
        assert!(config.generate().is_empty());
    }
}
