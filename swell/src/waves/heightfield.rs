//! Animated wave heightfield.
//!
//! A fixed (N + 1)² grid of vertices whose elevations are recomputed in place
//! every tick from the configured octaves, plus point queries that interpolate
//! the grid at arbitrary world positions.

use bevy::math::{Vec2, Vec3};
use bevy_log::{debug, trace};
use std::f32::consts::TAU;

use super::config::{HeightFieldConfig, Octave};
use super::noise::WaveNoise;
use crate::constants::SAMPLE_EPSILON;
use crate::error::ConfigError;

/// Anything that can report the water height under a world position.
pub trait SurfaceSampler {
    fn sample_height(&self, position: Vec3) -> f32;
}

#[derive(Debug, Clone)]
pub struct HeightField {
    dimension: u32,
    octaves: Vec<Octave>,
    noise: WaveNoise,
    origin: Vec3,
    scale: Vec3,
    uv_scale: f32,
    vertices: Vec<Vec3>,
    time: f32,
}

impl HeightField {
    /// Builds a flat grid from `config`. Elevations stay at zero until the
    /// first [`HeightField::regenerate`].
    pub fn new(config: HeightFieldConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let side = config.dimension as usize + 1;
        let mut vertices = Vec::with_capacity(side * side);
        for x in 0..=config.dimension {
            for z in 0..=config.dimension {
                vertices.push(Vec3::new(x as f32, 0.0, z as f32));
            }
        }

        debug!(
            "Built {}x{} wave grid with {} octave(s)",
            side,
            side,
            config.octaves.len()
        );

        Ok(Self {
            dimension: config.dimension,
            octaves: config.octaves,
            noise: WaveNoise::new(config.seed),
            origin: config.origin,
            scale: config.scale,
            uv_scale: config.uv_scale,
            vertices,
            time: 0.0,
        })
    }

    #[inline]
    pub fn index(&self, x: u32, z: u32) -> usize {
        (x * (self.dimension + 1) + z) as usize
    }

    pub fn dimension(&self) -> u32 {
        self.dimension
    }

    pub fn octaves(&self) -> &[Octave] {
        &self.octaves
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    pub fn uv_scale(&self) -> f32 {
        self.uv_scale
    }

    /// Time of the last regeneration.
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Grid-space vertices; x and z are the integer grid coordinates, y the elevation.
    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn vertex(&self, x: u32, z: u32) -> Vec3 {
        self.vertices[self.index(x, z)]
    }

    /// Recomputes every vertex elevation for `time`, in place.
    pub fn regenerate(&mut self, time: f32) {
        let side = self.dimension + 1;
        for x in 0..side {
            for z in 0..side {
                let i = self.index(x, z);
                self.vertices[i].y = self.elevation(x, z, time);
            }
        }
        self.time = time;
        trace!("Regenerated wave grid at t = {time:.3}");
    }

    /// Elevation of grid vertex (x, z) at `time`, before world scaling.
    pub fn elevation(&self, x: u32, z: u32, time: f32) -> f32 {
        let n = self.dimension as f32;
        let (x, z) = (x as f32, z as f32);

        self.octaves
            .iter()
            .map(|octave| {
                if octave.alternate {
                    let perl = self
                        .noise
                        .sample(x * octave.scale.x / n, z * octave.scale.y / n)
                        * TAU;
                    (perl + octave.speed.length() * time).cos() * octave.height
                } else {
                    let perl = self.noise.sample(
                        (x * octave.scale.x + time * octave.speed.x) / n,
                        (z * octave.scale.y + time * octave.speed.y) / n,
                    ) - 0.5;
                    perl * octave.height
                }
            })
            .sum()
    }

    /// Converts a world position to unscaled grid space (x, z).
    pub fn to_grid(&self, position: Vec3) -> Vec2 {
        Vec2::new(
            (position.x - self.origin.x) / self.scale.x,
            (position.z - self.origin.z) / self.scale.z,
        )
    }

    /// Water height at a world position.
    ///
    /// The four lattice corners around the point are weighted by how much
    /// closer each is than the farthest one, so the farthest corner contributes
    /// almost nothing. This is not bilinear interpolation. The fourth corner
    /// carries an extra [`SAMPLE_EPSILON`] to keep the normaliser non-zero.
    /// Queries outside the grid are clamped onto its boundary first, so they
    /// return exactly what the nearest boundary position returns.
    pub fn sample_height(&self, position: Vec3) -> f32 {
        let n = self.dimension as f32;
        let local = self.to_grid(position).clamp(Vec2::ZERO, Vec2::splat(n));

        let (x0, x1) = (local.x.floor(), local.x.ceil());
        let (z0, z1) = (local.y.floor(), local.y.ceil());

        let corners = [
            Vec2::new(x0, z0),
            Vec2::new(x0, z1),
            Vec2::new(x1, z0),
            Vec2::new(x1, z1),
        ];
        let distances = corners.map(|c| c.distance(local));
        let heights = corners.map(|c| self.vertex(c.x as u32, c.y as u32).y);

        let max = distances[0]
            .max(distances[1])
            .max(distances[2])
            .max(distances[3] + SAMPLE_EPSILON);
        let min = distances.iter().copied().fold(f32::INFINITY, f32::min);

        // All corners equidistant (lattice point or cell centre): every weight
        // vanishes, so fall back to the plain mean.
        let height = if max - min <= 2.0 * SAMPLE_EPSILON {
            heights.iter().sum::<f32>() / 4.0
        } else {
            let weights = distances.map(|d| max - d);
            let total = weights.iter().sum::<f32>() + SAMPLE_EPSILON;
            heights
                .iter()
                .zip(weights.iter())
                .map(|(h, w)| h * w)
                .sum::<f32>()
                / total
        };

        self.origin.y + height * self.scale.y
    }
}

impl SurfaceSampler for HeightField {
    #[inline]
    fn sample_height(&self, position: Vec3) -> f32 {
        HeightField::sample_height(self, position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::waves::config::WavePreset;

    fn swell(dimension: u32) -> HeightField {
        let mut field = HeightField::new(WavePreset::Swell.to_config(dimension)).unwrap();
        field.regenerate(1.7);
        field
    }

    #[test]
    fn test_vertex_layout() {
        let field = HeightField::new(WavePreset::Calm.to_config(3)).unwrap();
        assert_eq!(field.vertices().len(), 16);
        assert_eq!(field.index(2, 1), 9);
        assert_eq!(field.vertex(2, 1), Vec3::new(2.0, 0.0, 1.0));
        for v in field.vertices() {
            assert!((0.0..=3.0).contains(&v.x));
            assert!((0.0..=3.0).contains(&v.z));
        }
    }

    #[test]
    fn test_invalid_config_fails_fast() {
        assert!(matches!(
            HeightField::new(WavePreset::Calm.to_config(0)),
            Err(ConfigError::InvalidDimension(0))
        ));
        assert!(matches!(
            HeightField::new(HeightFieldConfig::new(4, Vec::new())),
            Err(ConfigError::NoOctaves)
        ));
    }

    #[test]
    fn test_regenerate_is_deterministic() {
        let a = swell(6);
        let b = swell(6);
        assert_eq!(a.vertices(), b.vertices());

        let mut c = HeightField::new(WavePreset::Swell.to_config(6)).unwrap();
        c.regenerate(42.0);
        c.regenerate(1.7);
        assert_eq!(a.vertices(), c.vertices());
    }

    #[test]
    fn test_regenerate_keeps_grid_coordinates() {
        let field = swell(5);
        for x in 0..=5 {
            for z in 0..=5 {
                let v = field.vertex(x, z);
                assert_eq!(v.x, x as f32);
                assert_eq!(v.z, z as f32);
            }
        }
    }

    #[test]
    fn test_single_octave_reference_table() {
        let config = HeightFieldConfig::new(
            2,
            vec![Octave::new(Vec2::ZERO, Vec2::ONE, 1.0)],
        );
        let mut field = HeightField::new(config).unwrap();
        field.regenerate(0.0);

        // Gradient noise vanishes on integer inputs, which the [0, 1] remap
        // centres on 0.5, so those vertices sit exactly at rest height.
        #[rustfmt::skip]
        let reference: [[Option<f32>; 3]; 3] = [
            [Some(0.0), None, Some(0.0)],
            [None,      None, None],
            [Some(0.0), None, Some(0.0)],
        ];
        for x in 0..=2u32 {
            for z in 0..=2u32 {
                let y = field.vertex(x, z).y;
                match reference[x as usize][z as usize] {
                    Some(expected) => assert!((y - expected).abs() < 1e-6, "({x}, {z}): {y}"),
                    None => assert!((-0.5..=0.5).contains(&y), "({x}, {z}): {y}"),
                }
            }
        }
    }

    #[test]
    fn test_lattice_inputs_are_seed_independent() {
        // Scale = dimension puts every noise input on an integer.
        for seed in [0, 7, 90210] {
            let config = HeightFieldConfig::new(
                2,
                vec![
                    Octave::new(Vec2::ZERO, Vec2::splat(2.0), 1.0),
                    Octave::alternate(Vec2::new(3.0, 4.0), Vec2::splat(2.0), 2.0),
                ],
            )
            .with_seed(seed);
            let mut field = HeightField::new(config).unwrap();

            // Alternate phase is 0.5 * TAU, so the octave reads -2 cos(5t).
            for (t, expected) in [(0.0, -2.0), (0.2, -1.080_604_6), (1.0, -0.567_324_4)] {
                field.regenerate(t);
                for v in field.vertices() {
                    assert!((v.y - expected).abs() < 1e-4, "seed {seed}, t = {t}: {}", v.y);
                }
            }
        }
    }

    #[test]
    fn test_alternate_octave_oscillates() {
        let octave = Octave::alternate(Vec2::new(3.0, 4.0), Vec2::ONE, 2.0);
        let mut field = HeightField::new(HeightFieldConfig::new(4, vec![octave])).unwrap();
        let noise = WaveNoise::new(0);

        for t in [0.0, 0.5, 1.25] {
            field.regenerate(t);
            let phase = noise.sample(1.0 / 4.0, 3.0 / 4.0) * TAU;
            let expected = (phase + 5.0 * t).cos() * 2.0;
            assert!((field.vertex(1, 3).y - expected).abs() < 1e-5);
            assert!(field.vertex(1, 3).y.abs() <= 2.0 + 1e-6);
        }
    }

    #[test]
    fn test_zero_height_octaves_are_flat() {
        let mut field = HeightField::new(WavePreset::Still.to_config(4)).unwrap();
        field.regenerate(3.0);
        assert!(field.vertices().iter().all(|v| v.y == 0.0));
        assert_eq!(field.sample_height(Vec3::new(1.3, 5.0, 2.6)), 0.0);
    }

    #[test]
    fn test_sample_at_lattice_point_returns_vertex() {
        let config = WavePreset::Swell
            .to_config(6)
            .with_origin(Vec3::new(-3.0, 0.0, 10.0))
            .with_scale(Vec3::new(2.0, 1.5, 0.5));
        let mut field = HeightField::new(config).unwrap();
        field.regenerate(0.8);

        for x in 0..=6 {
            for z in 0..=6 {
                let world = Vec3::new(-3.0 + x as f32 * 2.0, 0.0, 10.0 + z as f32 * 0.5);
                let expected = field.vertex(x, z).y * 1.5;
                let got = field.sample_height(world);
                assert!((got - expected).abs() < 1e-5, "({x}, {z}): {got} vs {expected}");
            }
        }
    }

    #[test]
    fn test_sample_adds_origin_height() {
        let config = WavePreset::Swell
            .to_config(4)
            .with_origin(Vec3::new(0.0, 12.0, 0.0));
        let mut field = HeightField::new(config).unwrap();
        field.regenerate(0.3);
        let got = field.sample_height(Vec3::new(2.0, 0.0, 2.0));
        assert!((got - (12.0 + field.vertex(2, 2).y)).abs() < 1e-5);
    }

    #[test]
    fn test_sample_weights_nearest_corners() {
        let field = swell(4);
        let corners = [
            field.vertex(1, 2).y,
            field.vertex(1, 3).y,
            field.vertex(2, 2).y,
            field.vertex(2, 3).y,
        ];
        let lo = corners.iter().copied().fold(f32::INFINITY, f32::min);
        let hi = corners.iter().copied().fold(f32::NEG_INFINITY, f32::max);

        for (fx, fz) in [(0.1, 0.2), (0.4, 0.9), (0.75, 0.3), (0.5, 0.05)] {
            let h = field.sample_height(Vec3::new(1.0 + fx, 0.0, 2.0 + fz));
            assert!(h >= lo - 1e-5 && h <= hi + 1e-5, "{h} outside [{lo}, {hi}]");
        }

        // The farthest corner gets no weight.
        let near = field.sample_height(Vec3::new(1.1, 0.0, 2.1));
        let d = [
            Vec2::new(0.1, 0.1).length(),
            Vec2::new(0.1, 0.9).length(),
            Vec2::new(0.9, 0.1).length(),
        ];
        let max = Vec2::new(0.9, 0.9).length() + SAMPLE_EPSILON;
        let w = d.map(|d| max - d);
        let expected = (corners[0] * w[0] + corners[1] * w[1] + corners[2] * w[2]
            + corners[3] * SAMPLE_EPSILON)
            / (w[0] + w[1] + w[2] + 2.0 * SAMPLE_EPSILON);
        assert!((near - expected).abs() < 1e-4);
    }

    #[test]
    fn test_sample_is_continuous_within_cell() {
        let field = swell(6);
        let step = 1e-3;
        let mut t = 0.05f32;
        while t < 0.45 {
            let a = field.sample_height(Vec3::new(2.0 + t, 0.0, 3.0 + 0.3 * t));
            let b = field.sample_height(Vec3::new(2.0 + t + step, 0.0, 3.0 + 0.3 * (t + step)));
            assert!((a - b).abs() < 0.05, "jump {} at t = {t}", (a - b).abs());
            t += step;
        }
    }

    #[test]
    fn test_sample_outside_grid_saturates_to_boundary() {
        let field = swell(4);
        let cases = [
            (Vec3::new(-5.0, 0.0, 1.3), Vec3::new(0.0, 0.0, 1.3)),
            (Vec3::new(9.0, 0.0, 2.2), Vec3::new(4.0, 0.0, 2.2)),
            (Vec3::new(3.4, 0.0, -0.7), Vec3::new(3.4, 0.0, 0.0)),
            (Vec3::new(1.6, 0.0, 12.0), Vec3::new(1.6, 0.0, 4.0)),
            (Vec3::new(-8.0, 0.0, -8.0), Vec3::new(0.0, 0.0, 0.0)),
            (Vec3::new(100.0, 0.0, 100.0), Vec3::new(4.0, 0.0, 4.0)),
            (Vec3::new(1.0e4, 0.0, 1.3), Vec3::new(4.0, 0.0, 1.3)),
            (Vec3::new(1.0e5, 0.0, 1.3), Vec3::new(4.0, 0.0, 1.3)),
            (Vec3::new(2.7, 0.0, -1.0e5), Vec3::new(2.7, 0.0, 0.0)),
        ];
        for (outside, clamped) in cases {
            let a = field.sample_height(outside);
            let b = field.sample_height(clamped);
            assert_eq!(a, b, "{outside:?}");
        }
    }

    #[test]
    fn test_far_query_does_not_average_boundary_row() {
        let mut field = HeightField::new(WavePreset::Still.to_config(4)).unwrap();
        for x in 0..=4 {
            for z in 0..=4 {
                let i = field.index(x, z);
                field.vertices[i].y = (x * 10 + z) as f32;
            }
        }

        let edge = field.sample_height(Vec3::new(4.0, 0.0, 1.3));
        assert!((edge - 41.0).abs() < 0.01, "{edge}");
        for x in [100.0, 1.0e4, 1.0e5] {
            assert_eq!(field.sample_height(Vec3::new(x, 0.0, 1.3)), edge, "x = {x}");
        }
    }
}
