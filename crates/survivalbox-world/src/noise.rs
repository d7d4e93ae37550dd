//! Multi-octave value noise.
//!
//! Each octave draws a random `(f + 1) x (f + 1)` lattice scaled by the
//! octave amplitude and samples it with cosine interpolation. The first
//! octave uses frequency [`BASE_FREQUENCY`] and amplitude 1; every further
//! octave doubles the frequency and halves the amplitude. The summed field
//! is normalized to `[0, 1]`.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Lattice frequency of the first octave.
pub const BASE_FREQUENCY: u32 = 3;

/// A dense `width x height` field of heights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeightField {
    width: u32,
    height: u32,
    /// Row-major heights (`y * width + x`).
    values: Vec<f64>,
}

impl HeightField {
    /// A flat field of zeros.
    pub fn flat(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            values: vec![0.0; (width as usize).saturating_mul(height as usize)],
        }
    }

    /// Width in cells.
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in cells.
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Height at `(x, y)`, or `None` outside the field.
    pub fn get(&self, x: u32, y: u32) -> Option<f64> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.values.get(self.index(x, y)).copied()
    }

    /// All heights in row-major order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    const fn index(&self, x: u32, y: u32) -> usize {
        (y as usize)
            .saturating_mul(self.width as usize)
            .saturating_add(x as usize)
    }
}

/// Cosine interpolation between `a` and `b` at fraction `t`.
pub fn cosine_interpolate(a: f64, b: f64, t: f64) -> f64 {
    let smoothed = (1.0 - (t * core::f64::consts::PI).cos()) / 2.0;
    a.mul_add(1.0 - smoothed, b * smoothed)
}

/// Random lattice of one octave.
struct Lattice {
    frequency: u32,
    values: Vec<f64>,
}

impl Lattice {
    fn random<R: Rng + ?Sized>(frequency: u32, amplitude: f64, rng: &mut R) -> Self {
        let side = (frequency as usize).saturating_add(1);
        let values = (0..side.saturating_mul(side))
            .map(|_| rng.random::<f64>() * amplitude)
            .collect();
        Self { frequency, values }
    }

    fn at(&self, ix: u32, iy: u32) -> f64 {
        let side = (self.frequency as usize).saturating_add(1);
        let index = (ix as usize).saturating_mul(side).saturating_add(iy as usize);
        self.values.get(index).copied().unwrap_or(0.0)
    }

    /// Sample the lattice for grid cell `(x, y)` of a `width x height` field.
    fn sample(&self, x: u32, y: u32, width: u32, height: u32) -> f64 {
        let f = u64::from(self.frequency);
        let ix = u32::try_from(u64::from(x) * f / u64::from(width)).unwrap_or(0);
        let iy = u32::try_from(u64::from(y) * f / u64::from(height)).unwrap_or(0);
        let fx =
            (f64::from(x) / f64::from(width)).mul_add(f64::from(self.frequency), -f64::from(ix));
        let fy =
            (f64::from(y) / f64::from(height)).mul_add(f64::from(self.frequency), -f64::from(iy));

        let v1 = self.at(ix, iy);
        let v2 = self.at(ix.saturating_add(1), iy);
        let v3 = self.at(ix, iy.saturating_add(1));
        let v4 = self.at(ix.saturating_add(1), iy.saturating_add(1));

        let top = cosine_interpolate(v1, v2, fx);
        let bottom = cosine_interpolate(v3, v4, fx);
        cosine_interpolate(top, bottom, fy)
    }
}

/// Generate a normalized `width x height` height field.
///
/// With zero octaves, or a zero-sized map, the field is flat.
pub fn calculate<R: Rng + ?Sized>(
    width: u32,
    height: u32,
    octaves: u32,
    rng: &mut R,
) -> HeightField {
    let mut field = HeightField::flat(width, height);
    if width == 0 || height == 0 {
        return field;
    }

    let mut frequency = BASE_FREQUENCY;
    let mut amplitude = 1.0_f64;
    for _ in 0..octaves {
        let lattice = Lattice::random(frequency, amplitude, rng);
        for y in 0..height {
            for x in 0..width {
                let index = field.index(x, y);
                if let Some(value) = field.values.get_mut(index) {
                    *value += lattice.sample(x, y, width, height);
                }
            }
        }
        frequency = frequency.saturating_mul(2);
        amplitude /= 2.0;
    }

    normalize(&mut field.values);
    field
}

/// Shift the minimum to 0, then scale the maximum to 1.
fn normalize(values: &mut [f64]) {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    if !min.is_finite() {
        return;
    }
    for value in &mut *values {
        *value -= min;
    }
    let max = values.iter().copied().fold(0.0_f64, f64::max);
    if max > 0.0 {
        for value in &mut *values {
            *value /= max;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn field_is_normalized() {
        let mut rng = StdRng::seed_from_u64(24);
        let field = calculate(40, 30, 8, &mut rng);
        assert_eq!(field.values().len(), 1200);
        let min = field.values().iter().copied().fold(f64::INFINITY, f64::min);
        let max = field.values().iter().copied().fold(f64::NEG_INFINITY, f64::max);
        assert!(min.abs() < 1e-12);
        assert!((max - 1.0).abs() < 1e-12);
        assert!(field.values().iter().all(|v| (0.0..=1.0).contains(v)));
    }

    #[test]
    fn same_seed_same_field() {
        let a = calculate(16, 16, 4, &mut StdRng::seed_from_u64(7));
        let b = calculate(16, 16, 4, &mut StdRng::seed_from_u64(7));
        let c = calculate(16, 16, 4, &mut StdRng::seed_from_u64(8));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn zero_octaves_is_flat() {
        let field = calculate(5, 5, 0, &mut StdRng::seed_from_u64(1));
        assert!(field.values().iter().all(|v| v.abs() < f64::EPSILON));
    }

    #[test]
    fn interpolation_hits_endpoints() {
        assert!((cosine_interpolate(2.0, 6.0, 0.0) - 2.0).abs() < 1e-12);
        assert!((cosine_interpolate(2.0, 6.0, 1.0) - 6.0).abs() < 1e-12);
        assert!((cosine_interpolate(2.0, 6.0, 0.5) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn get_is_bounds_checked() {
        let field = HeightField::flat(3, 2);
        assert_eq!(field.get(2, 1), Some(0.0));
        assert_eq!(field.get(3, 0), None);
        assert_eq!(field.get(0, 2), None);
    }
}
