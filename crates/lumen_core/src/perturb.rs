//! Bump mapping by normal perturbation.

use lumen_math::{DVec3, EPSILON};

use crate::noise;

/// A scalar field whose gradient tilts surface normals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Perturbation {
    /// Perlin noise sampled at `point * frequency`, tilting by `scale`
    Noise { scale: f64, frequency: f64 },
    /// Sum of sines along each axis, tilting by `amplitude`
    Sine { amplitude: f64, frequency: f64 },
}

impl Perturbation {
    fn field(&self, p: DVec3) -> f64 {
        match *self {
            Perturbation::Noise { frequency, .. } => noise::perlin(p * frequency),
            Perturbation::Sine { frequency, .. } => {
                let q = p * frequency;
                q.x.sin() + q.y.sin() + q.z.sin()
            }
        }
    }

    fn strength(&self) -> f64 {
        match *self {
            Perturbation::Noise { scale, .. } => scale,
            Perturbation::Sine { amplitude, .. } => amplitude,
        }
    }

    /// Central-difference gradient of the field at `p`.
    pub fn gradient(&self, p: DVec3) -> DVec3 {
        let axis = |e: DVec3| (self.field(p + e) - self.field(p - e)) / (2.0 * EPSILON);
        DVec3::new(
            axis(DVec3::X * EPSILON),
            axis(DVec3::Y * EPSILON),
            axis(DVec3::Z * EPSILON),
        )
    }

    /// Tilt an object-space normal at object-space point `p`.
    pub fn perturb(&self, p: DVec3, normal: DVec3) -> DVec3 {
        (normal + self.gradient(p) * self.strength()).normalize_or_zero()
    }
}
