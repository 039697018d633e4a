//! Perlin gradient noise.
//!
//! Improved noise over a fixed permutation table: the same point always
//! yields the same value, so bump-mapped renders are reproducible.

use lumen_math::DVec3;

const PERM: [u8; 256] = [
    151, 160, 137, 91, 90, 15, 131, 13, 201, 95, 96, 53, 194, 233, 7, 225,
    140, 36, 103, 30, 69, 142, 8, 99, 37, 240, 21, 10, 23, 190, 6, 148,
    247, 120, 234, 75, 0, 26, 197, 62, 94, 252, 219, 203, 117, 35, 11, 32,
    57, 177, 33, 88, 237, 149, 56, 87, 174, 20, 125, 136, 171, 168, 68, 175,
    74, 165, 71, 134, 139, 48, 27, 166, 77, 146, 158, 231, 83, 111, 229, 122,
    60, 211, 133, 230, 220, 105, 92, 41, 55, 46, 245, 40, 244, 102, 143, 54,
    65, 25, 63, 161, 1, 216, 80, 73, 209, 76, 132, 187, 208, 89, 18, 169,
    200, 196, 135, 130, 116, 188, 159, 86, 164, 100, 109, 198, 173, 186, 3, 64,
    52, 217, 226, 250, 124, 123, 5, 202, 38, 147, 118, 126, 255, 82, 85, 212,
    207, 206, 59, 227, 47, 16, 58, 17, 182, 189, 28, 42, 223, 183, 170, 213,
    119, 248, 152, 2, 44, 154, 163, 70, 221, 153, 101, 155, 167, 43, 172, 9,
    129, 22, 39, 253, 19, 98, 108, 110, 79, 113, 224, 232, 178, 185, 112, 104,
    218, 246, 97, 228, 251, 34, 242, 193, 238, 210, 144, 12, 191, 179, 162, 241,
    81, 51, 145, 235, 249, 14, 239, 107, 49, 192, 214, 31, 181, 199, 106, 157,
    184, 84, 204, 176, 115, 121, 50, 45, 127, 4, 150, 254, 138, 236, 205, 93,
    222, 114, 67, 29, 24, 72, 243, 141, 128, 195, 78, 66, 215, 61, 156, 180,
];

fn hash(x: i64, y: i64, z: i64) -> u8 {
    let h = PERM[(x & 255) as usize] as i64;
    let h = PERM[((h + y) & 255) as usize] as i64;
    PERM[((h + z) & 255) as usize]
}

/// Dot product of the offset with one of twelve edge gradients picked by
/// the low bits of the hash.
fn grad(hash: u8, dx: f64, dy: f64, dz: f64) -> f64 {
    let h = hash & 15;
    let u = if h < 8 { dx } else { dy };
    let v = if h < 4 {
        dy
    } else if h == 12 || h == 14 {
        dx
    } else {
        dz
    };

    let a = if h & 1 == 0 { u } else { -u };
    let b = if h & 2 == 0 { v } else { -v };
    a + b
}

/// Quintic fade 6t^5 - 15t^4 + 10t^3.
fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

fn lerp(t: f64, a: f64, b: f64) -> f64 {
    a + t * (b - a)
}

/// Noise at `p`, roughly in [-1, 1] and exactly zero on integer lattice
/// points.
pub fn perlin(p: DVec3) -> f64 {
    let cell = p.floor();
    let (ix, iy, iz) = (cell.x as i64, cell.y as i64, cell.z as i64);
    let d = p - cell;

    let (u, v, w) = (fade(d.x), fade(d.y), fade(d.z));

    let corner = |ox: i64, oy: i64, oz: i64| {
        grad(
            hash(ix + ox, iy + oy, iz + oz),
            d.x - ox as f64,
            d.y - oy as f64,
            d.z - oz as f64,
        )
    };

    let x00 = lerp(u, corner(0, 0, 0), corner(1, 0, 0));
    let x10 = lerp(u, corner(0, 1, 0), corner(1, 1, 0));
    let x01 = lerp(u, corner(0, 0, 1), corner(1, 0, 1));
    let x11 = lerp(u, corner(0, 1, 1), corner(1, 1, 1));

    lerp(w, lerp(v, x00, x10), lerp(v, x01, x11))
}

/// Fractional Brownian motion: `octaves` layers of noise, each at
/// double the frequency and `gain` times the amplitude of the last.
pub fn fbm(p: DVec3, octaves: u32, gain: f64) -> f64 {
    let mut sum = 0.0;
    let mut frequency = 1.0;
    let mut amplitude = 1.0;
    for _ in 0..octaves {
        sum += amplitude * perlin(p * frequency);
        frequency *= 2.0;
        amplitude *= gain;
    }
    sum
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_on_lattice_points() {
        for p in [DVec3::ZERO, DVec3::new(1.0, 2.0, 3.0), DVec3::new(-4.0, 7.0, -1.0)] {
            assert_eq!(perlin(p), 0.0);
        }
    }

    #[test]
    fn test_deterministic() {
        let p = DVec3::new(0.37, -1.42, 5.9);
        assert_eq!(perlin(p), perlin(p));
    }

    #[test]
    fn test_varies_and_stays_bounded() {
        let mut distinct = false;
        let first = perlin(DVec3::new(0.5, 0.5, 0.5));
        for i in 0..200 {
            let t = i as f64 * 0.173;
            let n = perlin(DVec3::new(t, t * 0.7 - 3.0, 2.0 - t * 1.3));
            assert!(n.abs() <= 1.5, "noise out of range: {n}");
            if (n - first).abs() > 1e-6 {
                distinct = true;
            }
        }
        assert!(distinct);
    }

    #[test]
    fn test_continuous() {
        let p = DVec3::new(1.3, 2.7, -0.4);
        let q = p + DVec3::splat(1e-7);
        assert!((perlin(p) - perlin(q)).abs() < 1e-5);
    }

    #[test]
    fn test_fbm_single_octave_is_noise() {
        let p = DVec3::new(0.2, 0.9, 3.3);
        assert_eq!(fbm(p, 1, 0.5), perlin(p));
        assert_eq!(fbm(p, 0, 0.5), 0.0);
    }
}
