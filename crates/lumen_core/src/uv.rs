//! Texture-space mappings: 3D point to (u, v), and patterns defined on (u, v).

use std::f64::consts::PI;
use std::sync::Arc;

use lumen_math::{Color, DVec2, DVec3};

use crate::texture::Texture;

/// Projection from an object-space point to (u, v) in [0, 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UvMapping {
    /// Longitude/latitude on the unit sphere
    Spherical,
    /// The xz plane, tiled every unit
    Planar,
    /// Around the y axis, tiled every unit of height
    Cylindrical,
}

impl UvMapping {
    pub fn map(&self, p: DVec3) -> DVec2 {
        match self {
            UvMapping::Spherical => spherical_map(p),
            UvMapping::Planar => DVec2::new(p.x.rem_euclid(1.0), p.z.rem_euclid(1.0)),
            UvMapping::Cylindrical => {
                let theta = p.x.atan2(p.z);
                let u = 1.0 - (theta / (2.0 * PI) + 0.5);
                DVec2::new(u, p.y.rem_euclid(1.0))
            }
        }
    }
}

fn spherical_map(p: DVec3) -> DVec2 {
    let theta = p.x.atan2(p.z);
    let radius = p.length();
    if radius == 0.0 {
        return DVec2::ZERO;
    }
    let phi = (p.y / radius).clamp(-1.0, 1.0).acos();

    let raw_u = theta / (2.0 * PI);
    DVec2::new(1.0 - (raw_u + 0.5), 1.0 - phi / PI)
}

/// Face of the axis-aligned cube from -1 to 1. The discriminant order
/// matches the face order of a cube map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CubeFace {
    Left,
    Front,
    Right,
    Back,
    Up,
    Down,
}

impl CubeFace {
    pub fn index(self) -> usize {
        self as usize
    }
}

/// The face a point belongs to: the axis with the largest magnitude.
pub fn cube_face(p: DVec3) -> CubeFace {
    let coord = p.abs().max_element();

    if coord == p.x {
        CubeFace::Right
    } else if coord == -p.x {
        CubeFace::Left
    } else if coord == p.y {
        CubeFace::Up
    } else if coord == -p.y {
        CubeFace::Down
    } else if coord == p.z {
        CubeFace::Front
    } else {
        CubeFace::Back
    }
}

/// (u, v) of a point on the given cube face.
pub fn cube_uv(face: CubeFace, p: DVec3) -> DVec2 {
    let wrap = |x: f64| x.rem_euclid(2.0) / 2.0;

    match face {
        CubeFace::Front => DVec2::new(wrap(p.x + 1.0), wrap(p.y + 1.0)),
        CubeFace::Back => DVec2::new(wrap(1.0 - p.x), wrap(p.y + 1.0)),
        CubeFace::Left => DVec2::new(wrap(p.z + 1.0), wrap(p.y + 1.0)),
        CubeFace::Right => DVec2::new(wrap(1.0 - p.z), wrap(p.y + 1.0)),
        CubeFace::Up => DVec2::new(wrap(p.x + 1.0), wrap(1.0 - p.z)),
        CubeFace::Down => DVec2::new(wrap(p.x + 1.0), wrap(p.z + 1.0)),
    }
}

/// A colour function on (u, v).
#[derive(Debug, Clone, PartialEq)]
pub enum UvPattern {
    Checkers {
        width: f64,
        height: f64,
        a: Color,
        b: Color,
    },
    /// Solid `main` with a distinct colour in each corner, for checking
    /// the orientation of a mapping.
    AlignCheck {
        main: Color,
        ul: Color,
        ur: Color,
        bl: Color,
        br: Color,
    },
    Image(Arc<Texture>),
}

impl UvPattern {
    pub fn color_at(&self, uv: DVec2) -> Color {
        let (u, v) = (uv.x, uv.y);
        match self {
            UvPattern::Checkers {
                width,
                height,
                a,
                b,
            } => {
                let cell = (u * width).floor() + (v * height).floor();
                if cell.rem_euclid(2.0) == 0.0 {
                    *a
                } else {
                    *b
                }
            }
            UvPattern::AlignCheck {
                main,
                ul,
                ur,
                bl,
                br,
            } => {
                if v > 0.8 {
                    if u < 0.2 {
                        return *ul;
                    }
                    if u > 0.8 {
                        return *ur;
                    }
                } else if v < 0.2 {
                    if u < 0.2 {
                        return *bl;
                    }
                    if u > 0.8 {
                        return *br;
                    }
                }
                *main
            }
            UvPattern::Image(texture) => texture.sample(u, v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: DVec2, b: DVec2) -> bool {
        (a - b).length() < 1e-9
    }

    #[test]
    fn test_checkers_in_uv() {
        let p = UvPattern::Checkers {
            width: 2.0,
            height: 2.0,
            a: Color::ZERO,
            b: Color::ONE,
        };
        let cases = [
            (0.0, 0.0, Color::ZERO),
            (0.5, 0.0, Color::ONE),
            (0.0, 0.5, Color::ONE),
            (0.5, 0.5, Color::ZERO),
            (1.0, 1.0, Color::ZERO),
        ];
        for (u, v, expected) in cases {
            assert_eq!(p.color_at(DVec2::new(u, v)), expected);
        }
    }

    #[test]
    fn test_spherical_mapping() {
        let k = 2f64.sqrt() / 2.0;
        let cases = [
            (DVec3::new(0.0, 0.0, -1.0), DVec2::new(0.0, 0.5)),
            (DVec3::new(1.0, 0.0, 0.0), DVec2::new(0.25, 0.5)),
            (DVec3::new(0.0, 0.0, 1.0), DVec2::new(0.5, 0.5)),
            (DVec3::new(-1.0, 0.0, 0.0), DVec2::new(0.75, 0.5)),
            (DVec3::new(0.0, 1.0, 0.0), DVec2::new(0.5, 1.0)),
            (DVec3::new(0.0, -1.0, 0.0), DVec2::new(0.5, 0.0)),
            (DVec3::new(k, k, 0.0), DVec2::new(0.25, 0.75)),
        ];
        for (p, expected) in cases {
            assert!(close(UvMapping::Spherical.map(p), expected), "{p:?}");
        }
    }

    #[test]
    fn test_planar_mapping() {
        let cases = [
            (DVec3::new(0.25, 0.0, 0.5), DVec2::new(0.25, 0.5)),
            (DVec3::new(0.25, 0.0, -0.25), DVec2::new(0.25, 0.75)),
            (DVec3::new(0.25, 0.5, -0.25), DVec2::new(0.25, 0.75)),
            (DVec3::new(1.25, 0.0, 0.5), DVec2::new(0.25, 0.5)),
            (DVec3::new(0.25, 0.0, -1.75), DVec2::new(0.25, 0.25)),
            (DVec3::new(1.0, 0.0, -1.0), DVec2::new(0.0, 0.0)),
            (DVec3::new(0.0, 0.0, 0.0), DVec2::new(0.0, 0.0)),
        ];
        for (p, expected) in cases {
            assert!(close(UvMapping::Planar.map(p), expected), "{p:?}");
        }
    }

    #[test]
    fn test_cylindrical_mapping() {
        let k = 2f64.sqrt() / 2.0;
        let cases = [
            (DVec3::new(0.0, 0.0, -1.0), DVec2::new(0.0, 0.0)),
            (DVec3::new(0.0, 0.5, -1.0), DVec2::new(0.0, 0.5)),
            (DVec3::new(0.0, 1.0, -1.0), DVec2::new(0.0, 0.0)),
            (DVec3::new(k, 0.5, -k), DVec2::new(0.125, 0.5)),
            (DVec3::new(1.0, 0.5, 0.0), DVec2::new(0.25, 0.5)),
            (DVec3::new(k, 0.5, k), DVec2::new(0.375, 0.5)),
            (DVec3::new(0.0, -0.25, 1.0), DVec2::new(0.5, 0.75)),
            (DVec3::new(-k, 0.5, k), DVec2::new(0.625, 0.5)),
            (DVec3::new(-1.0, 1.25, 0.0), DVec2::new(0.75, 0.25)),
            (DVec3::new(-k, 0.5, -k), DVec2::new(0.875, 0.5)),
        ];
        for (p, expected) in cases {
            assert!(close(UvMapping::Cylindrical.map(p), expected), "{p:?}");
        }
    }

    #[test]
    fn test_align_check_corners() {
        let white = Color::ONE;
        let p = UvPattern::AlignCheck {
            main: white,
            ul: Color::new(1.0, 0.0, 0.0),
            ur: Color::new(1.0, 1.0, 0.0),
            bl: Color::new(0.0, 1.0, 0.0),
            br: Color::new(0.0, 1.0, 1.0),
        };
        assert_eq!(p.color_at(DVec2::new(0.5, 0.5)), white);
        assert_eq!(p.color_at(DVec2::new(0.1, 0.9)), Color::new(1.0, 0.0, 0.0));
        assert_eq!(p.color_at(DVec2::new(0.9, 0.9)), Color::new(1.0, 1.0, 0.0));
        assert_eq!(p.color_at(DVec2::new(0.1, 0.1)), Color::new(0.0, 1.0, 0.0));
        assert_eq!(p.color_at(DVec2::new(0.9, 0.1)), Color::new(0.0, 1.0, 1.0));
    }

    #[test]
    fn test_cube_face_selection() {
        let cases = [
            (DVec3::new(-1.0, 0.5, -0.25), CubeFace::Left),
            (DVec3::new(1.1, -0.75, 0.8), CubeFace::Right),
            (DVec3::new(0.1, 0.6, 0.9), CubeFace::Front),
            (DVec3::new(-0.7, 0.0, -2.0), CubeFace::Back),
            (DVec3::new(0.5, 1.0, 0.9), CubeFace::Up),
            (DVec3::new(-0.2, -1.3, 1.1), CubeFace::Down),
            (DVec3::new(-1.0, 0.0, 0.0), CubeFace::Left),
        ];
        for (p, expected) in cases {
            assert_eq!(cube_face(p), expected, "{p:?}");
        }
    }

    #[test]
    fn test_cube_uv_per_face() {
        let cases = [
            (CubeFace::Front, DVec3::new(-0.5, 0.5, 1.0), DVec2::new(0.25, 0.75)),
            (CubeFace::Front, DVec3::new(0.5, -0.5, 1.0), DVec2::new(0.75, 0.25)),
            (CubeFace::Back, DVec3::new(0.5, 0.5, -1.0), DVec2::new(0.25, 0.75)),
            (CubeFace::Left, DVec3::new(-1.0, 0.5, -0.5), DVec2::new(0.25, 0.75)),
            (CubeFace::Right, DVec3::new(1.0, 0.5, 0.5), DVec2::new(0.25, 0.75)),
            (CubeFace::Up, DVec3::new(-0.5, 1.0, -0.5), DVec2::new(0.25, 0.75)),
            (CubeFace::Down, DVec3::new(-0.5, -1.0, 0.5), DVec2::new(0.25, 0.75)),
        ];
        for (face, p, expected) in cases {
            assert!(close(cube_uv(face, p), expected), "{face:?} {p:?}");
        }
    }
}
