//! Polygon meshes assembled from pre-parsed vertex arrays.
//!
//! Faces are fan-triangulated on construction. A mesh is a single shape in
//! the arena; its triangles are tested linearly behind one bounding-box
//! check.

use lumen_math::{Aabb, DVec2, DVec3, Ray};

use crate::arena::ShapeId;
use crate::error::{SceneError, SceneResult};
use crate::intersection::Intersection;
use crate::shape::Triangle;

/// One corner of a face: 0-based indices into the mesh's arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceVertex {
    pub position: usize,
    pub normal: Option<usize>,
    pub texcoord: Option<usize>,
}

impl FaceVertex {
    pub fn new(position: usize) -> Self {
        Self {
            position,
            normal: None,
            texcoord: None,
        }
    }

    pub fn with_normal(mut self, normal: usize) -> Self {
        self.normal = Some(normal);
        self
    }

    pub fn with_texcoord(mut self, texcoord: usize) -> Self {
        self.texcoord = Some(texcoord);
        self
    }
}

/// A polygon with three or more vertices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Face {
    pub vertices: Vec<FaceVertex>,
}

impl Face {
    pub fn new(vertices: Vec<FaceVertex>) -> Self {
        Self { vertices }
    }

    /// A face with only position indices.
    pub fn from_positions(indices: &[usize]) -> Self {
        Self::new(indices.iter().copied().map(FaceVertex::new).collect())
    }
}

/// A triangle mesh with optional per-vertex normals and texture coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct Mesh {
    triangles: Vec<Triangle>,
    bounds: Aabb,
}

impl Mesh {
    /// Triangulate `faces` against the given vertex arrays.
    ///
    /// A triangle is smooth only when all three of its corners reference a
    /// normal, and textured only when all three reference a texcoord.
    pub fn from_faces(
        positions: &[DVec3],
        normals: &[DVec3],
        texcoords: &[DVec2],
        faces: &[Face],
    ) -> SceneResult<Self> {
        let mut triangles = Vec::new();

        for (face_index, face) in faces.iter().enumerate() {
            if face.vertices.len() < 3 {
                return Err(SceneError::InvalidMesh(format!(
                    "face {} has {} vertices, need at least 3",
                    face_index,
                    face.vertices.len()
                )));
            }

            let corners = face
                .vertices
                .iter()
                .map(|v| resolve(v, positions, normals, texcoords, face_index))
                .collect::<SceneResult<Vec<_>>>()?;

            // Fan around the first vertex
            for i in 1..corners.len() - 1 {
                triangles.push(build_triangle(&corners[0], &corners[i], &corners[i + 1]));
            }
        }

        let bounds = triangles
            .iter()
            .fold(Aabb::EMPTY, |acc, t| Aabb::surrounding(&acc, &t.bounds()));

        log::debug!(
            "Built mesh: {} faces, {} triangles, {} vertices",
            faces.len(),
            triangles.len(),
            positions.len()
        );

        Ok(Self { triangles, bounds })
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    pub fn triangle(&self, face: usize) -> Option<&Triangle> {
        self.triangles.get(face)
    }

    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    /// Interpolated texture coordinate on `face` at barycentric (u, v).
    pub fn texcoord_at(&self, face: usize, u: f64, v: f64) -> Option<DVec2> {
        self.triangles.get(face)?.texcoord_at(u, v)
    }

    /// Normal of `face`, interpolated when the face is smooth.
    pub fn normal_at(&self, face: Option<usize>, uv: Option<(f64, f64)>) -> DVec3 {
        face.and_then(|f| self.triangles.get(f))
            .map(|t| t.normal_at(uv))
            .unwrap_or(DVec3::ZERO)
    }

    pub(crate) fn intersect(&self, id: ShapeId, ray: &Ray, xs: &mut Vec<Intersection>) {
        if !self.bounds.hit(ray) {
            return;
        }

        for (face, triangle) in self.triangles.iter().enumerate() {
            if let Some((t, u, v)) = triangle.intersect(ray) {
                xs.push(Intersection::with_uv(t, id, u, v).on_face(face));
            }
        }
    }
}

struct Corner {
    position: DVec3,
    normal: Option<DVec3>,
    texcoord: Option<DVec2>,
}

fn resolve(
    vertex: &FaceVertex,
    positions: &[DVec3],
    normals: &[DVec3],
    texcoords: &[DVec2],
    face_index: usize,
) -> SceneResult<Corner> {
    let out_of_range = |what: &str, index: usize, len: usize| {
        SceneError::InvalidMesh(format!(
            "face {face_index}: {what} index {index} out of range ({len} available)"
        ))
    };

    let position = *positions
        .get(vertex.position)
        .ok_or_else(|| out_of_range("position", vertex.position, positions.len()))?;

    let normal = match vertex.normal {
        Some(i) => Some(
            *normals
                .get(i)
                .ok_or_else(|| out_of_range("normal", i, normals.len()))?,
        ),
        None => None,
    };

    let texcoord = match vertex.texcoord {
        Some(i) => Some(
            *texcoords
                .get(i)
                .ok_or_else(|| out_of_range("texcoord", i, texcoords.len()))?,
        ),
        None => None,
    };

    Ok(Corner {
        position,
        normal,
        texcoord,
    })
}

fn build_triangle(a: &Corner, b: &Corner, c: &Corner) -> Triangle {
    let triangle = match (a.normal, b.normal, c.normal) {
        (Some(n1), Some(n2), Some(n3)) => {
            Triangle::smooth(a.position, b.position, c.position, n1, n2, n3)
        }
        _ => Triangle::new(a.position, b.position, c.position),
    };

    match (a.texcoord, b.texcoord, c.texcoord) {
        (Some(t1), Some(t2), Some(t3)) => triangle.with_texcoords(t1, t2, t3),
        _ => triangle,
    }
}
