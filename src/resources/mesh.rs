//! Volumetric line mesh
//!
//! A line is drawn from a fixed 8-vertex template: four vertices sit on the
//! start point and four on the end point. The vertex shader pushes each one
//! outwards along [`LINE_VERTEX_OFFSETS`] in screen space to build a
//! camera-facing ribbon with rounded caps. Only positions and the
//! "other endpoint" attribute vary per instance; everything else is shared.

use std::ops::Range;

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};

/// Number of vertices in every line mesh.
pub const LINE_VERTEX_COUNT: usize = 8;

/// Vertices sitting on the start point.
pub const START_SIDE: Range<usize> = 0..4;

/// Vertices sitting on the end point.
pub const END_SIDE: Range<usize> = 4..8;

/// Texture coordinates into the beam gradient texture.
pub static LINE_TEX_COORDS: [Vec2; LINE_VERTEX_COUNT] = [
    Vec2::new(1.0, 1.0),
    Vec2::new(1.0, 0.0),
    Vec2::new(0.5, 1.0),
    Vec2::new(0.5, 0.0),
    Vec2::new(0.5, 0.0),
    Vec2::new(0.5, 1.0),
    Vec2::new(0.0, 0.0),
    Vec2::new(0.0, 1.0),
];

/// Screen-space expansion directions.
///
/// `x` pushes along the segment (cap length), `y` across it (half width).
pub static LINE_VERTEX_OFFSETS: [Vec2; LINE_VERTEX_COUNT] = [
    Vec2::new(1.0, 1.0),
    Vec2::new(1.0, -1.0),
    Vec2::new(0.0, 1.0),
    Vec2::new(0.0, -1.0),
    Vec2::new(0.0, 1.0),
    Vec2::new(0.0, -1.0),
    Vec2::new(1.0, 1.0),
    Vec2::new(1.0, -1.0),
];

/// Start cap, body and end cap, emitted in both windings.
#[rustfmt::skip]
pub static LINE_INDICES: [u32; 36] = [
    // Front winding
    2, 1, 0,
    3, 1, 2,
    4, 3, 2,
    5, 4, 2,
    4, 5, 6,
    6, 5, 7,
    // Back winding
    0, 1, 2,
    2, 1, 3,
    2, 3, 4,
    2, 4, 5,
    6, 5, 4,
    7, 5, 6,
];

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Smallest box enclosing all points. An empty slice yields a box at the origin.
    pub fn from_points(points: &[Vec3]) -> Self {
        let Some(first) = points.first() else {
            return Self {
                min: Vec3::ZERO,
                max: Vec3::ZERO,
            };
        };
        points.iter().skip(1).fold(
            Self {
                min: *first,
                max: *first,
            },
            |aabb, p| Self {
                min: aabb.min.min(*p),
                max: aabb.max.max(*p),
            },
        )
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn extents(&self) -> Vec3 {
        self.max - self.min
    }
}

/// Interleaved vertex as consumed by the line shader
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    /// Opposite endpoint, carried in the normal slot
    pub other_endpoint: [f32; 3],
    pub tex_coord: [f32; 2],
    pub offset: [f32; 2],
}

/// Per-instance geometry buffer of a volumetric line
#[derive(Debug, Clone)]
pub struct LineMesh {
    name: String,
    positions: [Vec3; LINE_VERTEX_COUNT],
    other_endpoints: [Vec3; LINE_VERTEX_COUNT],
    bounds: Aabb,
    revision: u64,
}

impl LineMesh {
    /// Build the mesh for a segment.
    pub fn new(name: &str, start: Vec3, end: Vec3) -> Self {
        let mut mesh = Self {
            name: name.to_string(),
            positions: [Vec3::ZERO; LINE_VERTEX_COUNT],
            other_endpoints: [Vec3::ZERO; LINE_VERTEX_COUNT],
            bounds: Aabb::from_points(&[]),
            revision: 0,
        };
        mesh.write_endpoints(start, end);
        mesh
    }

    /// Overwrite both endpoint buffers and recompute the bounds.
    pub fn set_endpoints(&mut self, start: Vec3, end: Vec3) {
        self.write_endpoints(start, end);
        self.revision += 1;
    }

    fn write_endpoints(&mut self, start: Vec3, end: Vec3) {
        for i in START_SIDE {
            self.positions[i] = start;
            self.other_endpoints[i] = end;
        }
        for i in END_SIDE {
            self.positions[i] = end;
            self.other_endpoints[i] = start;
        }
        self.bounds = Aabb::from_points(&self.positions);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn positions(&self) -> &[Vec3; LINE_VERTEX_COUNT] {
        &self.positions
    }

    pub fn other_endpoints(&self) -> &[Vec3; LINE_VERTEX_COUNT] {
        &self.other_endpoints
    }

    pub fn tex_coords(&self) -> &'static [Vec2; LINE_VERTEX_COUNT] {
        &LINE_TEX_COORDS
    }

    pub fn vertex_offsets(&self) -> &'static [Vec2; LINE_VERTEX_COUNT] {
        &LINE_VERTEX_OFFSETS
    }

    pub fn indices(&self) -> &'static [u32] {
        &LINE_INDICES
    }

    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    /// Incremented on every endpoint write after construction
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn vertex_count(&self) -> usize {
        LINE_VERTEX_COUNT
    }

    pub fn index_count(&self) -> usize {
        LINE_INDICES.len()
    }

    pub fn triangle_count(&self) -> usize {
        LINE_INDICES.len() / 3
    }

    /// Interleave the per-instance and shared attributes.
    pub fn vertices(&self) -> Vec<LineVertex> {
        (0..LINE_VERTEX_COUNT)
            .map(|i| LineVertex {
                position: self.positions[i].to_array(),
                other_endpoint: self.other_endpoints[i].to_array(),
                tex_coord: LINE_TEX_COORDS[i].to_array(),
                offset: LINE_VERTEX_OFFSETS[i].to_array(),
            })
            .collect()
    }

    /// Get vertex data as bytes
    pub fn vertex_bytes(&self) -> Vec<u8> {
        bytemuck::cast_slice(&self.vertices()).to_vec()
    }

    /// Get index data as bytes
    pub fn index_bytes(&self) -> &'static [u8] {
        bytemuck::cast_slice(&LINE_INDICES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indices_in_range() {
        assert_eq!(LINE_INDICES.len(), 36);
        assert!(LINE_INDICES
            .iter()
            .all(|&i| (i as usize) < LINE_VERTEX_COUNT));
    }

    #[test]
    fn test_back_winding_mirrors_front() {
        let (front, back) = LINE_INDICES.split_at(18);
        for (f, b) in front.chunks(3).zip(back.chunks(3)) {
            let mut f = f.to_vec();
            let mut b = b.to_vec();
            f.sort_unstable();
            b.sort_unstable();
            assert_eq!(f, b);
        }
    }

    #[test]
    fn test_new_mesh_layout() {
        let start = Vec3::new(1.0, 2.0, 3.0);
        let end = Vec3::new(-4.0, 5.0, 6.0);
        let mesh = LineMesh::new("line", start, end);

        for i in START_SIDE {
            assert_eq!(mesh.positions()[i], start);
            assert_eq!(mesh.other_endpoints()[i], end);
        }
        for i in END_SIDE {
            assert_eq!(mesh.positions()[i], end);
            assert_eq!(mesh.other_endpoints()[i], start);
        }
        assert_eq!(mesh.name(), "line");
        assert_eq!(mesh.revision(), 0);
        assert_eq!(mesh.triangle_count(), 12);
    }

    #[test]
    fn test_bounds_follow_endpoints() {
        let mut mesh = LineMesh::new("line", Vec3::ZERO, Vec3::new(0.0, 0.0, 100.0));
        assert_eq!(mesh.bounds().max, Vec3::new(0.0, 0.0, 100.0));

        mesh.set_endpoints(Vec3::new(-1.0, 2.0, 0.0), Vec3::new(3.0, -4.0, 5.0));
        let bounds = mesh.bounds();
        assert_eq!(bounds.min, Vec3::new(-1.0, -4.0, 0.0));
        assert_eq!(bounds.max, Vec3::new(3.0, 2.0, 5.0));
        assert_eq!(bounds.center(), Vec3::new(1.0, -1.0, 2.5));
        assert_eq!(mesh.revision(), 1);
    }

    #[test]
    fn test_degenerate_segment() {
        let p = Vec3::splat(7.0);
        let mesh = LineMesh::new("point", p, p);
        assert_eq!(mesh.bounds().extents(), Vec3::ZERO);
        assert!(mesh.positions().iter().all(|v| *v == p));
    }

    #[test]
    fn test_vertex_bytes() {
        let mesh = LineMesh::new("line", Vec3::ZERO, Vec3::X);
        assert_eq!(std::mem::size_of::<LineVertex>(), 40);
        assert_eq!(mesh.vertex_bytes().len(), 8 * 40);
        assert_eq!(mesh.index_bytes().len(), 36 * 4);

        let vertices = mesh.vertices();
        assert_eq!(vertices[6].tex_coord, [0.0, 0.0]);
        assert_eq!(vertices[1].offset, [1.0, -1.0]);
        assert_eq!(vertices[5].other_endpoint, [0.0, 0.0, 0.0]);
    }
}
