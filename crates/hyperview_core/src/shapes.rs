//! Built-in shape generators
//!
//! Each function builds the complete [`ShapeDefinition`] for one [`ShapeKey`].
//! Cube-like shapes index their vertices by bit pattern: bit 0 selects the
//! sign of x, bit 1 of y, bit 2 of z and (for the tesseract) bit 3 of w.

use std::f32::consts::TAU;

use rand::Rng;
use serde::{Serialize, Deserialize};
use hyperview_math::Vec4;

use crate::projection::WPolicy;
use crate::shape::{Edge, ShapeDefinition, ShapeKey, ShapeStyle};

const TESSERACT_DESCRIPTION: &str = "A Tesseract (4D cube). Starts as a perfect 3D cube. \
    Use the slider to expand it into the 4th dimension, revealing its full hypercube \
    structure through a 4D rotation.";
const FRAMED_CUBE_DESCRIPTION: &str = "A visual representation of a tesseract projection \
    where one cube sits inside another. This is a classic stereographic projection model.";
const PENTACHORON_DESCRIPTION: &str = "The 5-Cell (Pentachoron). Starts as a 3D tetrahedron \
    and expands into its 4D form, which consists of 5 tetrahedral cells.";
const HEXADECACHORON_DESCRIPTION: &str = "The 16-Cell (Hexadecachoron). Starts as a 3D \
    octahedron and expands to reveal its full 4D structure, composed of 16 tetrahedral cells.";
const GLOME_DESCRIPTION: &str = "A Glome (3-sphere). Starts as a perfect 3D sphere. \
    Use the slider to expand it into the 4th dimension, creating a hypersphere.";

/// Sampling parameters for the glome point cloud
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GlomeParams {
    /// Number of sampled points
    pub samples: usize,
    /// Sphere radius
    pub radius: f32,
}

impl Default for GlomeParams {
    fn default() -> Self {
        Self { samples: 3000, radius: 1.8 }
    }
}

#[inline]
fn sign(bits: usize, bit: usize) -> f32 {
    if bits & (1 << bit) != 0 { 1.0 } else { -1.0 }
}

/// The 12 edges of the cube whose 8 vertices start at `base`
///
/// Edges join vertices whose indices differ in exactly one of the low 3 bits.
fn cube_edges(base: usize) -> impl Iterator<Item = Edge> {
    (0..8usize).flat_map(move |i| {
        (0..3usize)
            .filter(move |bit| i & (1 << bit) == 0)
            .map(move |bit| Edge::new(base + i, base + (i | (1 << bit))))
    })
}

/// 16 vertices at (±1, ±1, ±1, ±1) and 32 edges
pub fn tesseract() -> ShapeDefinition {
    let vertices = (0..16)
        .map(|i| Vec4::new(sign(i, 0), sign(i, 1), sign(i, 2), sign(i, 3)))
        .collect();

    // Both w-layer cubes, then the links between them
    let edges = cube_edges(0)
        .chain(cube_edges(8))
        .chain((0..8).map(|i| Edge::new(i, i + 8)))
        .collect();

    ShapeDefinition::line_segments(ShapeKey::Tesseract, vertices, edges)
        .with_description(TESSERACT_DESCRIPTION)
}

/// A unit cube at w = -1 framing a half-size cube at w = +1
pub fn framed_cube() -> ShapeDefinition {
    const INNER_SCALE: f32 = 0.5;

    let outer = (0..8).map(|i| Vec4::new(sign(i, 0), sign(i, 1), sign(i, 2), -1.0));
    let inner = (0..8).map(|i| {
        Vec4::new(
            sign(i, 0) * INNER_SCALE,
            sign(i, 1) * INNER_SCALE,
            sign(i, 2) * INNER_SCALE,
            1.0,
        )
    });
    let vertices = outer.chain(inner).collect();

    let edges = cube_edges(0)
        .chain(cube_edges(8))
        .chain((0..8).map(|i| Edge::new(i, i + 8)))
        .collect();

    ShapeDefinition::line_segments(ShapeKey::FramedCube, vertices, edges)
        .with_policy(WPolicy::Unscaled)
        .with_style(ShapeStyle::lines(0xff69b4))
        .with_description(FRAMED_CUBE_DESCRIPTION)
}

/// The 5-cell: a tetrahedron at w = -1 plus an apex at w = +1, scaled by 1.2
pub fn pentachoron() -> ShapeDefinition {
    const SCALE: f32 = 1.2;

    let vertices: Vec<Vec4> = [
        Vec4::new(1.0, 1.0, 1.0, -1.0),
        Vec4::new(1.0, -1.0, -1.0, -1.0),
        Vec4::new(-1.0, 1.0, -1.0, -1.0),
        Vec4::new(-1.0, -1.0, 1.0, -1.0),
        Vec4::new(0.0, 0.0, 0.0, 1.0),
    ]
    .into_iter()
    .map(|v| v * SCALE)
    .collect();

    let edges = complete_graph(vertices.len(), |_, _| true);

    ShapeDefinition::line_segments(ShapeKey::Pentachoron, vertices, edges)
        .with_description(PENTACHORON_DESCRIPTION)
}

/// The 16-cell: ±1.5 on each axis, every pair joined except antipodes
pub fn hexadecachoron() -> ShapeDefinition {
    const EXTENT: f32 = 1.5;

    // Vertices 2k and 2k+1 are the +/- ends of axis k
    let vertices: Vec<Vec4> = (0..8)
        .map(|i| {
            let mut c = [0.0; 4];
            c[i / 2] = if i % 2 == 0 { EXTENT } else { -EXTENT };
            Vec4::from_array(c)
        })
        .collect();

    let edges = complete_graph(vertices.len(), |i, j| i / 2 != j / 2);

    ShapeDefinition::line_segments(ShapeKey::Hexadecachoron, vertices, edges)
        .with_description(HEXADECACHORON_DESCRIPTION)
}

/// Points sampled uniformly on a 2-sphere of `params.radius`, embedded at w = 0
///
/// Uses inverse-CDF sampling: θ = 2πu, φ = acos(2v − 1).
pub fn glome<R: Rng + ?Sized>(rng: &mut R, params: GlomeParams) -> ShapeDefinition {
    let vertices = (0..params.samples)
        .map(|_| {
            let u: f32 = rng.gen();
            let v: f32 = rng.gen();
            let theta = TAU * u;
            let phi = (2.0 * v - 1.0).clamp(-1.0, 1.0).acos();
            let (sin_phi, cos_phi) = phi.sin_cos();
            let (sin_theta, cos_theta) = theta.sin_cos();
            Vec4::new(
                params.radius * sin_phi * cos_theta,
                params.radius * sin_phi * sin_theta,
                params.radius * cos_phi,
                0.0,
            )
        })
        .collect();

    ShapeDefinition::point_cloud(ShapeKey::Glome, vertices)
        .with_policy(WPolicy::SphereBlend)
        .with_description(GLOME_DESCRIPTION)
}

/// Edges (i, j), i < j, over `n` vertices for every pair accepted by `keep`
fn complete_graph(n: usize, keep: impl Fn(usize, usize) -> bool) -> Vec<Edge> {
    let mut edges = Vec::new();
    for i in 0..n {
        for j in (i + 1)..n {
            if keep(i, j) {
                edges.push(Edge::new(i, j));
            }
        }
    }
    edges
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use rand::{rngs::StdRng, SeedableRng};

    fn assert_edges_in_bounds(shape: &ShapeDefinition) {
        for edge in shape.edges() {
            for &idx in &edge.indices {
                assert!(idx < shape.vertices().len(), "{}: index {} out of range", shape.key(), idx);
            }
        }
    }

    fn assert_edges_unique(shape: &ShapeDefinition) {
        let mut seen = HashSet::new();
        for edge in shape.edges() {
            let [a, b] = edge.indices;
            assert_ne!(a, b, "{}: self-loop at {}", shape.key(), a);
            assert!(seen.insert((a.min(b), a.max(b))), "{}: duplicate edge {:?}", shape.key(), edge);
        }
    }

    #[test]
    fn test_tesseract_counts() {
        let t = tesseract();
        assert_eq!(t.vertices().len(), 16);
        assert_eq!(t.edges().len(), 32);
        assert_edges_in_bounds(&t);
        assert_edges_unique(&t);
    }

    #[test]
    fn test_tesseract_edges_differ_in_one_coordinate() {
        let t = tesseract();
        for edge in t.edges() {
            let [a, b] = edge.indices;
            assert_eq!((a ^ b).count_ones(), 1, "edge {:?}", edge.indices);
            let diff = t.vertices()[a] - t.vertices()[b];
            assert_eq!(diff.length_squared(), 4.0);
        }
    }

    #[test]
    fn test_tesseract_vertices_follow_bits() {
        let t = tesseract();
        assert_eq!(t.vertices()[0], Vec4::new(-1.0, -1.0, -1.0, -1.0));
        assert_eq!(t.vertices()[9], Vec4::new(1.0, -1.0, -1.0, 1.0));
        assert_eq!(t.vertices()[15], Vec4::new(1.0, 1.0, 1.0, 1.0));
    }

    #[test]
    fn test_framed_cube_layers() {
        let f = framed_cube();
        assert_eq!(f.vertices().len(), 16);
        assert_eq!(f.edges().len(), 32);
        assert_edges_in_bounds(&f);
        assert_edges_unique(&f);
        for v in &f.vertices()[..8] {
            assert_eq!(v.w, -1.0);
            assert_eq!(v.x.abs(), 1.0);
        }
        for v in &f.vertices()[8..] {
            assert_eq!(v.w, 1.0);
            assert_eq!(v.x.abs(), 0.5);
        }
        assert_eq!(f.policy(), WPolicy::Unscaled);
        assert_eq!(f.style().color, 0xff69b4);
    }

    #[test]
    fn test_framed_cube_links_outer_to_inner() {
        let f = framed_cube();
        let links = f.edges().iter().filter(|e| e.indices[0] < 8 && e.indices[1] >= 8).count();
        assert_eq!(links, 8);
    }

    #[test]
    fn test_pentachoron_is_complete() {
        let p = pentachoron();
        assert_eq!(p.vertices().len(), 5);
        assert_eq!(p.edges().len(), 10);
        assert_edges_in_bounds(&p);
        assert_edges_unique(&p);
        assert_eq!(p.vertices()[4], Vec4::new(0.0, 0.0, 0.0, 1.2));
        assert!((p.vertices()[0].x - 1.2).abs() < 1e-6);
    }

    #[test]
    fn test_hexadecachoron_skips_antipodes() {
        let h = hexadecachoron();
        assert_eq!(h.vertices().len(), 8);
        assert_eq!(h.edges().len(), 24);
        assert_edges_in_bounds(&h);
        assert_edges_unique(&h);
        for edge in h.edges() {
            let [a, b] = edge.indices;
            let sum = h.vertices()[a] + h.vertices()[b];
            assert!(sum.length() > 0.0, "antipodal pair {:?} joined", edge.indices);
        }
    }

    #[test]
    fn test_glome_points_on_sphere() {
        let mut rng = StdRng::seed_from_u64(42);
        let g = glome(&mut rng, GlomeParams::default());
        assert_eq!(g.vertices().len(), 3000);
        assert!(g.edges().is_empty());
        for v in g.vertices() {
            assert_eq!(v.w, 0.0);
            let r2 = v.x * v.x + v.y * v.y + v.z * v.z;
            assert!((r2 - 1.8 * 1.8).abs() < 1e-3, "r^2 = {}", r2);
        }
    }

    #[test]
    fn test_glome_is_reproducible_with_seed() {
        let a = glome(&mut StdRng::seed_from_u64(7), GlomeParams { samples: 50, radius: 1.0 });
        let b = glome(&mut StdRng::seed_from_u64(7), GlomeParams { samples: 50, radius: 1.0 });
        assert_eq!(a.vertices(), b.vertices());
    }

    #[test]
    fn test_descriptions_present() {
        let mut rng = StdRng::seed_from_u64(1);
        for shape in [tesseract(), framed_cube(), pentachoron(), hexadecachoron(),
                      glome(&mut rng, GlomeParams { samples: 1, radius: 1.0 })] {
            assert!(!shape.description().is_empty(), "{} has no description", shape.key());
        }
    }
}
