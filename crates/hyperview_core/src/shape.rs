//! Shape definitions
//!
//! A [`ShapeDefinition`] is the immutable geometry of one supported shape:
//! a vertex pool, how those vertices are drawn ([`RenderKind`]), how the
//! projector derives their 4th-dimension value ([`WPolicy`]) and the
//! metadata handed to external styling code.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Deserialize};
use hyperview_math::Vec4;

use crate::error::ShapeError;
use crate::projection::WPolicy;

/// An edge between two vertices, as indices into the owning shape's vertex pool
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Edge {
    pub indices: [usize; 2],
}

impl Edge {
    #[inline]
    pub fn new(a: usize, b: usize) -> Self {
        Self { indices: [a, b] }
    }
}

/// How a shape's vertex pool is drawn
#[derive(Clone, Debug, PartialEq)]
pub enum RenderKind {
    /// Each edge is drawn as a separate line segment
    LineSegments { edges: Vec<Edge> },
    /// Each vertex is drawn as a point
    PointCloud,
}

impl RenderKind {
    /// Short name for logs and snapshots
    pub fn name(&self) -> &'static str {
        match self {
            RenderKind::LineSegments { .. } => "LineSegments",
            RenderKind::PointCloud => "PointCloud",
        }
    }
}

/// Identifies one of the supported shapes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKey {
    /// 4D hypercube
    Tesseract,
    /// Stereographic model: a cube nested inside another cube
    FramedCube,
    /// 5-cell (4-simplex)
    Pentachoron,
    /// 16-cell (4D cross-polytope)
    Hexadecachoron,
    /// Point sample of a 3-sphere
    Glome,
}

impl ShapeKey {
    pub const ALL: [ShapeKey; 5] = [
        ShapeKey::Tesseract,
        ShapeKey::FramedCube,
        ShapeKey::Pentachoron,
        ShapeKey::Hexadecachoron,
        ShapeKey::Glome,
    ];

    /// The canonical string key
    pub fn as_str(self) -> &'static str {
        match self {
            ShapeKey::Tesseract => "tesseract",
            ShapeKey::FramedCube => "framed_cube",
            ShapeKey::Pentachoron => "pentachoron",
            ShapeKey::Hexadecachoron => "hexadecachoron",
            ShapeKey::Glome => "glome",
        }
    }
}

impl fmt::Display for ShapeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShapeKey {
    type Err = ShapeError;

    /// Parse a key, also accepting the names older UIs used
    /// (`triangular_pyramid`, `octahedron`, `sphere`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tesseract" => Ok(ShapeKey::Tesseract),
            "framed_cube" => Ok(ShapeKey::FramedCube),
            "pentachoron" | "triangular_pyramid" => Ok(ShapeKey::Pentachoron),
            "hexadecachoron" | "octahedron" => Ok(ShapeKey::Hexadecachoron),
            "glome" | "sphere" => Ok(ShapeKey::Glome),
            other => Err(ShapeError::NotFound(other.to_string())),
        }
    }
}

/// Suggested display styling for a shape
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapeStyle {
    /// Color as 0xRRGGBB
    pub color: u32,
    /// Point size for point clouds, `None` for line shapes
    pub point_size: Option<f32>,
}

impl ShapeStyle {
    pub const LINES: Self = Self { color: 0x00aaff, point_size: None };

    /// Line style with a custom color
    pub const fn lines(color: u32) -> Self {
        Self { color, point_size: None }
    }

    /// Point style with a custom color and size
    pub const fn points(color: u32, size: f32) -> Self {
        Self { color, point_size: Some(size) }
    }

    /// Color as normalized RGB
    pub fn rgb(&self) -> [f32; 3] {
        let channel = |shift: u32| ((self.color >> shift) & 0xff) as f32 / 255.0;
        [channel(16), channel(8), channel(0)]
    }
}

/// Immutable geometry of a single shape
///
/// Fields are private: once built, the vertex pool and edges never change.
/// Producing different geometry means building a new definition.
#[derive(Clone, Debug)]
pub struct ShapeDefinition {
    key: ShapeKey,
    vertices: Vec<Vec4>,
    kind: RenderKind,
    policy: WPolicy,
    style: ShapeStyle,
    description: &'static str,
}

impl ShapeDefinition {
    /// Create a line-segment shape
    ///
    /// # Panics
    /// If any edge references a vertex outside the pool.
    pub fn line_segments(key: ShapeKey, vertices: Vec<Vec4>, edges: Vec<Edge>) -> Self {
        for edge in &edges {
            for &idx in &edge.indices {
                assert!(
                    idx < vertices.len(),
                    "{}: edge {:?} references vertex {} but only {} vertices exist",
                    key, edge.indices, idx, vertices.len()
                );
            }
        }
        Self {
            key,
            vertices,
            kind: RenderKind::LineSegments { edges },
            policy: WPolicy::Scaled,
            style: ShapeStyle::LINES,
            description: "",
        }
    }

    /// Create a point-cloud shape
    pub fn point_cloud(key: ShapeKey, vertices: Vec<Vec4>) -> Self {
        Self {
            key,
            vertices,
            kind: RenderKind::PointCloud,
            policy: WPolicy::Scaled,
            style: ShapeStyle::points(0x00ffaa, 0.035),
            description: "",
        }
    }

    /// Set the projection policy
    pub fn with_policy(mut self, policy: WPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the suggested style
    pub fn with_style(mut self, style: ShapeStyle) -> Self {
        self.style = style;
        self
    }

    /// Set the display text
    pub fn with_description(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    #[inline]
    pub fn key(&self) -> ShapeKey {
        self.key
    }

    #[inline]
    pub fn vertices(&self) -> &[Vec4] {
        &self.vertices
    }

    #[inline]
    pub fn kind(&self) -> &RenderKind {
        &self.kind
    }

    /// Edges of a line shape; empty for point clouds
    pub fn edges(&self) -> &[Edge] {
        match &self.kind {
            RenderKind::LineSegments { edges } => edges,
            RenderKind::PointCloud => &[],
        }
    }

    #[inline]
    pub fn policy(&self) -> WPolicy {
        self.policy
    }

    #[inline]
    pub fn style(&self) -> ShapeStyle {
        self.style
    }

    #[inline]
    pub fn description(&self) -> &'static str {
        self.description
    }

    /// Number of points emitted per frame
    ///
    /// Line shapes emit both endpoints of every edge, without deduplication.
    pub fn point_count(&self) -> usize {
        match &self.kind {
            RenderKind::LineSegments { edges } => edges.len() * 2,
            RenderKind::PointCloud => self.vertices.len(),
        }
    }

    /// Length of the flat xyz output buffer for this shape
    #[inline]
    pub fn buffer_len(&self) -> usize {
        self.point_count() * 3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment() -> Vec<Vec4> {
        vec![Vec4::new(0.0, 0.0, 0.0, 0.0), Vec4::new(1.0, 0.0, 0.0, 0.0)]
    }

    #[test]
    fn test_key_parse() {
        assert_eq!("framed_cube".parse::<ShapeKey>(), Ok(ShapeKey::FramedCube));
        assert_eq!("sphere".parse::<ShapeKey>(), Ok(ShapeKey::Glome));
        assert_eq!("octahedron".parse::<ShapeKey>(), Ok(ShapeKey::Hexadecachoron));
        assert_eq!("triangular_pyramid".parse::<ShapeKey>(), Ok(ShapeKey::Pentachoron));
    }

    #[test]
    fn test_key_parse_unknown() {
        match "nonexistent".parse::<ShapeKey>() {
            Err(ShapeError::NotFound(key)) => assert_eq!(key, "nonexistent"),
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_key_string_roundtrip() {
        for key in ShapeKey::ALL {
            assert_eq!(key.as_str().parse::<ShapeKey>(), Ok(key));
            assert_eq!(key.to_string(), key.as_str());
        }
    }

    #[test]
    fn test_key_serializes_snake_case() {
        let s = ron::to_string(&ShapeKey::FramedCube).unwrap();
        assert_eq!(s, "framed_cube");
    }

    #[test]
    fn test_line_point_count() {
        let shape = ShapeDefinition::line_segments(ShapeKey::Tesseract, segment(), vec![Edge::new(0, 1)]);
        assert_eq!(shape.point_count(), 2);
        assert_eq!(shape.buffer_len(), 6);
        assert_eq!(shape.edges().len(), 1);
    }

    #[test]
    fn test_cloud_point_count() {
        let shape = ShapeDefinition::point_cloud(ShapeKey::Glome, segment());
        assert_eq!(shape.point_count(), 2);
        assert!(shape.edges().is_empty());
        assert_eq!(shape.kind().name(), "PointCloud");
    }

    #[test]
    #[should_panic(expected = "references vertex 2")]
    fn test_out_of_range_edge_panics() {
        ShapeDefinition::line_segments(ShapeKey::Tesseract, segment(), vec![Edge::new(0, 2)]);
    }

    #[test]
    fn test_style_rgb() {
        let rgb = ShapeStyle::lines(0xff8000).rgb();
        assert_eq!(rgb[0], 1.0);
        assert!((rgb[1] - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(rgb[2], 0.0);
    }

    #[test]
    fn test_builder_sets_metadata() {
        let shape = ShapeDefinition::point_cloud(ShapeKey::Glome, segment())
            .with_policy(WPolicy::SphereBlend)
            .with_description("a sphere");
        assert_eq!(shape.policy(), WPolicy::SphereBlend);
        assert_eq!(shape.description(), "a sphere");
        assert_eq!(shape.style().point_size, Some(0.035));
    }
}
