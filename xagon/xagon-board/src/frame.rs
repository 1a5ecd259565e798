//! Rendering-facing view of the board.
//!
//! The board never drives a renderer itself. A host calls
//! [`FrameHook::update`] once per frame and reads whatever the hook
//! derived, typically one [`FaceTransform`] per face.

use xagon_types::{Point3, Triangle, TriangleId, Vector3};

use crate::error::{BoardError, BoardResult};
use crate::icosahedron::Icosahedron;

/// Per-frame callback driven by the rendering host.
pub trait FrameHook {
    /// Observe the board for the current frame.
    fn update(&mut self, board: &Icosahedron);
}

/// Placement of an asset on one face.
///
/// `up` is the outward unit normal, `forward` the in-plane unit direction
/// from the center toward `p1`, `right` completes a right-handed frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceTransform {
    /// Face the transform belongs to.
    pub id: TriangleId,
    /// Face centroid.
    pub position: Point3<f64>,
    /// Outward unit normal.
    pub up: Vector3<f64>,
    /// Unit vector from the centroid toward `p1`.
    pub forward: Vector3<f64>,
    /// Uniform asset scale.
    pub scale: f64,
}

impl FaceTransform {
    /// Derive the transform of `triangle`, or `None` if it is degenerate.
    #[must_use]
    pub fn from_triangle(triangle: &Triangle, scale: f64) -> Option<Self> {
        let up = triangle.normal()?;
        let position = triangle.center_point();
        let toward_p1 = triangle.p1() - position;
        // Remove any out-of-plane component left by rounding.
        let forward = (toward_p1 - up * toward_p1.dot(&up)).try_normalize(f64::EPSILON)?;
        Some(Self {
            id: triangle.id(),
            position,
            up,
            forward,
            scale,
        })
    }

    /// Third axis of the frame: `up x forward`.
    #[must_use]
    pub fn right(&self) -> Vector3<f64> {
        self.up.cross(&self.forward)
    }
}

/// Frame hook that keeps one [`FaceTransform`] per face, rebuilt only when
/// the board's generation changes.
#[derive(Debug, Clone)]
pub struct FaceTransforms {
    asset_radius: f64,
    generation: Option<u64>,
    transforms: Vec<FaceTransform>,
    rebuilds: usize,
}

impl FaceTransforms {
    /// Cache for assets of bounding radius `asset_radius`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidArgument`] if `asset_radius` is not a
    /// positive finite number.
    pub fn new(asset_radius: f64) -> BoardResult<Self> {
        if !(asset_radius.is_finite() && asset_radius > 0.0) {
            return Err(BoardError::invalid_argument(format!(
                "asset radius must be positive and finite, got {asset_radius}"
            )));
        }
        Ok(Self {
            asset_radius,
            generation: None,
            transforms: Vec::new(),
            rebuilds: 0,
        })
    }

    /// Transforms for the last board seen, in board order. Degenerate faces
    /// are skipped.
    #[must_use]
    pub fn transforms(&self) -> &[FaceTransform] {
        &self.transforms
    }

    /// How many times the cache was rebuilt.
    #[must_use]
    pub const fn rebuilds(&self) -> usize {
        self.rebuilds
    }
}

impl FrameHook for FaceTransforms {
    fn update(&mut self, board: &Icosahedron) {
        // The next id advances with every subdivision pass.
        let generation = board.next_id();
        if self.generation == Some(generation) {
            return;
        }
        let Ok(scale) = board.scaling_ratio(self.asset_radius) else {
            return;
        };
        self.transforms = board
            .triangles()
            .iter()
            .filter_map(|t| FaceTransform::from_triangle(t, scale))
            .collect();
        self.generation = Some(generation);
        self.rebuilds += 1;
    }
}
