//! Per-triangle game state and change notifications.

use serde::{Deserialize, Serialize};
use xagon_types::Triangle;

/// A player seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u8);

/// Visual/scoring type of a triangle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TriangleKind {
    /// Ordinary face.
    #[default]
    Plain,
    /// Face that belongs to a scored hexagon.
    Hexagon,
}

/// Game state attached to one triangle. Independent of geometry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TriangleState {
    /// Player that claimed the face, if any.
    pub owner: Option<PlayerId>,
    /// Current type of the face.
    pub kind: TriangleKind,
}

impl TriangleState {
    /// State of a plain face claimed by `player`.
    #[must_use]
    pub const fn claimed_by(player: PlayerId) -> Self {
        Self {
            owner: Some(player),
            kind: TriangleKind::Plain,
        }
    }

    /// Same owner, different kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: TriangleKind) -> Self {
        self.kind = kind;
        self
    }

    /// Whether a player owns the face.
    #[must_use]
    pub const fn is_claimed(&self) -> bool {
        self.owner.is_some()
    }
}

/// Notification delivered to observers after a state change.
#[derive(Debug, Clone, PartialEq)]
pub struct TriangleChange {
    /// Triangles whose state changed, in the order the caller listed them.
    pub triangles: Vec<Triangle>,
    /// The state they now hold.
    pub state: TriangleState,
}

/// Handle returned by observer registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObserverId(pub(crate) u64);
