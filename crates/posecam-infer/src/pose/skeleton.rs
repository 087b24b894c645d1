use {
    super::types::SkeletonEdge,
    serde::{Deserialize, Serialize},
    std::{fmt, str::FromStr},
};

const fn edge(from: usize, to: usize) -> SkeletonEdge {
    SkeletonEdge::new(from, to)
}

/// MoveNet adjacent pairs.
pub const MOVENET_EDGES: [SkeletonEdge; 16] = [
    edge(0, 1),
    edge(0, 2),
    edge(1, 3),
    edge(2, 4),
    edge(5, 6),
    edge(5, 7),
    edge(5, 11),
    edge(6, 8),
    edge(6, 12),
    edge(7, 9),
    edge(8, 10),
    edge(11, 12),
    edge(11, 13),
    edge(12, 14),
    edge(13, 15),
    edge(14, 16),
];

/// COCO-Pose skeleton used with YOLO pose models.
pub const COCO_EDGES: [SkeletonEdge; 19] = [
    edge(15, 13),
    edge(13, 11),
    edge(16, 14),
    edge(14, 12),
    edge(11, 12),
    edge(5, 11),
    edge(6, 12),
    edge(5, 6),
    edge(5, 7),
    edge(6, 8),
    edge(7, 9),
    edge(8, 10),
    edge(1, 2),
    edge(0, 1),
    edge(0, 2),
    edge(1, 3),
    edge(2, 4),
    edge(3, 5),
    edge(4, 6),
];

/// Supported pose model variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    /// Single person, 192x192, tuned for speed.
    #[default]
    MovenetLightning,
    /// Single person, 256x256, tuned for accuracy.
    MovenetThunder,
    /// Multi person, 640x640 letterbox, boxes plus keypoints.
    YoloPose,
}

impl ModelKind {
    /// The keypoint topology for this variant. Fixed for the session.
    pub fn skeleton(self) -> &'static [SkeletonEdge] {
        match self {
            ModelKind::MovenetLightning | ModelKind::MovenetThunder => &MOVENET_EDGES,
            ModelKind::YoloPose => &COCO_EDGES,
        }
    }

    /// Side of the square model input.
    pub fn input_size(self) -> usize {
        match self {
            ModelKind::MovenetLightning => 192,
            ModelKind::MovenetThunder => 256,
            ModelKind::YoloPose => 640,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ModelKind::MovenetLightning => "movenet_lightning",
            ModelKind::MovenetThunder => "movenet_thunder",
            ModelKind::YoloPose => "yolo_pose",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ModelKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [
            ModelKind::MovenetLightning,
            ModelKind::MovenetThunder,
            ModelKind::YoloPose,
        ]
        .into_iter()
        .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
        .ok_or_else(|| format!("unknown model kind {s:?}"))
    }
}
