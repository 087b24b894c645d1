use {
    super::types::{COCO_KEYPOINT_COUNT, Keypoint, LetterboxInfo, Pose},
    crate::InferError,
    posecam_base::{Rect, Tensor, Vec2},
};

/// Box, confidence, then 17 `(x, y, visibility)` triples.
const ROWS: usize = 5 + COCO_KEYPOINT_COUNT * 3;

pub const DEFAULT_CONF_THRESHOLD: f32 = 0.25;
pub const DEFAULT_IOU_THRESHOLD: f32 = 0.45;

/// Decode a YOLO pose output `[1, 56, N]`.
///
/// Candidates under `conf_threshold` are dropped, the rest go through greedy
/// NMS. Result is sorted by confidence, highest first.
pub fn postprocess(
    output: &Tensor<f32>,
    letterbox: &LetterboxInfo,
    conf_threshold: f32,
    iou_threshold: f32,
) -> Result<Vec<Pose>, InferError> {
    if output.shape.len() != 3 || output.shape[0] != 1 || output.shape[1] != ROWS {
        return Err(InferError::Shape {
            expected: format!("[1, {ROWS}, N]"),
            got: format!("{:?}", output.shape),
        });
    }

    let n = output.shape[2];
    // element [0, row, i] of the column-major detection table
    let at = |row: usize, i: usize| output.data[row * n + i];

    let mut candidates: Vec<Pose> = (0..n)
        .filter(|&i| at(4, i) >= conf_threshold)
        .map(|i| {
            let keypoints = (0..COCO_KEYPOINT_COUNT)
                .map(|k| {
                    let row = 5 + k * 3;
                    Keypoint {
                        position: letterbox.unmap(at(row, i), at(row + 1, i)),
                        score: at(row + 2, i).clamp(0.0, 1.0),
                    }
                })
                .collect();
            let center = letterbox.unmap(at(0, i), at(1, i));
            let size = Vec2::new(at(2, i), at(3, i)) / letterbox.scale;
            Pose {
                keypoints,
                score: at(4, i),
                bbox: Some(Rect::from_center(center, size)),
            }
        })
        .collect();

    candidates.sort_by(|a, b| b.score.total_cmp(&a.score));

    let mut keep: Vec<Pose> = Vec::new();
    for candidate in candidates {
        let overlaps = keep.iter().any(|kept| match (&kept.bbox, &candidate.bbox) {
            (Some(a), Some(b)) => a.iou(b) > iou_threshold,
            _ => false,
        });
        if !overlaps {
            keep.push(candidate);
        }
    }
    Ok(keep)
}
