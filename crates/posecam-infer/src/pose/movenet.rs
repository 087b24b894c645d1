use {
    super::types::{COCO_KEYPOINT_COUNT, Keypoint, LetterboxInfo, Pose},
    crate::InferError,
    posecam_base::Tensor,
};

/// Decode a MoveNet SinglePose output `[1, 1, 17, 3]`.
///
/// Each row is `(y, x, score)` normalized to the model input square; positions
/// are mapped back to frame pixels. The pose score is the mean keypoint score.
pub fn postprocess(output: &Tensor<f32>, letterbox: &LetterboxInfo) -> Result<Vec<Pose>, InferError> {
    if output.shape != [1, 1, COCO_KEYPOINT_COUNT, 3] {
        return Err(InferError::Shape {
            expected: format!("[1, 1, {COCO_KEYPOINT_COUNT}, 3]"),
            got: format!("{:?}", output.shape),
        });
    }

    let side = letterbox.target as f32;
    let keypoints: Vec<Keypoint> = output
        .data
        .chunks_exact(3)
        .map(|row| {
            let position = letterbox.unmap(row[1] * side, row[0] * side);
            Keypoint {
                position,
                score: row[2].clamp(0.0, 1.0),
            }
        })
        .collect();

    let score = keypoints.iter().map(|k| k.score).sum::<f32>() / keypoints.len() as f32;
    Ok(vec![Pose::new(keypoints, score)])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_multipose_shape() {
        let output = Tensor::new(vec![1, 6, 56], vec![0.0; 336]).unwrap();
        let letterbox = LetterboxInfo {
            target: 192,
            scale: 1.0,
            pad_x: 0.0,
            pad_y: 0.0,
        };
        assert!(matches!(
            postprocess(&output, &letterbox),
            Err(InferError::Shape { .. })
        ));
    }
}
