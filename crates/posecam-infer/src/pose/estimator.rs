use {
    super::{
        movenet,
        preprocess::{letterbox, to_nchw, to_nhwc},
        skeleton::ModelKind,
        types::{Pose, SkeletonEdge},
        yolo,
    },
    crate::{Backend, InferError, ModelSource, Session},
    posecam_image::Image,
    std::{
        future::Future,
        sync::{Arc, Mutex},
    },
};

/// Produces poses for a frame.
///
/// Results are ordered by priority; consumers that track one person use the
/// first. An empty result is not an error.
pub trait PoseEstimator: Send + Sync + 'static {
    fn estimate(&self, frame: Arc<Image>) -> impl Future<Output = Result<Vec<Pose>, InferError>> + Send;

    /// The keypoint topology of the loaded model.
    fn skeleton(&self) -> &[SkeletonEdge];
}

struct Inner {
    session: Box<dyn Session>,
    input_name: String,
}

/// Pose estimator running an ONNX model through a [`Backend`].
///
/// Inference is blocking; `estimate` moves it to the blocking pool so the
/// cooperative thread stays responsive.
pub struct OnnxPoseEstimator {
    kind: ModelKind,
    inner: Arc<Mutex<Inner>>,
    conf_threshold: f32,
    iou_threshold: f32,
}

impl OnnxPoseEstimator {
    pub fn new(kind: ModelKind, model: ModelSource, backend: &dyn Backend) -> Result<Self, InferError> {
        let session = backend.load_model(model)?;
        let input_name = session
            .input_names()
            .first()
            .ok_or_else(|| InferError::ModelLoad("model has no inputs".to_string()))?
            .clone();
        log::info!(
            "loaded {} model on {} backend (input {:?})",
            kind,
            backend.name(),
            input_name
        );
        Ok(Self {
            kind,
            inner: Arc::new(Mutex::new(Inner {
                session,
                input_name,
            })),
            conf_threshold: yolo::DEFAULT_CONF_THRESHOLD,
            iou_threshold: yolo::DEFAULT_IOU_THRESHOLD,
        })
    }
}

fn run(
    inner: &Mutex<Inner>,
    kind: ModelKind,
    frame: &Image,
    conf_threshold: f32,
    iou_threshold: f32,
) -> Result<Vec<Pose>, InferError> {
    let target = kind.input_size();
    let (input, letterbox) = match kind {
        ModelKind::YoloPose => {
            // ultralytics gray
            let (pixels, info) = letterbox(frame, target, 114)?;
            (to_nchw(&pixels, target)?, info)
        }
        ModelKind::MovenetLightning | ModelKind::MovenetThunder => {
            let (pixels, info) = letterbox(frame, target, 0)?;
            (to_nhwc(&pixels, target)?, info)
        }
    };

    let outputs = {
        let mut inner = inner
            .lock()
            .map_err(|_| InferError::Backend("session lock poisoned".to_string()))?;
        let Inner {
            session,
            input_name,
        } = &mut *inner;
        session.run(&[(input_name.as_str(), input)])?
    };
    let output = outputs
        .values()
        .next()
        .ok_or_else(|| InferError::Backend("model produced no outputs".to_string()))?;

    match kind {
        ModelKind::YoloPose => yolo::postprocess(output, &letterbox, conf_threshold, iou_threshold),
        ModelKind::MovenetLightning | ModelKind::MovenetThunder => {
            movenet::postprocess(output, &letterbox)
        }
    }
}

impl PoseEstimator for OnnxPoseEstimator {
    fn estimate(&self, frame: Arc<Image>) -> impl Future<Output = Result<Vec<Pose>, InferError>> + Send {
        let inner = Arc::clone(&self.inner);
        let kind = self.kind;
        let (conf, iou) = (self.conf_threshold, self.iou_threshold);
        async move {
            tokio::task::spawn_blocking(move || run(&inner, kind, &frame, conf, iou))
                .await
                .map_err(|e| InferError::Backend(format!("inference task failed: {e}")))?
        }
    }

    fn skeleton(&self) -> &[SkeletonEdge] {
        self.kind.skeleton()
    }
}
