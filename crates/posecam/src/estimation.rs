use {
    crate::render::{MIN_CONFIDENCE, render},
    posecam_base::Epoch,
    posecam_image::{Image, SharedSurface},
    posecam_infer::{InferError, Pose, PoseEstimator, SkeletonEdge},
    std::{
        sync::{
            Arc, Mutex, OnceLock,
            atomic::{AtomicUsize, Ordering},
        },
        time::Duration,
    },
    tokio::{
        sync::watch,
        task::JoinHandle,
        time::{Interval, MissedTickBehavior},
    },
};

/// The estimator, once it finished loading.
pub type EstimatorSlot<E> = Arc<OnceLock<Arc<E>>>;

/// Latest decoded frame of the active source.
pub type FrameSlot = watch::Receiver<Option<Arc<Image>>>;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoopState {
    #[default]
    Stopped,
    Running,
    /// Stopped by an estimation error.
    Failed(String),
}

/// What one iteration did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Iteration {
    /// No estimator yet, nothing drawn.
    Skipped,
    /// The loop was cancelled while the estimate was in flight; result dropped.
    Stale,
    /// Frame drawn, with this many poses returned.
    Drawn { poses: usize },
}

/// Fixed-rate tick pacing the loop. Ticks missed during a slow estimate are
/// skipped, so iterations never queue up.
pub struct FrameClock {
    interval: Interval,
}

impl FrameClock {
    pub fn new(rate: f32) -> Self {
        let period = Duration::from_secs_f32(1.0 / rate.max(1.0));
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self { interval }
    }

    pub async fn tick(&mut self) {
        self.interval.tick().await;
    }
}

/// Copy `frame` onto the surface at its native size and overlay the first pose.
pub fn paint(
    surface: &SharedSurface,
    frame: &Image,
    poses: &[Pose],
    skeleton: &[SkeletonEdge],
) -> Result<(), InferError> {
    // draw_image replaces every pixel, nothing half-drawn survives a poisoned lock
    let mut surface = surface.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    surface.draw_image(frame)?;
    if let Some(pose) = poses.first() {
        render(&pose.keypoints, skeleton, MIN_CONFIDENCE, &mut *surface);
    }
    Ok(())
}

/// One pass: estimate, then draw frame and skeleton.
///
/// The result is dropped when `generation` stopped being current while the
/// estimate was running.
pub async fn run_iteration<E: PoseEstimator>(
    estimator: Option<&E>,
    frame: Arc<Image>,
    surface: &SharedSurface,
    epoch: &Epoch,
    generation: u64,
) -> Result<Iteration, InferError> {
    let Some(estimator) = estimator else {
        return Ok(Iteration::Skipped);
    };
    let poses = estimator.estimate(Arc::clone(&frame)).await?;
    if !epoch.is_current(generation) {
        return Ok(Iteration::Stale);
    }
    paint(surface, &frame, &poses, estimator.skeleton())?;
    Ok(Iteration::Drawn { poses: poses.len() })
}

/// Decrements the live-loop count however the task ends, abort included.
struct ActiveGuard(Arc<AtomicUsize>);

impl ActiveGuard {
    fn new(count: &Arc<AtomicUsize>) -> Self {
        count.fetch_add(1, Ordering::SeqCst);
        Self(Arc::clone(count))
    }
}

impl Drop for ActiveGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// The cancellable per-frame estimation task.
///
/// At most one loop task exists at a time: `start` cancels the previous one
/// and waits for it to be gone before spawning the next.
pub struct EstimationLoop {
    epoch: Epoch,
    handle: Option<JoinHandle<()>>,
    state: Arc<Mutex<LoopState>>,
    active: Arc<AtomicUsize>,
    rate: f32,
}

impl EstimationLoop {
    pub fn new(rate: f32) -> Self {
        Self {
            epoch: Epoch::new(),
            handle: None,
            state: Arc::new(Mutex::new(LoopState::Stopped)),
            active: Arc::new(AtomicUsize::new(0)),
            rate,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
            .lock()
            .map(|state| state.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    pub fn is_running(&self) -> bool {
        self.state() == LoopState::Running
    }

    /// Number of loop tasks currently alive.
    pub fn active_loops(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }

    /// Invalidate the running loop and wait until its task is gone.
    pub async fn cancel(&mut self) {
        self.epoch.advance();
        if let Some(handle) = self.handle.take() {
            handle.abort();
            // cancellation is the expected outcome
            let _ = handle.await;
        }
        set_state(&self.state, LoopState::Stopped);
    }

    /// Replace any running loop with one over `frames`.
    pub async fn start<E: PoseEstimator>(
        &mut self,
        estimator: EstimatorSlot<E>,
        frames: FrameSlot,
        surface: SharedSurface,
    ) {
        self.cancel().await;

        let generation = self.epoch.current();
        let epoch = self.epoch.clone();
        let state = Arc::clone(&self.state);
        let active = Arc::clone(&self.active);
        let rate = self.rate;
        set_state(&state, LoopState::Running);
        log::info!("estimation loop {} started", generation);

        self.handle = Some(tokio::spawn(async move {
            let _guard = ActiveGuard::new(&active);
            let mut clock = FrameClock::new(rate);
            loop {
                clock.tick().await;
                if !epoch.is_current(generation) {
                    break;
                }
                let Some(frame) = frames.borrow().clone() else {
                    continue;
                };
                let ready = estimator.get().map(Arc::as_ref);
                match run_iteration(ready, frame, &surface, &epoch, generation).await {
                    Ok(Iteration::Stale) => break,
                    Ok(_) => {}
                    Err(error) => {
                        log::error!("estimation loop {} stopped: {}", generation, error);
                        if epoch.is_current(generation) {
                            set_state(&state, LoopState::Failed(error.to_string()));
                        }
                        break;
                    }
                }
            }
        }));
    }
}

fn set_state(state: &Mutex<LoopState>, value: LoopState) {
    match state.lock() {
        Ok(mut state) => *state = value,
        Err(poisoned) => *poisoned.into_inner() = value,
    }
}
