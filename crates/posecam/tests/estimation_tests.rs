mod common;

use {
    common::{MockEstimator, abc_pose},
    posecam::{EstimationLoop, Iteration, LoopState, run_iteration},
    posecam_base::{Epoch, Vec2},
    posecam_image::{Image, Rgb, Surface},
    std::{
        sync::{Arc, OnceLock, atomic::Ordering},
        time::Duration,
    },
    tokio::sync::watch,
};

fn frame() -> Arc<Image> {
    Arc::new(Image::filled(Vec2::new(12, 10), Rgb::new(10, 20, 30)))
}

async fn wait_until(mut condition: impl FnMut() -> bool) {
    for _ in 0..200 {
        if condition() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("condition not reached in time");
}

#[tokio::test]
async fn test_no_poses_leaves_raw_frame() {
    let surface = Surface::shared(Vec2::zero());
    let estimator = MockEstimator::new(vec![]);
    let epoch = Epoch::new();
    let frame = frame();

    let result = run_iteration(Some(&estimator), Arc::clone(&frame), &surface, &epoch, epoch.current())
        .await
        .unwrap();

    assert_eq!(result, Iteration::Drawn { poses: 0 });
    let snapshot = surface.lock().unwrap().snapshot();
    assert_eq!(snapshot, *frame);
}

#[tokio::test]
async fn test_first_pose_is_overlaid() {
    let surface = Surface::shared(Vec2::zero());
    let estimator = MockEstimator::new(vec![abc_pose()]);
    let epoch = Epoch::new();

    let result = run_iteration(Some(&estimator), frame(), &surface, &epoch, epoch.current())
        .await
        .unwrap();

    assert_eq!(result, Iteration::Drawn { poses: 1 });
    let surface = surface.lock().unwrap();
    assert_eq!(surface.size(), Vec2::new(12, 10));
    assert_eq!(surface.pixel(2, 2), Some(Rgb::RED));
    // B scores below the threshold
    assert_eq!(surface.pixel(10, 2), Some(Rgb::new(10, 20, 30)));
}

#[tokio::test]
async fn test_skipped_without_estimator() {
    let surface = Surface::shared(Vec2::new(3, 3));
    let epoch = Epoch::new();
    let result = run_iteration::<MockEstimator>(None, frame(), &surface, &epoch, epoch.current())
        .await
        .unwrap();
    assert_eq!(result, Iteration::Skipped);
    assert_eq!(surface.lock().unwrap().size(), Vec2::new(3, 3));
}

#[tokio::test]
async fn test_result_dropped_after_cancel() {
    let surface = Surface::shared(Vec2::new(3, 3));
    let mut estimator = MockEstimator::new(vec![abc_pose()]);
    estimator.delay = Duration::from_millis(50);
    let epoch = Epoch::new();
    let generation = epoch.current();

    let pending = run_iteration(Some(&estimator), frame(), &surface, &epoch, generation);
    let advance = async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        epoch.advance();
    };
    let (result, ()) = tokio::join!(pending, advance);

    assert_eq!(result.unwrap(), Iteration::Stale);
    assert_eq!(surface.lock().unwrap().size(), Vec2::new(3, 3));
}

#[tokio::test]
async fn test_restarts_keep_one_loop() {
    let surface = Surface::shared(Vec2::zero());
    let slot = Arc::new(OnceLock::new());
    let _ = slot.set(Arc::new(MockEstimator::new(vec![])));
    let (_sender, frames) = watch::channel(Some(frame()));

    let mut estimation = EstimationLoop::new(100.0);
    for _ in 0..5 {
        estimation
            .start(Arc::clone(&slot), frames.clone(), surface.clone())
            .await;
    }
    tokio::time::sleep(Duration::from_millis(30)).await;

    assert_eq!(estimation.active_loops(), 1);
    assert!(estimation.is_running());

    estimation.cancel().await;
    assert_eq!(estimation.active_loops(), 0);
    assert_eq!(estimation.state(), LoopState::Stopped);
}

#[tokio::test]
async fn test_loop_paints_and_picks_up_late_estimator() {
    let surface = Surface::shared(Vec2::zero());
    let slot = Arc::new(OnceLock::new());
    let (_sender, frames) = watch::channel(Some(frame()));

    let mut estimation = EstimationLoop::new(100.0);
    estimation
        .start(Arc::clone(&slot), frames, surface.clone())
        .await;
    tokio::time::sleep(Duration::from_millis(30)).await;
    assert_eq!(surface.lock().unwrap().size(), Vec2::zero());

    let estimator = MockEstimator::new(vec![abc_pose()]);
    let calls = Arc::clone(&estimator.calls);
    let _ = slot.set(Arc::new(estimator));
    wait_until(|| surface.lock().unwrap().pixel(2, 2) == Some(Rgb::RED)).await;
    assert!(calls.load(Ordering::SeqCst) > 0);

    estimation.cancel().await;
}

#[tokio::test]
async fn test_error_stops_loop() {
    let surface = Surface::shared(Vec2::zero());
    let mut estimator = MockEstimator::new(vec![]);
    estimator.fail = true;
    let slot = Arc::new(OnceLock::new());
    let _ = slot.set(Arc::new(estimator));
    let (_sender, frames) = watch::channel(Some(frame()));

    let mut estimation = EstimationLoop::new(100.0);
    estimation.start(slot, frames, surface).await;
    wait_until(|| matches!(estimation.state(), LoopState::Failed(_))).await;

    let LoopState::Failed(message) = estimation.state() else {
        unreachable!();
    };
    assert!(message.contains("model crashed"));
    wait_until(|| estimation.active_loops() == 0).await;
}

#[tokio::test]
async fn test_poisoned_surface_still_painted() {
    let surface = Surface::shared(Vec2::new(3, 3));
    let holder = surface.clone();
    let _ = std::thread::spawn(move || {
        let _guard = holder.lock().unwrap();
        panic!("painter crashed");
    })
    .join();
    assert!(surface.is_poisoned());

    let estimator = MockEstimator::new(vec![]);
    let epoch = Epoch::new();
    let result = run_iteration(Some(&estimator), frame(), &surface, &epoch, epoch.current())
        .await
        .unwrap();

    assert_eq!(result, Iteration::Drawn { poses: 0 });
    let size = surface.lock().unwrap_or_else(|p| p.into_inner()).size();
    assert_eq!(size, Vec2::new(12, 10));
}
