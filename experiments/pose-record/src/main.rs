use {
    minifb::{Key, KeyRepeat, Window, WindowOptions},
    pose_record::keys::{Action, HELP, action_for},
    posecam::{AppConfig, AppContext, AppError},
    posecam_base::{LogTarget, init_logger, log_fatal, logging::default_level},
    posecam_infer::{ModelSource, OnnxBackend, OnnxPoseEstimator},
    posecam_record::{Encoder, FfmpegEncoder, MakeEncoder},
    std::{path::PathBuf, time::Duration},
};

const IDLE_WIDTH: usize = 640;
const IDLE_HEIGHT: usize = 480;

struct Args {
    config: Option<PathBuf>,
    media: Option<PathBuf>,
}

/// `pose-record [--config FILE] [MEDIA]`; MEDIA is what the F key plays.
fn parse_args() -> Args {
    let mut args = Args {
        config: None,
        media: None,
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        if arg == "--config" {
            args.config = iter.next().map(PathBuf::from);
        } else {
            args.media = Some(PathBuf::from(arg));
        }
    }
    args
}

fn title(ctx: &AppContext<OnnxPoseEstimator>) -> String {
    let ui = ctx.ui();
    let mut title = format!("{} | [R] {}", ui.status, ui.record.label);
    if ui.download_enabled {
        title.push_str(" | [D] Download");
    }
    title
}

async fn trigger(ctx: &mut AppContext<OnnxPoseEstimator>, action: Action, media: &Option<PathBuf>) {
    let result = match action {
        Action::Camera => ctx.choose_camera().await,
        Action::File => ctx.choose_file(media.clone()).await,
        Action::Record => ctx.toggle_record().map(|_| ()),
        Action::Download => ctx.download().map(|path| println!("saved {}", path.display())),
        Action::Quit => Ok(()),
    };
    match result {
        Ok(()) => {}
        Err(AppError::NoFile) => println!("no media file given on the command line"),
        Err(error) => log::warn!("{:?} failed: {}", action, error),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = parse_args();
    let config = AppConfig::load(args.config.as_deref())?;

    let target = match &config.log_dir {
        Some(dir) => LogTarget::Directory(dir.clone()),
        None => LogTarget::Stdout,
    };
    init_logger(target, default_level())?;

    println!("Pose Record");
    println!("Model: {} ({})", config.model_path.display(), config.model_kind);
    println!("Controls: {}", HELP);
    println!();

    let encoder_config = config.encoder_config();
    let make_encoder: MakeEncoder = Box::new(move || -> Box<dyn Encoder> {
        Box::new(FfmpegEncoder::new(encoder_config.clone()))
    });
    let mut ctx: AppContext<OnnxPoseEstimator> = AppContext::new(config.clone(), make_encoder);

    let (kind, model_path, device) = (config.model_kind, config.model_path.clone(), config.device.clone());
    ctx.load_model(move || {
        let backend = OnnxBackend::new(device);
        OnnxPoseEstimator::new(kind, ModelSource::File(model_path), &backend)
    });

    let mut window = Window::new(&title(&ctx), IDLE_WIDTH, IDLE_HEIGHT, WindowOptions {
        resize: true,
        ..WindowOptions::default()
    })?;
    window.set_target_fps(config.refresh_rate.round() as usize);

    let mut shown_title = String::new();
    while window.is_open() {
        ctx.tick().await;
        while let Some(alert) = ctx.ui_mut().take_alert() {
            eprintln!("{}", alert);
        }

        let mut quit = false;
        for key in window.get_keys_pressed(KeyRepeat::No) {
            match action_for(key) {
                Some(Action::Quit) => quit = true,
                Some(action) => trigger(&mut ctx, action, &args.media).await,
                None => {}
            }
        }
        if quit || window.is_key_down(Key::Escape) {
            break;
        }

        let next_title = title(&ctx);
        if next_title != shown_title {
            window.set_title(&next_title);
            shown_title = next_title;
        }

        let (buffer, size) = match ctx.surface().lock() {
            Ok(surface) => (surface.to_u32(), surface.size()),
            Err(_) => log_fatal!("surface lock poisoned"),
        };
        if size.area() == 0 {
            window.update();
        } else {
            window.update_with_buffer(&buffer, size.x, size.y)?;
        }

        // give the estimation loop and the source workers a turn
        tokio::time::sleep(Duration::from_millis(1)).await;
    }

    println!("Exiting...");
    ctx.shutdown().await;
    Ok(())
}
