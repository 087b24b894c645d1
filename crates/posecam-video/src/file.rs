use {
    crate::{CaptureError, StreamInfo, VideoDevice},
    posecam_base::Vec2,
    posecam_image::{Image, PixelFormat},
    std::{
        io::{BufReader, Read},
        path::PathBuf,
        process::{Child, ChildStdout, Command, Stdio},
    },
};

/// Looping playback of a media file through an `ffmpeg` child process.
///
/// `ffprobe` supplies the native size and rate; `ffmpeg` decodes to raw RGB24
/// paced at the native rate (`-re`) and restarts at the end (`-stream_loop -1`).
pub struct FileDevice {
    path: PathBuf,
    process: Option<Child>,
    stdout: Option<BufReader<ChildStdout>>,
    size: Vec2<usize>,
}

impl FileDevice {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            process: None,
            stdout: None,
            size: Vec2::zero(),
        }
    }

    fn probe(&self) -> Result<StreamInfo, CaptureError> {
        let output = Command::new("ffprobe")
            .args(["-v", "error", "-select_streams", "v:0"])
            .args(["-show_entries", "stream=width,height,r_frame_rate"])
            .args(["-of", "csv=p=0"])
            .arg(&self.path)
            .output()
            .map_err(|e| CaptureError::Device(format!("failed to run ffprobe: {e}")))?;

        if !output.status.success() {
            return Err(CaptureError::Device(format!(
                "ffprobe failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        parse_probe(&String::from_utf8_lossy(&output.stdout))
    }
}

/// Parse `width,height,num/den` as printed by ffprobe with `csv=p=0`.
pub(crate) fn parse_probe(text: &str) -> Result<StreamInfo, CaptureError> {
    let line = text.lines().next().unwrap_or("").trim();
    let parts: Vec<&str> = line.split(',').collect();
    if parts.len() < 3 {
        return Err(CaptureError::Device(format!(
            "no video stream (ffprobe said {line:?})"
        )));
    }

    let dimension = |s: &str| {
        s.parse::<usize>()
            .ok()
            .filter(|&v| v > 0)
            .ok_or_else(|| CaptureError::Device(format!("invalid dimension {s:?}")))
    };
    let size = Vec2::new(dimension(parts[0])?, dimension(parts[1])?);

    // "30/1", "30000/1001" or a plain number; unknown rates fall back to 30
    let frame_rate = match parts[2].split_once('/') {
        Some((num, den)) => match (num.parse::<f32>(), den.parse::<f32>()) {
            (Ok(num), Ok(den)) if den > 0.0 => num / den,
            _ => 30.0,
        },
        None => parts[2].parse().unwrap_or(30.0),
    };
    let frame_rate = if frame_rate.is_finite() && frame_rate > 0.0 {
        frame_rate
    } else {
        30.0
    };

    Ok(StreamInfo { size, frame_rate })
}

impl VideoDevice for FileDevice {
    fn open(&mut self) -> Result<StreamInfo, CaptureError> {
        self.close();
        let info = self.probe()?;

        let mut process = Command::new("ffmpeg")
            .args(["-v", "error", "-re", "-stream_loop", "-1", "-i"])
            .arg(&self.path)
            .args(["-an", "-f", "rawvideo", "-pix_fmt", "rgb24"])
            .args(["-s", &format!("{}x{}", info.size.x, info.size.y)])
            .arg("-")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| CaptureError::Device(format!("failed to start ffmpeg: {e}")))?;

        let stdout = process
            .stdout
            .take()
            .ok_or_else(|| CaptureError::Stream("ffmpeg stdout not captured".to_string()))?;

        log::info!(
            "playing {} ({}x{} @ {:.2} fps)",
            self.path.display(),
            info.size.x,
            info.size.y,
            info.frame_rate
        );
        self.size = info.size;
        self.stdout = Some(BufReader::with_capacity(info.size.area() * 3 * 2, stdout));
        self.process = Some(process);
        Ok(info)
    }

    fn close(&mut self) {
        self.stdout.take();
        if let Some(mut process) = self.process.take() {
            let _ = process.kill();
            let _ = process.wait();
        }
    }

    fn blocking_capture(&mut self) -> Result<Image, CaptureError> {
        let stdout = self
            .stdout
            .as_mut()
            .ok_or_else(|| CaptureError::Stream("file not open".to_string()))?;
        let mut data = vec![0u8; self.size.area() * 3];
        stdout
            .read_exact(&mut data)
            .map_err(|e| CaptureError::Stream(format!("decoder ended: {e}")))?;
        Ok(Image::new(self.size, data, PixelFormat::Rgb8))
    }
}

impl Drop for FileDevice {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_probe_fractional_rate() {
        let info = parse_probe("1920,1080,30000/1001\n").unwrap();
        assert_eq!(info.size, Vec2::new(1920, 1080));
        assert!((info.frame_rate - 29.97).abs() < 0.01);
    }

    #[test]
    fn test_parse_probe_bad_rate_defaults() {
        let info = parse_probe("640,480,0/0").unwrap();
        assert_eq!(info.frame_rate, 30.0);
    }

    #[test]
    fn test_parse_probe_no_stream() {
        assert!(matches!(parse_probe(""), Err(CaptureError::Device(_))));
        assert!(matches!(parse_probe("0,480,25/1"), Err(CaptureError::Device(_))));
    }
}
