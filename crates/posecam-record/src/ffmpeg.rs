use {
    crate::{ChunkSink, Encoder, EncoderConfig, RecordError},
    posecam_base::Vec2,
    posecam_image::{Image, PixelFormat},
    std::{
        io::{Read, Write},
        process::{Child, ChildStdin, Command, Stdio},
        thread::JoinHandle,
    },
};

const READ_CHUNK: usize = 64 * 1024;

/// VP8/WebM encoding through an `ffmpeg` child process.
///
/// Raw RGB24 frames go in on stdin. Whatever ffmpeg writes to stdout is
/// delivered as chunks by a reader thread. Closing stdin makes ffmpeg write
/// the trailer and exit; `Finalized` follows a clean exit.
pub struct FfmpegEncoder {
    config: EncoderConfig,
    size: Vec2<usize>,
    process: Option<Child>,
    stdin: Option<ChildStdin>,
    reader: Option<JoinHandle<Result<(), String>>>,
    sink: Option<ChunkSink>,
}

impl FfmpegEncoder {
    pub fn new(config: EncoderConfig) -> Self {
        Self {
            config,
            size: Vec2::zero(),
            process: None,
            stdin: None,
            reader: None,
            sink: None,
        }
    }

    fn command(&self, size: Vec2<usize>) -> Command {
        let mut command = Command::new(&self.config.program);
        command
            .args(["-v", "error", "-f", "rawvideo", "-pix_fmt", "rgb24"])
            .args(["-s", &format!("{}x{}", size.x, size.y)])
            .args(["-r", &format!("{}", self.config.frame_rate)])
            .args(["-i", "-"])
            .args(["-c:v", &self.config.codec])
            .args(["-b:v", &self.config.bitrate.to_string()])
            .args(["-deadline", "realtime", "-f", "webm", "-"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null());
        command
    }
}

impl Encoder for FfmpegEncoder {
    fn start(&mut self, size: Vec2<usize>, sink: ChunkSink) -> Result<(), RecordError> {
        if self.process.is_some() {
            return Err(RecordError::Encoder("encoder already started".to_string()));
        }
        let mut process = self
            .command(size)
            .spawn()
            .map_err(|e| RecordError::Encoder(format!("failed to start ffmpeg: {e}")))?;
        let stdin = process
            .stdin
            .take()
            .ok_or_else(|| RecordError::Encoder("ffmpeg stdin not captured".to_string()))?;
        let mut stdout = process
            .stdout
            .take()
            .ok_or_else(|| RecordError::Encoder("ffmpeg stdout not captured".to_string()))?;

        let reader = std::thread::Builder::new()
            .name("encoder-output".to_string())
            .spawn({
                let sink = sink.clone();
                move || {
                    let mut buffer = vec![0u8; READ_CHUNK];
                    loop {
                        match stdout.read(&mut buffer) {
                            Ok(0) => return Ok(()),
                            Ok(n) => {
                                // keep draining even if nobody listens, ffmpeg must not block
                                sink.chunk(buffer[..n].to_vec());
                            }
                            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                            Err(e) => return Err(format!("reading encoder output: {e}")),
                        }
                    }
                }
            })?;

        log::info!(
            "encoder started: {}x{} @ {} fps, {}",
            size.x,
            size.y,
            self.config.frame_rate,
            self.config.codec
        );
        self.size = size;
        self.process = Some(process);
        self.stdin = Some(stdin);
        self.reader = Some(reader);
        self.sink = Some(sink);
        Ok(())
    }

    fn write_frame(&mut self, frame: &Image) -> Result<(), RecordError> {
        if frame.format != PixelFormat::Rgb8 || frame.size != self.size {
            return Err(RecordError::Encoder(format!(
                "frame {:?} {}x{} does not match session {}x{}",
                frame.format, frame.size.x, frame.size.y, self.size.x, self.size.y
            )));
        }
        let stdin = self
            .stdin
            .as_mut()
            .ok_or_else(|| RecordError::Encoder("encoder not started".to_string()))?;
        stdin
            .write_all(&frame.data)
            .map_err(|e| RecordError::Encoder(format!("writing frame: {e}")))
    }

    fn finish(&mut self) -> Result<(), RecordError> {
        let sink = self
            .sink
            .take()
            .ok_or_else(|| RecordError::Encoder("encoder not started".to_string()))?;

        // EOF on stdin makes ffmpeg write the trailer and exit
        self.stdin.take();
        let read = match self.reader.take().map(JoinHandle::join) {
            Some(Ok(result)) => result,
            Some(Err(_)) => Err("encoder output thread panicked".to_string()),
            None => Ok(()),
        };
        let exit = match self.process.take() {
            Some(mut process) => match process.wait() {
                Ok(status) if status.success() => Ok(()),
                Ok(status) => Err(format!("ffmpeg exited with {status}")),
                Err(e) => Err(format!("waiting for ffmpeg: {e}")),
            },
            None => Ok(()),
        };

        match read.and(exit) {
            Ok(()) => {
                log::info!("encoder finalized");
                sink.finalized();
            }
            Err(message) => {
                log::error!("encoder failed: {}", message);
                sink.failed(message);
            }
        }
        Ok(())
    }
}

impl Drop for FfmpegEncoder {
    fn drop(&mut self) {
        self.stdin.take();
        if let Some(mut process) = self.process.take() {
            let _ = process.kill();
            let _ = process.wait();
        }
    }
}
