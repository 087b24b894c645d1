use {
    crate::RecordError,
    posecam_base::{Stamped, Vec2},
    posecam_image::Image,
    tokio::sync::mpsc,
};

/// What an encoder reports back to the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum EncoderEvent {
    /// A piece of encoded output. May be empty.
    Chunk(Vec<u8>),
    /// All output has been delivered.
    Finalized,
    Failed(String),
}

/// Delivery channel handed to an encoder for one session.
///
/// Every event is stamped with the session it belongs to, so output of an
/// abandoned session can be told apart from the current one.
#[derive(Debug, Clone)]
pub struct ChunkSink {
    session: u64,
    sender: mpsc::UnboundedSender<Stamped<EncoderEvent>>,
}

impl ChunkSink {
    pub fn new(session: u64, sender: mpsc::UnboundedSender<Stamped<EncoderEvent>>) -> Self {
        Self { session, sender }
    }

    /// Returns false once the controller is gone.
    pub fn chunk(&self, bytes: Vec<u8>) -> bool {
        self.send(EncoderEvent::Chunk(bytes))
    }

    pub fn finalized(&self) -> bool {
        self.send(EncoderEvent::Finalized)
    }

    pub fn failed(&self, message: impl Into<String>) -> bool {
        self.send(EncoderEvent::Failed(message.into()))
    }

    fn send(&self, event: EncoderEvent) -> bool {
        self.sender.send(Stamped::new(self.session, event)).is_ok()
    }
}

/// A video encoder fed with RGB8 frames.
///
/// Called from the capture thread. A successful `finish` has delivered every
/// remaining chunk followed by exactly one `Finalized` or `Failed`; an `Err`
/// from it means nothing was reported.
pub trait Encoder: Send + 'static {
    fn start(&mut self, size: Vec2<usize>, sink: ChunkSink) -> Result<(), RecordError>;
    fn write_frame(&mut self, frame: &Image) -> Result<(), RecordError>;
    fn finish(&mut self) -> Result<(), RecordError>;
}

/// Builds a fresh encoder for each recording session.
pub type MakeEncoder = Box<dyn Fn() -> Box<dyn Encoder> + Send>;
