//! Mock construction helpers

use crossbeam_channel::{unbounded, Receiver, Sender};
use handwriting_replay::{
    CaptureSession, DrawInstruction, InstructionLog, PointerSample, Position, Recording,
    RecorderConfig, Renderer,
};
use mockall::mock;

mock! {
    pub Surface {}

    impl Renderer for Surface {
        fn clear(&mut self);
        fn begin_path(&mut self, pos: Position);
        fn line_to(&mut self, pos: Position);
    }
}

/// Run scripted samples through a capture session with the default timing
pub fn capture(samples: &[PointerSample]) -> (Recording, InstructionLog) {
    capture_with(RecorderConfig::default(), samples)
}

/// Run scripted samples through a capture session
pub fn capture_with(config: RecorderConfig, samples: &[PointerSample]) -> (Recording, InstructionLog) {
    let session = CaptureSession::new(config);
    let sender = session.sender();
    for sample in samples {
        sender
            .send_sample(*sample)
            .expect("capture session is alive");
    }

    let mut echo = InstructionLog::new();
    let recording = session.finish(&mut echo);
    (recording, echo)
}

/// Renderer forwarding every instruction to a channel, for watching a
/// renderer that has been moved onto a playback thread
pub struct ChannelRenderer {
    tx: Sender<DrawInstruction>,
}

impl ChannelRenderer {
    pub fn new() -> (Self, Receiver<DrawInstruction>) {
        let (tx, rx) = unbounded();
        (Self { tx }, rx)
    }

    fn forward(&self, instruction: DrawInstruction) {
        let _ = self.tx.send(instruction);
    }
}

impl Renderer for ChannelRenderer {
    fn clear(&mut self) {
        self.forward(DrawInstruction::Clear);
    }

    fn begin_path(&mut self, pos: Position) {
        self.forward(DrawInstruction::BeginPath(pos));
    }

    fn line_to(&mut self, pos: Position) {
        self.forward(DrawInstruction::LineTo(pos));
    }
}
