use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source, source::Buffered};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::warn;

type Clip = Buffered<Decoder<BufReader<File>>>;

/// Sound effects the game can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    Shot,
    PowerUp,
}

/// Audio output with pre-loaded sound effects. Every request is fire-and-forget and a
/// missing device or file just means silence.
pub struct AudioManager {
    output: Option<(OutputStream, OutputStreamHandle)>,
    shot: Option<Clip>,
    power_up: Option<Clip>,
}

impl AudioManager {
    /// Opens the default output device and loads `<asset_dir>/sounds/*.wav`
    pub fn new(asset_dir: &Path) -> Self {
        let output = match OutputStream::try_default() {
            Ok(output) => Some(output),
            Err(err) => {
                warn!(error = %err, "failed to initialize audio, continuing without sound");
                None
            }
        };
        if output.is_none() {
            return Self::disabled();
        }

        let sounds = asset_dir.join("sounds");
        Self {
            output,
            shot: load_clip(&sounds.join("pew.wav")),
            power_up: load_clip(&sounds.join("powerup.wav")),
        }
    }

    /// No device, plays nothing
    pub fn disabled() -> Self {
        Self {
            output: None,
            shot: None,
            power_up: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.output.is_some()
    }

    pub fn play(&self, effect: SoundEffect) {
        let (clip, volume) = match effect {
            SoundEffect::Shot => (&self.shot, 0.2),
            SoundEffect::PowerUp => (&self.power_up, 0.5),
        };
        let (Some((_, handle)), Some(clip)) = (&self.output, clip) else {
            return;
        };

        // Playback errors are not worth interrupting the game for
        if let Ok(sink) = Sink::try_new(handle) {
            sink.set_volume(volume);
            sink.append(clip.clone());
            sink.detach();
        }
    }
}

fn load_clip(path: &Path) -> Option<Clip> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "cannot open sound");
            return None;
        }
    };
    match Decoder::new(BufReader::new(file)) {
        Ok(source) => Some(source.buffered()),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "cannot decode sound");
            None
        }
    }
}
