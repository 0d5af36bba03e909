pub mod wav;

pub use wav::{decode, load_wav, DecodeOptions, WavHeader};

/// Decoded mono PCM audio
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedAudio {
    /// Normalized samples in [-1, 1)
    pub samples: Vec<f64>,
    pub sample_rate: u32,
}

impl DecodedAudio {
    pub fn new(samples: Vec<f64>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Time offset of a sample index in seconds, 0 when the rate is unknown
    pub fn seconds_at(&self, index: u64) -> f64 {
        if self.sample_rate == 0 {
            0.0
        } else {
            index as f64 / self.sample_rate as f64
        }
    }

    pub fn duration_secs(&self) -> f64 {
        self.seconds_at(self.samples.len() as u64)
    }
}
