use std::fs::File;
use std::io::{BufReader, ErrorKind, Read, Seek, SeekFrom};
use std::path::Path;

use log::{debug, info, warn};

use super::DecodedAudio;
use crate::error::{FormatError, Result, ViewerError};

/// Bytes of header fields, up to and including `bits_per_sample`
pub const FIELDS_LEN: usize = 36;

/// Minimum readable prefix: the header fields plus the first sub-chunk descriptor
pub const HEADER_LEN: usize = 44;

const PCM_FORMAT: u16 = 1;

/// Fixed RIFF/WAVE header fields, all little-endian
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavHeader {
    pub chunk_id: [u8; 4],
    pub chunk_size: u32,
    pub format: [u8; 4],
    pub subchunk1_id: [u8; 4],
    pub subchunk1_size: u32,
    pub audio_format: u16,
    pub num_channels: u16,
    pub sample_rate: u32,
    pub byte_rate: u32,
    pub block_align: u16,
    pub bits_per_sample: u16,
}

impl WavHeader {
    pub fn parse(bytes: &[u8; FIELDS_LEN]) -> Self {
        let tag = |at: usize| [bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]];
        let u32_at = |at: usize| u32::from_le_bytes(tag(at));
        let u16_at = |at: usize| u16::from_le_bytes([bytes[at], bytes[at + 1]]);

        Self {
            chunk_id: tag(0),
            chunk_size: u32_at(4),
            format: tag(8),
            subchunk1_id: tag(12),
            subchunk1_size: u32_at(16),
            audio_format: u16_at(20),
            num_channels: u16_at(22),
            sample_rate: u32_at(24),
            byte_rate: u32_at(28),
            block_align: u16_at(32),
            bits_per_sample: u16_at(34),
        }
    }

    pub fn is_riff_wave(&self) -> bool {
        &self.chunk_id == b"RIFF" && &self.format == b"WAVE"
    }

    pub fn is_mono_pcm16(&self) -> bool {
        self.audio_format == PCM_FORMAT && self.num_channels == 1 && self.bits_per_sample == 16
    }
}

/// Knobs that tighten decoding beyond the permissive default
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Reject anything other than 16-bit mono PCM
    pub strict_format: bool,
    /// Stop at the data chunk's declared size instead of end of stream
    pub bound_to_data_size: bool,
}

/// Open and decode a WAV file
pub fn load_wav<P: AsRef<Path>>(path: P, options: DecodeOptions) -> Result<DecodedAudio> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| ViewerError::io(path, e))?;
    let audio = decode(&mut BufReader::new(file), options)?;

    info!(
        "Loaded {} samples at {} Hz ({:.2}s) from {}",
        audio.len(),
        audio.sample_rate,
        audio.duration_secs(),
        path.display()
    );
    Ok(audio)
}

/// Decode 16-bit PCM samples from a RIFF/WAVE stream.
///
/// Sub-chunk sizes are only used to skip non-data chunks. Unless
/// `bound_to_data_size` is set, samples are read until the stream runs out,
/// regardless of what the data chunk declares.
pub fn decode<R: Read + Seek>(reader: &mut R, options: DecodeOptions) -> Result<DecodedAudio> {
    let (header, first_descriptor) = read_header(reader)?;

    if !header.is_riff_wave() {
        return Err(FormatError::NotWav.into());
    }
    if options.strict_format && !header.is_mono_pcm16() {
        return Err(FormatError::Unsupported {
            audio_format: header.audio_format,
            channels: header.num_channels,
            bits_per_sample: header.bits_per_sample,
        }
        .into());
    }
    if !header.is_mono_pcm16() {
        debug!(
            "header declares format={} channels={} bits={}, decoding as 16-bit mono anyway",
            header.audio_format, header.num_channels, header.bits_per_sample
        );
    }

    let data_size = find_data_chunk(reader, first_descriptor)?;

    let samples = if options.bound_to_data_size {
        read_samples(&mut Read::take(&mut *reader, u64::from(data_size)))
    } else {
        read_samples(reader)
    };

    Ok(DecodedAudio::new(samples, header.sample_rate))
}

/// Read the header fields and the sub-chunk descriptor that follows them
fn read_header<R: Read>(reader: &mut R) -> Result<(WavHeader, [u8; 8])> {
    let mut fields = [0u8; FIELDS_LEN];
    let mut descriptor = [0u8; HEADER_LEN - FIELDS_LEN];

    match reader
        .read_exact(&mut fields)
        .and_then(|()| reader.read_exact(&mut descriptor))
    {
        Ok(()) => Ok((WavHeader::parse(&fields), descriptor)),
        Err(e) if e.kind() == ErrorKind::UnexpectedEof => Err(FormatError::TruncatedHeader.into()),
        Err(e) => Err(e.into()),
    }
}

/// Walk sub-chunk descriptors, starting with `first`, until "data".
/// Returns the data chunk's declared size.
fn find_data_chunk<R: Read + Seek>(reader: &mut R, first: [u8; 8]) -> Result<u32> {
    let mut descriptor = first;
    loop {
        let (tag, size) = descriptor.split_at(4);
        let size = u32::from_le_bytes([size[0], size[1], size[2], size[3]]);
        if tag == b"data" {
            return Ok(size);
        }

        debug!(
            "skipping {:?} chunk ({} bytes)",
            String::from_utf8_lossy(tag),
            size
        );
        reader.seek(SeekFrom::Current(i64::from(size)))?;

        match reader.read_exact(&mut descriptor) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
                return Err(FormatError::NoDataChunk.into())
            }
            Err(e) => return Err(e.into()),
        }
    }
}

/// Read little-endian i16 samples until the reader is exhausted
fn read_samples<R: Read>(reader: &mut R) -> Vec<f64> {
    let mut samples = Vec::new();
    let mut buf = [0u8; 2];

    loop {
        match reader.read_exact(&mut buf) {
            Ok(()) => samples.push(f64::from(i16::from_le_bytes(buf)) / 32768.0),
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => break,
            Err(e) => {
                warn!("stopping after {} samples: {}", samples.len(), e);
                break;
            }
        }
    }

    samples
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn header(audio_format: u16, channels: u16, sample_rate: u32, bits: u16) -> Vec<u8> {
        let block_align = channels * bits / 8;
        let mut bytes = Vec::with_capacity(HEADER_LEN);
        bytes.extend_from_slice(b"RIFF");
        bytes.extend_from_slice(&36u32.to_le_bytes());
        bytes.extend_from_slice(b"WAVE");
        bytes.extend_from_slice(b"fmt ");
        bytes.extend_from_slice(&16u32.to_le_bytes());
        bytes.extend_from_slice(&audio_format.to_le_bytes());
        bytes.extend_from_slice(&channels.to_le_bytes());
        bytes.extend_from_slice(&sample_rate.to_le_bytes());
        bytes.extend_from_slice(&(sample_rate * u32::from(block_align)).to_le_bytes());
        bytes.extend_from_slice(&block_align.to_le_bytes());
        bytes.extend_from_slice(&bits.to_le_bytes());
        bytes
    }

    fn chunk(tag: &[u8; 4], body: &[u8]) -> Vec<u8> {
        let mut bytes = tag.to_vec();
        bytes.extend_from_slice(&(body.len() as u32).to_le_bytes());
        bytes.extend_from_slice(body);
        bytes
    }

    fn pcm(samples: &[i16]) -> Vec<u8> {
        samples.iter().flat_map(|s| s.to_le_bytes()).collect()
    }

    fn mono_wav(sample_rate: u32, samples: &[i16]) -> Vec<u8> {
        let mut bytes = header(1, 1, sample_rate, 16);
        bytes.extend(chunk(b"data", &pcm(samples)));
        bytes
    }

    fn decode_bytes(bytes: Vec<u8>) -> Result<DecodedAudio> {
        decode(&mut Cursor::new(bytes), DecodeOptions::default())
    }

    #[test]
    fn test_header_fields() {
        let bytes: [u8; FIELDS_LEN] = header(1, 2, 44100, 16).try_into().unwrap();
        let parsed = WavHeader::parse(&bytes);
        assert!(parsed.is_riff_wave());
        assert_eq!(&parsed.subchunk1_id, b"fmt ");
        assert_eq!(parsed.subchunk1_size, 16);
        assert_eq!(parsed.num_channels, 2);
        assert_eq!(parsed.sample_rate, 44100);
        assert_eq!(parsed.byte_rate, 44100 * 4);
        assert_eq!(parsed.block_align, 4);
        assert_eq!(parsed.bits_per_sample, 16);
        assert!(!parsed.is_mono_pcm16());
    }

    #[test]
    fn test_one_second_of_silence() {
        let audio = decode_bytes(mono_wav(8000, &vec![0; 8000])).unwrap();
        assert_eq!(audio.sample_rate, 8000);
        assert_eq!(audio.len(), 8000);
        assert!(audio.samples.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_normalization() {
        let audio = decode_bytes(mono_wav(22050, &[0, 1, -1, 16384, i16::MAX, i16::MIN])).unwrap();
        assert_eq!(
            audio.samples,
            vec![
                0.0,
                1.0 / 32768.0,
                -1.0 / 32768.0,
                0.5,
                32767.0 / 32768.0,
                -1.0
            ]
        );
    }

    #[test]
    fn test_short_stream_is_truncated_header() {
        let mut bytes = mono_wav(8000, &[]);
        bytes.truncate(43);
        let err = decode_bytes(bytes).unwrap_err();
        assert!(matches!(err, ViewerError::Format(FormatError::TruncatedHeader)));

        // Fields present but no room for the first descriptor
        let err = decode_bytes(header(1, 1, 8000, 16)).unwrap_err();
        assert!(matches!(err, ViewerError::Format(FormatError::TruncatedHeader)));

        let err = decode_bytes(Vec::new()).unwrap_err();
        assert!(matches!(err, ViewerError::Format(FormatError::TruncatedHeader)));
    }

    #[test]
    fn test_canonical_layout_data_at_byte_36() {
        let bytes = mono_wav(8000, &[0, 8192, -8192, 0]);
        assert_eq!(bytes.len(), HEADER_LEN + 8);
        assert_eq!(&bytes[FIELDS_LEN..FIELDS_LEN + 4], b"data");

        let audio = decode_bytes(bytes).unwrap();
        assert_eq!(audio.sample_rate, 8000);
        assert_eq!(audio.samples, vec![0.0, 0.25, -0.25, 0.0]);
    }

    #[test]
    fn test_signature_mismatch() {
        let mut bytes = mono_wav(8000, &[1, 2, 3]);
        bytes[0..4].copy_from_slice(b"RIFX");
        assert!(matches!(
            decode_bytes(bytes).unwrap_err(),
            ViewerError::Format(FormatError::NotWav)
        ));

        let mut bytes = mono_wav(8000, &[1, 2, 3]);
        bytes[8..12].copy_from_slice(b"AVI ");
        assert!(matches!(
            decode_bytes(bytes).unwrap_err(),
            ViewerError::Format(FormatError::NotWav)
        ));
    }

    #[test]
    fn test_skips_non_data_chunks() {
        let samples = [100, -200, 300, -400];
        let mut bytes = header(1, 1, 16000, 16);
        bytes.extend(chunk(b"LIST", &[0xAA; 8]));
        bytes.extend(chunk(b"fact", &[0x01, 0x02, 0x03, 0x04]));
        bytes.extend(chunk(b"data", &pcm(&samples)));

        let audio = decode_bytes(bytes).unwrap();
        let expected: Vec<f64> = samples.iter().map(|&s| f64::from(s) / 32768.0).collect();
        assert_eq!(audio.samples, expected);
    }

    #[test]
    fn test_missing_data_chunk() {
        let mut bytes = header(1, 1, 8000, 16);
        bytes.extend(chunk(b"LIST", &[0; 12]));
        assert!(matches!(
            decode_bytes(bytes).unwrap_err(),
            ViewerError::Format(FormatError::NoDataChunk)
        ));

        // Partial descriptor after a skipped chunk
        let mut bytes = header(1, 1, 8000, 16);
        bytes.extend(chunk(b"LIST", &[0; 4]));
        bytes.extend_from_slice(b"dat");
        assert!(matches!(
            decode_bytes(bytes).unwrap_err(),
            ViewerError::Format(FormatError::NoDataChunk)
        ));
    }

    #[test]
    fn test_skip_past_end_finds_no_data() {
        let mut bytes = header(1, 1, 8000, 16);
        bytes.extend_from_slice(b"junk");
        bytes.extend_from_slice(&1000u32.to_le_bytes());
        bytes.extend(chunk(b"data", &pcm(&[1, 2])));
        assert!(matches!(
            decode_bytes(bytes).unwrap_err(),
            ViewerError::Format(FormatError::NoDataChunk)
        ));
    }

    #[test]
    fn test_odd_trailing_byte_is_dropped() {
        let mut bytes = mono_wav(8000, &[7, -7]);
        bytes.push(0x7F);
        let audio = decode_bytes(bytes).unwrap();
        assert_eq!(audio.samples, vec![7.0 / 32768.0, -7.0 / 32768.0]);
    }

    #[test]
    fn test_data_size_is_ignored_by_default() {
        let mut bytes = header(1, 1, 8000, 16);
        bytes.extend(chunk(b"data", &pcm(&[1, 2])));
        // Trailing chunk after the data gets decoded as samples too
        bytes.extend(chunk(b"LIST", &[0; 4]));

        let audio = decode_bytes(bytes.clone()).unwrap();
        assert_eq!(audio.len(), 2 + 6);

        let bounded = decode(
            &mut Cursor::new(bytes),
            DecodeOptions {
                bound_to_data_size: true,
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(bounded.samples, vec![1.0 / 32768.0, 2.0 / 32768.0]);
    }

    #[test]
    fn test_empty_data_chunk_is_not_an_error() {
        let audio = decode_bytes(mono_wav(48000, &[])).unwrap();
        assert!(audio.is_empty());
        assert_eq!(audio.sample_rate, 48000);
    }

    #[test]
    fn test_unvalidated_header_fields() {
        // Stereo 8-bit is still read as 16-bit mono unless strict
        let mut bytes = header(1, 2, 8000, 8);
        bytes.extend(chunk(b"data", &pcm(&[5, 6])));
        let audio = decode_bytes(bytes.clone()).unwrap();
        assert_eq!(audio.len(), 2);

        let err = decode(
            &mut Cursor::new(bytes),
            DecodeOptions {
                strict_format: true,
                ..Default::default()
            },
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            FormatError::Unsupported {
                audio_format: 1,
                channels: 2,
                bits_per_sample: 8
            }
            .to_string()
        );
    }

    #[test]
    fn test_strict_rejects_non_pcm() {
        let mut bytes = header(3, 1, 8000, 16);
        bytes.extend(chunk(b"data", &pcm(&[1])));
        let strict = DecodeOptions {
            strict_format: true,
            ..Default::default()
        };
        assert!(matches!(
            decode(&mut Cursor::new(bytes), strict).unwrap_err(),
            ViewerError::Format(FormatError::Unsupported { audio_format: 3, .. })
        ));

        let audio = decode(&mut Cursor::new(mono_wav(8000, &[1])), strict).unwrap();
        assert_eq!(audio.len(), 1);
    }
}
