use std::path::Path;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::error::{Result, VisError};

/// Fully decoded audio: one normalized `f32` sequence per channel.
pub struct AudioData {
    channels: Vec<Vec<f32>>,
    pub sample_rate: u32,
}

impl AudioData {
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Sample sequence for one channel, if the index exists.
    pub fn channel(&self, index: usize) -> Option<&[f32]> {
        self.channels.get(index).map(Vec::as_slice)
    }

    /// Samples per channel.
    pub fn len(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Decode the whole file up front. One blocking call before the render loop
/// starts; nothing is streamed during visualization.
pub fn decode_audio(path: &Path) -> Result<AudioData> {
    let file = std::fs::File::open(path).map_err(|source| VisError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    let probed = symphonia::default::get_probe().format(
        &hint,
        mss,
        &FormatOptions::default(),
        &MetadataOptions::default(),
    )?;

    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != symphonia::core::codecs::CODEC_TYPE_NULL)
        .ok_or_else(|| VisError::Decode("no audio tracks found".into()))?;

    let track_id = track.id;
    let channel_count = track.codec_params.channels.map_or(1, |c| c.count());
    let sample_rate = track
        .codec_params
        .sample_rate
        .ok_or_else(|| VisError::Decode("sample rate not declared".into()))?;

    let mut decoder =
        symphonia::default::get_codecs().make(&track.codec_params, &DecoderOptions::default())?;

    let mut channels: Vec<Vec<f32>> = vec![Vec::new(); channel_count];

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(symphonia::core::errors::Error::IoError(ref e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(e) => return Err(e.into()),
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(d) => d,
            // Malformed packets are recoverable; skip them and keep going.
            Err(symphonia::core::errors::Error::DecodeError(_)) => continue,
            Err(e) => return Err(e.into()),
        };

        let spec = *decoded.spec();
        let num_frames = decoded.frames();

        let mut sample_buf = SampleBuffer::<f32>::new(num_frames as u64, spec);
        sample_buf.copy_interleaved_ref(decoded);

        for frame in sample_buf.samples().chunks_exact(channel_count) {
            for (ch, &sample) in frame.iter().enumerate() {
                channels[ch].push(sample);
            }
        }
    }

    let data = AudioData {
        channels,
        sample_rate,
    };

    log::info!(
        "Decoded audio: {} samples x {} channels, {}Hz, {:.1}s",
        data.len(),
        data.channel_count(),
        data.sample_rate,
        data.len() as f32 / data.sample_rate as f32
    );

    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_access_is_bounds_checked() {
        let data = AudioData {
            channels: vec![vec![0.0, 0.5], vec![1.0, -1.0]],
            sample_rate: 44_100,
        };
        assert_eq!(data.channel_count(), 2);
        assert_eq!(data.len(), 2);
        assert_eq!(data.channel(1), Some(&[1.0f32, -1.0][..]));
        assert_eq!(data.channel(2), None);
    }

    #[test]
    fn missing_file_reports_file_read() {
        let result = decode_audio(Path::new("/definitely/not/here.wav"));
        assert!(matches!(result, Err(VisError::FileRead { .. })));
    }
}
