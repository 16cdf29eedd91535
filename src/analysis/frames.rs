//! Fixed-size, non-overlapping frame extraction.

/// Walks a sample sequence in back-to-back blocks of `frame_len` samples.
///
/// A block is admitted only while `cursor + frame_len < total`: the trailing
/// block is dropped when partial, and a block ending exactly at the end of
/// the sequence is dropped too. The strict bound is deliberate and the
/// frame-count tests pin it; it is not an off-by-one.
pub struct FrameExtractor<'a> {
    samples: &'a [f32],
    frame_len: usize,
    cursor: usize,
}

impl<'a> FrameExtractor<'a> {
    pub fn new(samples: &'a [f32], frame_len: usize) -> Self {
        assert!(frame_len > 0, "frame length must be positive");
        Self {
            samples,
            frame_len,
            cursor: 0,
        }
    }
}

impl<'a> Iterator for FrameExtractor<'a> {
    type Item = &'a [f32];

    fn next(&mut self) -> Option<&'a [f32]> {
        if self.cursor + self.frame_len < self.samples.len() {
            let frame = &self.samples[self.cursor..self.cursor + self.frame_len];
            self.cursor += self.frame_len;
            Some(frame)
        } else {
            None
        }
    }
}

/// Frame count for a sequence of `total` samples at frame length `n`.
pub fn total_frames(total: usize, n: usize) -> usize {
    if total > n {
        (total - n).div_ceil(n)
    } else {
        0
    }
}
