use crate::analysis::bars;
use crate::analysis::fft::FftEngine;
use crate::analysis::frames::FrameExtractor;
use crate::analysis::spectrum;
use crate::config::Settings;
use crate::error::Result;
use crate::render::pacer::{PaceOutcome, Pacer};
use crate::render::Renderer;

/// Drives the per-frame pipeline: extract, transform, reduce, map, render,
/// then one pacer wait. All scratch storage lives here and is overwritten in
/// full every frame.
pub struct Visualizer {
    engine: FftEngine,
    scale: f32,
    max_bar_width: usize,
    input: Vec<f32>,
    output: Vec<f32>,
    magnitudes: Vec<f32>,
    bars: Vec<usize>,
    line: String,
}

impl Visualizer {
    pub fn new(settings: &Settings) -> Result<Self> {
        let engine = FftEngine::new(settings.fft_size)?;
        let input = engine.complex_buffer();
        let output = engine.complex_buffer();
        let bins = engine.bins();
        Ok(Self {
            engine,
            scale: settings.scale,
            max_bar_width: settings.max_bar_width,
            input,
            output,
            magnitudes: vec![0.0; bins],
            bars: vec![0; bins],
            line: String::new(),
        })
    }

    /// Renders every admissible frame of `samples`, waiting out the pacer
    /// after each one (including the last). Returns the number of frames
    /// rendered; a `Stop` from the pacer ends the run at the frame boundary.
    pub fn run<R: Renderer, P: Pacer>(
        &mut self,
        samples: &[f32],
        renderer: &mut R,
        pacer: &mut P,
    ) -> Result<usize> {
        let mut rendered = 0;
        for frame in FrameExtractor::new(samples, self.engine.size()) {
            self.load_frame(frame);
            self.engine.transform(&mut self.output, &self.input);
            spectrum::magnitudes_into(&self.output, &mut self.magnitudes);
            bars::bar_lengths_into(
                &self.magnitudes,
                self.scale,
                self.max_bar_width,
                &mut self.bars,
            );
            self.format_line();

            renderer.clear()?;
            renderer.write_line(&self.line)?;
            rendered += 1;

            if pacer.wait()? == PaceOutcome::Stop {
                log::info!("Stopped by user after {} frames", rendered);
                return Ok(rendered);
            }
        }
        Ok(rendered)
    }

    fn load_frame(&mut self, frame: &[f32]) {
        for (slot, &sample) in self.input.chunks_exact_mut(2).zip(frame) {
            slot[0] = sample;
            slot[1] = 0.0;
        }
    }

    /// One `'█'` run plus a separating space per bin, all on a single line.
    fn format_line(&mut self) {
        self.line.clear();
        for &len in &self.bars {
            for _ in 0..len {
                self.line.push('█');
            }
            self.line.push(' ');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::CaptureRenderer;
    use std::time::{Duration, Instant};

    fn settings(fft_size: usize) -> Settings {
        Settings {
            fft_size,
            channel: 0,
            delay: Duration::from_millis(100),
            max_bar_width: 50,
            scale: 10.0,
        }
    }

    struct ZeroPacer;

    impl Pacer for ZeroPacer {
        fn wait(&mut self) -> Result<PaceOutcome> {
            Ok(PaceOutcome::Continue)
        }
    }

    struct SleepPacer(Duration);

    impl Pacer for SleepPacer {
        fn wait(&mut self) -> Result<PaceOutcome> {
            std::thread::sleep(self.0);
            Ok(PaceOutcome::Continue)
        }
    }

    struct StopAfter(usize);

    impl Pacer for StopAfter {
        fn wait(&mut self) -> Result<PaceOutcome> {
            self.0 -= 1;
            if self.0 == 0 {
                Ok(PaceOutcome::Stop)
            } else {
                Ok(PaceOutcome::Continue)
            }
        }
    }

    struct TimestampRenderer {
        writes: Vec<Instant>,
    }

    impl Renderer for TimestampRenderer {
        fn clear(&mut self) -> Result<()> {
            Ok(())
        }

        fn write_line(&mut self, _line: &str) -> Result<()> {
            self.writes.push(Instant::now());
            Ok(())
        }
    }

    fn noise(len: usize) -> Vec<f32> {
        let mut state = 0x5eed_f00d_u32;
        (0..len)
            .map(|_| {
                state = state.wrapping_mul(1664525).wrapping_add(1013904223);
                (state >> 8) as f32 / (1 << 24) as f32 * 2.0 - 1.0
            })
            .collect()
    }

    fn run_captured(samples: &[f32], fft_size: usize) -> (usize, CaptureRenderer) {
        let mut vis = Visualizer::new(&settings(fft_size)).unwrap();
        let mut renderer = CaptureRenderer::new();
        let count = vis.run(samples, &mut renderer, &mut ZeroPacer).unwrap();
        (count, renderer)
    }

    #[test]
    fn renders_one_line_per_admitted_frame() {
        let samples = vec![0.25f32; 10];
        let (count, renderer) = run_captured(&samples, 4);
        assert_eq!(count, 2);
        assert_eq!(renderer.frames.len(), 2);
        assert_eq!(renderer.clears, 2);
    }

    #[test]
    fn short_input_renders_nothing() {
        let samples = vec![0.5f32; 4];
        let (count, renderer) = run_captured(&samples, 4);
        assert_eq!(count, 0);
        assert!(renderer.frames.is_empty());
        assert_eq!(renderer.clears, 0);
    }

    #[test]
    fn impulse_frame_renders_exact_line() {
        // One admitted frame [1, 0, 0, 0]: flat spectrum, magnitude 1 in
        // both bins, scale 10 -> ten blocks per bar.
        let samples = vec![1.0f32, 0.0, 0.0, 0.0, 0.0];
        let (count, renderer) = run_captured(&samples, 4);
        assert_eq!(count, 1);
        assert_eq!(renderer.frames[0], "██████████ ██████████ ");
    }

    #[test]
    fn output_is_deterministic_and_pacing_independent() {
        let samples = noise(300);

        let (_, first) = run_captured(&samples, 16);

        let mut vis = Visualizer::new(&settings(16)).unwrap();
        let mut second = CaptureRenderer::new();
        let mut pacer = SleepPacer(Duration::from_millis(1));
        vis.run(&samples, &mut second, &mut pacer).unwrap();

        assert_eq!(first.frames, second.frames);
    }

    #[test]
    fn stop_ends_run_at_frame_boundary() {
        let samples = noise(100);
        let mut vis = Visualizer::new(&settings(8)).unwrap();
        let mut renderer = CaptureRenderer::new();
        let count = vis.run(&samples, &mut renderer, &mut StopAfter(1)).unwrap();
        assert_eq!(count, 1);
        assert_eq!(renderer.frames.len(), 1);
    }

    #[test]
    fn consecutive_writes_are_separated_by_the_delay() {
        let delay = Duration::from_millis(15);
        let samples = noise(13);
        let mut vis = Visualizer::new(&settings(4)).unwrap();
        let mut renderer = TimestampRenderer { writes: Vec::new() };
        let mut pacer = SleepPacer(delay);
        let count = vis.run(&samples, &mut renderer, &mut pacer).unwrap();
        assert_eq!(count, 3);
        for pair in renderer.writes.windows(2) {
            assert!(pair[1] - pair[0] >= delay);
        }
    }

    #[test]
    fn nan_samples_flow_through_without_panicking() {
        let mut samples = noise(20);
        samples[3] = f32::NAN;
        let (count, renderer) = run_captured(&samples, 4);
        assert_eq!(count, 4);
        // NaN magnitudes map to zero-length bars, never to a panic.
        assert!(renderer.frames[0].chars().all(|c| c == '█' || c == ' '));
    }

    #[test]
    fn rejects_non_power_of_two_engine_size() {
        assert!(Visualizer::new(&settings(100)).is_err());
    }
}
