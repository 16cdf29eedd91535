//! In-place radix-2 FFT over interleaved complex buffers.

use std::f32::consts::PI;

use crate::error::{Result, VisError};

/// Forward FFT engine for a fixed power-of-two size.
///
/// The bit-reversal permutation and the twiddle factors `e^{-2πik/N}` are
/// precomputed once at construction and reused for every frame. Buffers are
/// interleaved: for `N` complex values, index `2k` is the real part and
/// `2k + 1` the imaginary part.
pub struct FftEngine {
    size: usize,
    /// Bit-reversed source index for each output slot.
    rev: Vec<u32>,
    /// Interleaved `e^{-2πik/N}` for `k in 0..N/2`.
    twiddles: Vec<f32>,
}

impl FftEngine {
    /// Build an engine for `size` points. The size check happens here, once;
    /// `transform` never re-validates it.
    pub fn new(size: usize) -> Result<Self> {
        if !size.is_power_of_two() {
            return Err(VisError::InvalidSize(size));
        }

        let bits = size.trailing_zeros();
        let mut rev = vec![0u32; size];
        for i in 1..size {
            rev[i] = (rev[i >> 1] >> 1) | (((i as u32) & 1) << (bits - 1));
        }

        let mut twiddles = Vec::with_capacity(size);
        for k in 0..size / 2 {
            let angle = -2.0 * PI * k as f32 / size as f32;
            twiddles.push(angle.cos());
            twiddles.push(angle.sin());
        }

        Ok(Self {
            size,
            rev,
            twiddles,
        })
    }

    /// Transform size `N`.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of usable spectrum bins (`N/2`, DC up to but excluding Nyquist).
    pub fn bins(&self) -> usize {
        self.size / 2
    }

    /// Allocate a zeroed interleaved buffer of the right length (`2N`).
    pub fn complex_buffer(&self) -> Vec<f32> {
        vec![0.0; 2 * self.size]
    }

    /// Forward transform of `input` into `output`, both interleaved buffers
    /// of length `2N`. The result is unnormalized (no `1/N` scaling).
    ///
    /// Decimation in time: the input is scattered into `output` in
    /// bit-reversed order, then `log2(N)` butterfly stages of doubling span
    /// combine pairs in place, reading the twiddle table at stride `N/span`.
    pub fn transform(&self, output: &mut [f32], input: &[f32]) {
        let n = self.size;
        assert_eq!(input.len(), 2 * n, "input buffer must hold 2N values");
        assert_eq!(output.len(), 2 * n, "output buffer must hold 2N values");

        for (i, &r) in self.rev.iter().enumerate() {
            let j = r as usize;
            output[2 * i] = input[2 * j];
            output[2 * i + 1] = input[2 * j + 1];
        }

        let mut span = 2;
        while span <= n {
            let half = span / 2;
            let stride = n / span;
            let mut base = 0;
            while base < n {
                for j in 0..half {
                    let t = 2 * (j * stride);
                    let w_re = self.twiddles[t];
                    let w_im = self.twiddles[t + 1];

                    let a = 2 * (base + j);
                    let b = 2 * (base + j + half);

                    let v_re = output[b] * w_re - output[b + 1] * w_im;
                    let v_im = output[b] * w_im + output[b + 1] * w_re;
                    let u_re = output[a];
                    let u_im = output[a + 1];

                    output[a] = u_re + v_re;
                    output[a + 1] = u_im + v_im;
                    output[b] = u_re - v_re;
                    output[b + 1] = u_im - v_im;
                }
                base += span;
            }
            span <<= 1;
        }
    }
}
