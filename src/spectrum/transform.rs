use std::sync::Arc;

use num_complex::Complex;
use rustfft::{Fft, FftPlanner};

use crate::config::SpectrumScale;

/// Real-to-spectrum transform of a fixed frame size
///
/// Construction prepares whatever state the transform needs and dropping it
/// releases that state, so an instance can be created once and reused for
/// many frames.
pub trait SpectrumTransform {
    /// Number of input samples and output bins per frame
    fn size(&self) -> usize;

    /// Transform one frame of `size()` real samples into `size()` bins
    fn transform(&mut self, input: &[f32], output: &mut [f32]);
}

/// Forward FFT producing per-bin power or magnitude
pub struct FftTransform {
    fft: Arc<dyn Fft<f32>>,
    frame: Vec<Complex<f32>>,
    scratch: Vec<Complex<f32>>,
    scale: SpectrumScale,
}

impl FftTransform {
    /// Plan a forward transform of `size` points
    pub fn new(size: usize, scale: SpectrumScale) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(size);
        let scratch = vec![Complex::new(0.0, 0.0); fft.get_inplace_scratch_len()];

        log::trace!("Planned {}-point FFT ({:?})", size, scale);

        Self {
            fft,
            frame: vec![Complex::new(0.0, 0.0); size],
            scratch,
            scale,
        }
    }

    pub fn scale(&self) -> SpectrumScale {
        self.scale
    }
}

impl SpectrumTransform for FftTransform {
    fn size(&self) -> usize {
        self.frame.len()
    }

    fn transform(&mut self, input: &[f32], output: &mut [f32]) {
        debug_assert_eq!(input.len(), self.frame.len());
        debug_assert_eq!(output.len(), self.frame.len());

        for (slot, &sample) in self.frame.iter_mut().zip(input) {
            *slot = Complex::new(sample, 0.0);
        }

        self.fft
            .process_with_scratch(&mut self.frame, &mut self.scratch);

        for (out, bin) in output.iter_mut().zip(&self.frame) {
            *out = match self.scale {
                SpectrumScale::Power => bin.norm_sqr(),
                SpectrumScale::Magnitude => bin.norm(),
            };
        }
    }
}
