pub mod bars;
pub mod fft;
pub mod frames;
pub mod spectrum;
