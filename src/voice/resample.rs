use crate::{BuddyError, Result};
use rubato::{
    Resampler, SincFixedIn, SincInterpolationParameters, SincInterpolationType, WindowFunction,
};
use tracing::debug;

const CHUNK_FRAMES: usize = 1024;

/// Resample mono audio in one go
pub fn resample_mono(input: &[f32], input_rate: u32, output_rate: u32) -> Result<Vec<f32>> {
    if input_rate == 0 || output_rate == 0 {
        return Err(BuddyError::ConfigError(
            "Sample rates must be greater than 0".into(),
        ));
    }
    if input.is_empty() || input_rate == output_rate {
        return Ok(input.to_vec());
    }

    let ratio = output_rate as f64 / input_rate as f64;
    let params = SincInterpolationParameters {
        sinc_len: 256,
        f_cutoff: 0.95,
        interpolation: SincInterpolationType::Linear,
        oversampling_factor: 256,
        window: WindowFunction::BlackmanHarris2,
    };

    let mut resampler = SincFixedIn::<f32>::new(ratio, 2.0, params, CHUNK_FRAMES, 1)
        .map_err(|e| BuddyError::RecognitionError(format!("Failed to create resampler: {}", e)))?;

    let mut output = Vec::with_capacity((input.len() as f64 * ratio * 1.1) as usize);

    for chunk in input.chunks(CHUNK_FRAMES) {
        // SincFixedIn wants exactly CHUNK_FRAMES frames per call
        let mut planar = vec![vec![0.0f32; CHUNK_FRAMES]];
        planar[0][..chunk.len()].copy_from_slice(chunk);

        let resampled = resampler
            .process(&planar, None)
            .map_err(|e| BuddyError::RecognitionError(format!("Resampling failed: {}", e)))?;

        let take = if chunk.len() < CHUNK_FRAMES {
            ((chunk.len() as f64) * ratio).ceil() as usize
        } else {
            resampled[0].len()
        };
        output.extend_from_slice(&resampled[0][..take.min(resampled[0].len())]);
    }

    debug!(
        "Resampled {} samples at {} Hz to {} samples at {} Hz",
        input.len(),
        input_rate,
        output.len(),
        output_rate
    );

    Ok(output)
}
