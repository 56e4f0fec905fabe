use crate::animation::values::Interpolate;
use crate::errors::{MarrowError, Result};

/// One keyframe channel: parallel timestamp/value arrays, sampled by time.
///
/// Timestamps are validated at construction (non-empty, strictly increasing,
/// one value per timestamp), so sampling is total. Callers are expected to
/// keep sample times inside the keyframe range (the looping player does this
/// with its modulo wrap); out-of-range times clamp to the boundary keys.
#[derive(Debug, Clone)]
pub struct Keyframes<T: Interpolate> {
    times: Vec<f32>,
    values: Vec<T>,
}

impl<T: Interpolate> Keyframes<T> {
    /// Builds a channel from `(timestamp, value)` data.
    ///
    /// `channel` only labels errors, e.g. `"hip.position"`.
    pub fn new(channel: &str, times: Vec<f32>, values: Vec<T>) -> Result<Self> {
        if times.is_empty() {
            return Err(MarrowError::EmptyTrack {
                channel: channel.to_string(),
            });
        }
        if times.len() != values.len() {
            return Err(MarrowError::KeyframeCountMismatch {
                channel: channel.to_string(),
                times: times.len(),
                values: values.len(),
            });
        }
        for i in 1..times.len() {
            if times[i] <= times[i - 1] {
                return Err(MarrowError::NonMonotonicKeyframes {
                    channel: channel.to_string(),
                    index: i,
                    prev: times[i - 1],
                    next: times[i],
                });
            }
        }
        Ok(Self { times, values })
    }

    /// A single-key channel, constant for every sample time.
    #[must_use]
    pub fn constant(value: T) -> Self {
        Self {
            times: vec![0.0],
            values: vec![value],
        }
    }

    /// Number of keys in the channel (always at least one).
    #[inline]
    #[must_use]
    pub fn key_count(&self) -> usize {
        self.times.len()
    }

    /// The channel value at `time`.
    #[must_use]
    pub fn sample(&self, time: f32) -> T {
        let len = self.times.len();
        if len == 1 {
            return self.values[0];
        }

        // partition_point returns the first index whose timestamp exceeds
        // `time`, i.e. the upper key of the bracketing pair.
        let next = self.times.partition_point(|&t| t <= time);
        if next == 0 {
            return self.values[0];
        }
        if next >= len {
            return self.values[len - 1];
        }

        let i = next - 1;
        let t0 = self.times[i];
        let t1 = self.times[next];
        let t = (time - t0) / (t1 - t0);
        T::interpolate_linear(self.values[i], self.values[next], t)
    }
}
