//! Audio frame type.

/// A stereo audio frame (16-bit integer).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Frame {
    pub left: i16,
    pub right: i16,
}

impl Frame {
    /// Create a silent frame.
    pub const fn silence() -> Self {
        Self { left: 0, right: 0 }
    }

    /// Quantize a float stereo pair in `[-1, 1]`, clipping outside it.
    pub fn from_f32(left: f32, right: f32) -> Self {
        Self {
            left: quantize(left),
            right: quantize(right),
        }
    }

    pub fn is_silent(&self) -> bool {
        self.left == 0 && self.right == 0
    }

    /// Larger absolute channel value.
    pub fn peak(&self) -> i16 {
        self.left.saturating_abs().max(self.right.saturating_abs())
    }
}

fn quantize(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * 32767.0) as i16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_f32_clips() {
        let f = Frame::from_f32(2.0, -2.0);
        assert_eq!(f.left, 32767);
        assert_eq!(f.right, -32767);
    }

    #[test]
    fn zero_is_silent() {
        assert!(Frame::from_f32(0.0, 0.0).is_silent());
        assert!(!Frame::from_f32(0.5, 0.0).is_silent());
    }

    #[test]
    fn peak_takes_larger_channel() {
        let f = Frame { left: -300, right: 200 };
        assert_eq!(f.peak(), 300);
    }
}
