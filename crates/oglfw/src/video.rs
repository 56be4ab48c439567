//! Video modes and gamma ramps

use crate::error::GammaError;
use crate::foundation::geometry::Size;

/// Snapshot of a display mode reported by a monitor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VideoMode {
    /// Width in screen coordinates
    pub width: i32,
    /// Height in screen coordinates
    pub height: i32,
    /// Bit depth of the red channel
    pub red_bits: i32,
    /// Bit depth of the green channel
    pub green_bits: i32,
    /// Bit depth of the blue channel
    pub blue_bits: i32,
    /// Refresh rate in Hz
    pub refresh_rate: i32,
}

impl VideoMode {
    /// Resolution of this mode
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Total color depth
    pub const fn color_depth(&self) -> i32 {
        self.red_bits + self.green_bits + self.blue_bits
    }
}

/// Per-channel lookup table applied monitor-wide
///
/// The three channels always have the same, non-zero length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GammaRamp {
    red: Vec<u16>,
    green: Vec<u16>,
    blue: Vec<u16>,
}

impl GammaRamp {
    /// Build a ramp from its three channels
    pub fn new(red: Vec<u16>, green: Vec<u16>, blue: Vec<u16>) -> Result<Self, GammaError> {
        if red.len() != green.len() || red.len() != blue.len() {
            return Err(GammaError::LengthMismatch {
                red: red.len(),
                green: green.len(),
                blue: blue.len(),
            });
        }
        if red.is_empty() {
            return Err(GammaError::Empty);
        }
        Ok(Self { red, green, blue })
    }

    /// Linear ramp of `size` entries, the identity mapping
    pub fn linear(size: usize) -> Result<Self, GammaError> {
        let channel: Vec<u16> = (0..size)
            .map(|i| {
                let step = i as f64 / (size.max(2) - 1) as f64;
                (step * f64::from(u16::MAX)).round() as u16
            })
            .collect();
        Self::new(channel.clone(), channel.clone(), channel)
    }

    /// Number of entries per channel
    pub fn len(&self) -> usize {
        self.red.len()
    }

    /// Always false, ramps are never empty
    pub fn is_empty(&self) -> bool {
        self.red.is_empty()
    }

    /// Red channel
    pub fn red(&self) -> &[u16] {
        &self.red
    }

    /// Green channel
    pub fn green(&self) -> &[u16] {
        &self.green
    }

    /// Blue channel
    pub fn blue(&self) -> &[u16] {
        &self.blue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mismatched_channels_rejected() {
        let result = GammaRamp::new(vec![0; 256], vec![0; 255], vec![0; 256]);
        assert_eq!(
            result,
            Err(GammaError::LengthMismatch { red: 256, green: 255, blue: 256 })
        );
    }

    #[test]
    fn test_empty_channels_rejected() {
        assert_eq!(GammaRamp::new(vec![], vec![], vec![]), Err(GammaError::Empty));
    }

    #[test]
    fn test_linear_ramp_endpoints() {
        let ramp = GammaRamp::linear(256).unwrap();
        assert_eq!(ramp.len(), 256);
        assert_eq!(ramp.red()[0], 0);
        assert_eq!(ramp.red()[255], u16::MAX);
        assert_eq!(ramp.red(), ramp.blue());
    }

    #[test]
    fn test_video_mode_helpers() {
        let mode = VideoMode {
            width: 1920,
            height: 1080,
            red_bits: 8,
            green_bits: 8,
            blue_bits: 8,
            refresh_rate: 60,
        };
        assert_eq!(mode.size(), Size::new(1920, 1080));
        assert_eq!(mode.color_depth(), 24);
    }
}
