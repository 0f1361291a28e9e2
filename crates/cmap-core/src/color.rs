//! Color value types and color-space conversions.
//!
//! All channel values are normalized floats in [0, 1]. Format-specific raw
//! ranges (0-255 RGB, 0-360 hue) are converted at parse time and never
//! stored.

/// An RGBA color with normalized [0, 1] channels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel (1.0 = opaque).
    pub a: f32,
}

impl Rgba {
    /// Creates a color from all four channels.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a fully opaque color.
    pub const fn opaque(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Opaque black.
    pub const BLACK: Self = Self::opaque(0.0, 0.0, 0.0);

    /// Returns the RGB channels as an array, dropping alpha.
    pub const fn rgb(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// Quantizes the RGB channels to 0-255 integers.
    pub fn to_rgb8(&self) -> [u8; 3] {
        [quantize(self.r), quantize(self.g), quantize(self.b)]
    }

    /// Computes the luminance of this color under the given weight profile.
    pub fn luminance(&self, profile: Luminance) -> f32 {
        let [wr, wg, wb] = profile.weights();
        match profile {
            Luminance::Rec709 | Luminance::Rec601 => {
                wr * self.r + wg * self.g + wb * self.b
            }
            Luminance::Rec601Perceptual => {
                (wr * self.r * self.r + wg * self.g * self.g + wb * self.b * self.b).sqrt()
            }
        }
    }
}

fn quantize(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Luminance weighting profile for greyscale conversion.
///
/// The three profiles match the common broadcast weightings: linear
/// Rec. 709, linear Rec. 601, and Rec. 601 applied to squared channel
/// values then square-rooted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Luminance {
    /// Rec. 709 weights (0.2126, 0.7152, 0.0722), linear.
    #[default]
    Rec709,
    /// Rec. 601 weights (0.299, 0.587, 0.114), linear.
    Rec601,
    /// Rec. 601 weights applied to squared channels, square-rooted.
    Rec601Perceptual,
}

impl Luminance {
    /// Returns the RGB channel weights for this profile.
    pub const fn weights(self) -> [f32; 3] {
        match self {
            Luminance::Rec709 => [0.2126, 0.7152, 0.0722],
            Luminance::Rec601 | Luminance::Rec601Perceptual => [0.299, 0.587, 0.114],
        }
    }
}

/// Converts HSV to RGB.
///
/// `h` is in degrees (any value, wrapped into [0, 360)), `s` and `v` in
/// [0, 1]. Returns normalized RGB.
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> [f32; 3] {
    let h = h.rem_euclid(360.0);
    let c = v * s;
    let h_prime = h / 60.0;
    let x = c * (1.0 - ((h_prime % 2.0) - 1.0).abs());

    let (r1, g1, b1) = if h_prime < 1.0 {
        (c, x, 0.0)
    } else if h_prime < 2.0 {
        (x, c, 0.0)
    } else if h_prime < 3.0 {
        (0.0, c, x)
    } else if h_prime < 4.0 {
        (0.0, x, c)
    } else if h_prime < 5.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    let m = v - c;
    [r1 + m, g1 + m, b1 + m]
}

/// Linear interpolation between two scalars.
#[inline]
pub(crate) fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
