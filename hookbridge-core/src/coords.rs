//! Screen pixel -> `SendInput` absolute coordinate mapping.

/// Upper bound of the normalised absolute coordinate space.
pub const ABSOLUTE_MAX: i64 = 65_535;

/// Fallback used when the OS reports a non-positive screen size.
pub const FALLBACK_SCREEN: ScreenSize = ScreenSize {
    width: 1920,
    height: 1080,
};

/// Primary screen dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenSize {
    pub width: i32,
    pub height: i32,
}

impl ScreenSize {
    /// Replace a zero or negative size (a failed metrics query) with
    /// [`FALLBACK_SCREEN`].
    pub fn or_fallback(self) -> Self {
        if self.width > 0 && self.height > 0 {
            self
        } else {
            FALLBACK_SCREEN
        }
    }
}

/// Map pixel `(x, y)` into the 0..65535 space.
///
/// `floor(x * 65535 / width)`, computed in `i64`.  Off-screen pixels map
/// outside the range; the OS clamps them.  Results beyond `i32` saturate.
pub fn to_absolute(x: i32, y: i32, screen: ScreenSize) -> (i32, i32) {
    let screen = screen.or_fallback();
    let abs_x = (x as i64 * ABSOLUTE_MAX).div_euclid(screen.width as i64);
    let abs_y = (y as i64 * ABSOLUTE_MAX).div_euclid(screen.height as i64);
    (saturate(abs_x), saturate(abs_y))
}

fn saturate(v: i64) -> i32 {
    v.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    const FHD: ScreenSize = ScreenSize {
        width: 1920,
        height: 1080,
    };

    #[test]
    fn test_origin_and_centre() {
        assert_eq!(to_absolute(0, 0, FHD), (0, 0));
        assert_eq!(to_absolute(960, 540, FHD), (32767, 32767));
    }

    #[test]
    fn test_far_edge_reaches_max() {
        assert_eq!(to_absolute(1920, 1080, FHD), (65535, 65535));
        assert_eq!(to_absolute(1919, 1079, FHD), (65500, 65474));
    }

    #[test]
    fn test_no_clamping() {
        let (x, y) = to_absolute(3840, -10, FHD);
        assert_eq!(x, 131070);
        assert_eq!(y, -607);
    }

    #[test]
    fn test_out_of_i32_range_saturates() {
        assert_eq!(to_absolute(i32::MAX, 0, FHD), (i32::MAX, 0));
        assert_eq!(to_absolute(0, i32::MIN, FHD), (0, i32::MIN));
    }

    #[test]
    fn test_fallback_screen() {
        let bogus = ScreenSize { width: 0, height: 0 };
        assert_eq!(to_absolute(960, 540, bogus), to_absolute(960, 540, FHD));
    }
}
