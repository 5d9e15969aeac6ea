use ndarray::Array2;

use super::source::VideoError;

/// Owned single-channel (grayscale) frame.
///
/// Pixels are stored row-major as `(height, width)`, matching the layout a
/// decoder hands out for 8-bit luma planes.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pixels: Array2<u8>,
}

impl Frame {
    /// Wrap an existing pixel array.
    #[inline]
    pub fn new(pixels: Array2<u8>) -> Self {
        Self { pixels }
    }

    /// Build a frame from a raw luma buffer laid out row-major.
    ///
    /// Fails when the buffer length does not match `width * height`.
    pub fn from_luma(width: usize, height: usize, data: Vec<u8>) -> Result<Self, VideoError> {
        let expected = width * height;
        let got = data.len();
        if got != expected {
            return Err(VideoError::FrameShape { expected, got });
        }
        let pixels = Array2::from_shape_vec((height, width), data)
            .map_err(|_| VideoError::FrameShape { expected, got })?;
        Ok(Self { pixels })
    }

    /// Build a frame filled with a single intensity value.
    pub fn filled(width: usize, height: usize, value: u8) -> Self {
        Self {
            pixels: Array2::from_elem((height, width), value),
        }
    }

    /// Frame width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.pixels.ncols()
    }

    /// Frame height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.pixels.nrows()
    }

    /// Borrow the underlying pixel array, indexed `[row, column]`.
    #[inline]
    pub fn pixels(&self) -> &Array2<u8> {
        &self.pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_luma_shape() {
        let frame = Frame::from_luma(3, 2, vec![0, 1, 2, 3, 4, 5]).unwrap();
        assert_eq!(frame.width(), 3);
        assert_eq!(frame.height(), 2);
        // Row-major: second row starts at value 3.
        assert_eq!(frame.pixels()[[1, 0]], 3);
    }

    #[test]
    fn test_from_luma_bad_length() {
        let err = Frame::from_luma(3, 2, vec![0; 5]).unwrap_err();
        assert!(matches!(
            err,
            VideoError::FrameShape {
                expected: 6,
                got: 5
            }
        ));
    }

    #[test]
    fn test_filled() {
        let frame = Frame::filled(4, 4, 200);
        assert!(frame.pixels().iter().all(|&p| p == 200));
    }
}
