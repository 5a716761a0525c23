//! Dense 2D grid storage for color, depth, mask and texture data.
//!
//! A [`Buffer`] is a row-major `width x height` array of `Copy` cells with a
//! default fill value. Render targets use it with row 0 at the bottom of the
//! image; textures loaded from image files keep the file's top-left origin,
//! which [`Buffer::sample`] accounts for by flipping V.

use crate::colors::Color;
use crate::error::BufferError;

#[derive(Clone, Debug, PartialEq)]
pub struct Buffer<T> {
    data: Vec<T>,
    width: usize,
    height: usize,
    default: T,
}

impl<T: Copy> Buffer<T> {
    /// Create a buffer with every cell set to `default`.
    pub fn new(width: usize, height: usize, default: T) -> Self {
        Self {
            data: vec![default; width * height],
            width,
            height,
            default,
        }
    }

    /// A 1x1 buffer, handy as a constant texture.
    pub fn single(value: T) -> Self {
        Self::new(1, 1, value)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn default_value(&self) -> T {
        self.default
    }

    /// Row-major view of the cells.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        assert!(
            x < self.width && y < self.height,
            "buffer coordinate ({x}, {y}) outside {}x{}",
            self.width,
            self.height
        );
        y * self.width + x
    }

    /// # Panics
    /// Panics if `(x, y)` lies outside the buffer.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> T {
        self.data[self.index(x, y)]
    }

    /// # Panics
    /// Panics if `(x, y)` lies outside the buffer.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: T) {
        let idx = self.index(x, y);
        self.data[idx] = value;
    }

    /// Read a cell, or `None` when the coordinate is off the buffer.
    #[inline]
    pub fn try_get(&self, x: i32, y: i32) -> Option<T> {
        if self.contains(x, y) {
            Some(self.data[y as usize * self.width + x as usize])
        } else {
            None
        }
    }

    /// Write a cell, silently ignoring coordinates off the buffer.
    ///
    /// Returns whether the write happened.
    #[inline]
    pub fn try_set(&mut self, x: i32, y: i32, value: T) -> bool {
        if self.contains(x, y) {
            self.data[y as usize * self.width + x as usize] = value;
            true
        } else {
            false
        }
    }

    /// Nearest-texel lookup by normalized texture coordinates.
    ///
    /// `u` and `v` are clamped to `[0, 1]`. `v = 0` addresses the last row,
    /// `v = 1` the first, matching images stored top row first. An empty
    /// buffer samples as its default value.
    pub fn sample(&self, u: f32, v: f32) -> T {
        if self.data.is_empty() {
            return self.default;
        }
        let u = if u.is_nan() { 0.0 } else { u.clamp(0.0, 1.0) };
        let v = if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) };

        let max_x = self.width as i64 - 1;
        let max_y = self.height as i64 - 1;
        let x = ((u * self.width as f32).floor() as i64).clamp(0, max_x);
        let y = (max_y - (v * self.height as f32).floor() as i64).clamp(0, max_y);

        self.data[y as usize * self.width + x as usize]
    }

    /// Reset every cell to the default value.
    pub fn clear(&mut self) {
        self.data.fill(self.default);
    }

    /// Reset every cell to `value`.
    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }

    /// Snapshot copy of the cells in row-major order.
    pub fn data(&self) -> Vec<T> {
        self.data.clone()
    }

    /// Copy `data` into the buffer starting at cell 0.
    ///
    /// Shorter slices leave the remaining cells untouched.
    pub fn set_data(&mut self, data: &[T]) -> Result<(), BufferError> {
        if data.len() > self.data.len() {
            return Err(BufferError::DataTooLarge {
                len: data.len(),
                width: self.width,
                height: self.height,
            });
        }
        self.data[..data.len()].copy_from_slice(data);
        Ok(())
    }

    /// New buffer of the same size with `f` applied to every cell.
    pub fn map<U: Copy>(&self, f: impl Fn(T) -> U) -> Buffer<U> {
        Buffer {
            data: self.data.iter().map(|&v| f(v)).collect(),
            width: self.width,
            height: self.height,
            default: f(self.default),
        }
    }

    /// Iterate rows, bottom row first.
    pub fn rows(&self) -> impl DoubleEndedIterator<Item = &[T]> {
        // chunks(0) panics
        self.data.chunks(self.width.max(1))
    }
}

impl Buffer<Color> {
    /// Pack into ARGB8888 bytes in native endianness, as SDL streaming
    /// textures expect. With `flip_rows`, the top image row comes first.
    pub fn to_argb_bytes(&self, flip_rows: bool) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.data.len() * 4);
        let mut push_row = |row: &[Color]| {
            for c in row {
                bytes.extend_from_slice(&c.to_argb().to_ne_bytes());
            }
        };
        if flip_rows {
            self.rows().rev().for_each(&mut push_row);
        } else {
            self.rows().for_each(&mut push_row);
        }
        bytes
    }
}

impl Buffer<f32> {
    /// Grayscale visualization of a depth buffer: near is white, far is black.
    pub fn depth_to_color(&self) -> Buffer<Color> {
        self.map(|d| Color::gray(1.0 - d.clamp(0.0, 1.0)))
    }
}

/// Per-channel absolute difference of two equally sized color buffers.
pub fn color_difference(a: &Buffer<Color>, b: &Buffer<Color>) -> Result<Buffer<Color>, BufferError> {
    if a.width != b.width || a.height != b.height {
        return Err(BufferError::SizeMismatch {
            width: a.width,
            height: a.height,
            other_width: b.width,
            other_height: b.height,
        });
    }
    Ok(Buffer {
        data: a
            .data
            .iter()
            .zip(&b.data)
            .map(|(x, y)| x.abs_diff(*y))
            .collect(),
        width: a.width,
        height: a.height,
        default: a.default.abs_diff(b.default),
    })
}
