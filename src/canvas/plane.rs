use crate::foundation::core::Direction;

/// One row-major `u8` intensity plane with explicit dimensions.
///
/// Every access is bounds-checked through [`Plane::index`]; the buffer is owned and
/// released with the plane.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Plane {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Plane {
    pub(crate) fn filled(width: u32, height: u32, value: u8) -> Self {
        Self {
            width,
            height,
            data: vec![value; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn get(&self, x: u32, y: u32) -> Option<u8> {
        self.index(x, y).map(|i| self.data[i])
    }

    pub(crate) fn set(&mut self, x: u32, y: u32, value: u8) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.data[i] = value;
                true
            }
            None => false,
        }
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Circular shift by `distance`, reduced modulo the axis length first.
    ///
    /// `Right`: `new[x] = old[(x - d) mod W]`. `Down`: `new[y] = old[(y - d) mod H]`.
    pub(crate) fn shift(&mut self, direction: Direction, distance: u32) {
        let axis = if direction.is_horizontal() {
            self.width
        } else {
            self.height
        };
        if axis == 0 {
            return;
        }
        let d = (distance % axis) as usize;
        if d == 0 {
            return;
        }

        let row_len = self.width as usize;
        match direction {
            Direction::Right => self
                .data
                .chunks_exact_mut(row_len)
                .for_each(|row| row.rotate_right(d)),
            Direction::Left => self
                .data
                .chunks_exact_mut(row_len)
                .for_each(|row| row.rotate_left(d)),
            // Whole rows move together, so the flat buffer rotates by whole-row strides.
            Direction::Down => self.data.rotate_right(d * row_len),
            Direction::Up => self.data.rotate_left(d * row_len),
        }
    }

    /// Quarter turn counter-clockwise: `new[i][j] = old[j][n - 1 - i]`.
    ///
    /// Caller guarantees `width == height`.
    pub(crate) fn rotate90_ccw(&mut self) {
        debug_assert_eq!(self.width, self.height);
        let n = self.width as usize;
        let mut out = vec![0u8; self.data.len()];
        for i in 0..n {
            for j in 0..n {
                out[i * n + j] = self.data[j * n + (n - 1 - i)];
            }
        }
        self.data = out;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/canvas/plane.rs"]
mod tests;
