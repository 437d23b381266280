/// A row-major pixel buffer, presented to the window as-is when `T = u32`.
#[derive(Clone, Debug, PartialEq)]
pub struct Film<T> {
    pub buffer: Vec<T>,
    pub width: usize,
    pub height: usize,
}

impl<T: Copy> Film<T> {
    pub fn new(width: usize, height: usize, fill: T) -> Self {
        Film {
            buffer: vec![fill; width * height],
            width,
            height,
        }
    }

    pub fn at(&self, x: usize, y: usize) -> T {
        self.buffer[y * self.width + x]
    }

    /// Writes a pixel, silently dropping anything outside the film.
    pub fn write_at(&mut self, x: isize, y: isize, value: T) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        self.buffer[y as usize * self.width + x as usize] = value;
    }

    pub fn fill(&mut self, value: T) {
        self.buffer.fill(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_writes_are_dropped() {
        let mut film = Film::new(4, 3, 0u32);
        film.write_at(-1, 0, 7);
        film.write_at(4, 0, 7);
        film.write_at(0, 3, 7);
        assert!(film.buffer.iter().all(|&p| p == 0));
        film.write_at(3, 2, 7);
        assert_eq!(film.at(3, 2), 7);
        assert_eq!(film.buffer[11], 7);
    }
}
