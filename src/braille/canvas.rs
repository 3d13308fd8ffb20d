/// Braille Unicode canvas for high-resolution terminal graphics.
/// Each character cell represents a 2x4 pixel grid (8 dots).
/// Unicode Braille patterns: U+2800 to U+28FF
///
/// Every pixel carries an intensity level (1..=4) so the renderer can
/// map dots to terminal colors; a cell displays the max level of its
/// lit dots.
pub struct BrailleCanvas {
    width: usize,  // Characters
    height: usize, // Characters
    levels: Vec<u8>, // Intensity per pixel, 0 = unlit
}

impl BrailleCanvas {
    /// Create a new canvas with the given character dimensions.
    /// Effective pixel resolution: width*2 x height*4
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            levels: vec![0u8; width * 2 * height * 4],
        }
    }

    /// Canvas width in characters
    pub fn width(&self) -> usize {
        self.width
    }

    /// Canvas height in characters
    pub fn height(&self) -> usize {
        self.height
    }

    /// Pixel resolution width (2 per character)
    pub fn pixel_width(&self) -> usize {
        self.width * 2
    }

    /// Pixel resolution height (4 per character)
    pub fn pixel_height(&self) -> usize {
        self.height * 4
    }

    /// Unlight every pixel
    pub fn clear(&mut self) {
        self.levels.fill(0);
    }

    /// Set a pixel at the given coordinates. A higher level wins when
    /// two draws touch the same pixel.
    pub fn set_pixel(&mut self, x: usize, y: usize, level: u8) {
        if x >= self.pixel_width() || y >= self.pixel_height() {
            return;
        }
        let idx = y * self.pixel_width() + x;
        self.levels[idx] = self.levels[idx].max(level);
    }

    /// Set a pixel using signed coordinates (ignores negative values)
    pub fn set_pixel_signed(&mut self, x: i32, y: i32, level: u8) {
        if x >= 0 && y >= 0 {
            self.set_pixel(x as usize, y as usize, level);
        }
    }

    /// Compose one character cell: the braille glyph for its lit dots
    /// plus the max intensity among them (0 if the cell is empty).
    ///
    /// Braille dot layout per character:
    /// ```text
    /// (0,0) (1,0)   bits: 0x01 0x08
    /// (0,1) (1,1)   bits: 0x02 0x10
    /// (0,2) (1,2)   bits: 0x04 0x20
    /// (0,3) (1,3)   bits: 0x40 0x80
    /// ```
    pub fn cell(&self, cx: usize, cy: usize) -> (char, u8) {
        if cx >= self.width || cy >= self.height {
            return ('\u{2800}', 0);
        }

        const DOT_BITS: [[u8; 4]; 2] = [[0x01, 0x02, 0x04, 0x40], [0x08, 0x10, 0x20, 0x80]];

        let mut bits: u8 = 0;
        let mut level: u8 = 0;
        for dx in 0..2 {
            for dy in 0..4 {
                let idx = (cy * 4 + dy) * self.pixel_width() + cx * 2 + dx;
                let l = self.levels[idx];
                if l > 0 {
                    bits |= DOT_BITS[dx][dy];
                    level = level.max(l);
                }
            }
        }

        (char::from_u32(0x2800 + bits as u32).unwrap_or(' '), level)
    }

    /// Convert the canvas to a string of Braille characters
    #[cfg(test)]
    pub fn to_string(&self) -> String {
        (0..self.height)
            .map(|cy| {
                (0..self.width)
                    .map(|cx| self.cell(cx, cy).0)
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_pixel() {
        let mut canvas = BrailleCanvas::new(1, 1);
        canvas.set_pixel(0, 0, 1);
        assert_eq!(canvas.to_string(), "⠁"); // U+2801
    }

    #[test]
    fn test_all_dots() {
        let mut canvas = BrailleCanvas::new(1, 1);
        // Set all 8 dots
        for x in 0..2 {
            for y in 0..4 {
                canvas.set_pixel(x, y, 2);
            }
        }
        assert_eq!(canvas.to_string(), "⣿"); // U+28FF (all dots)
    }

    #[test]
    fn test_diagonal() {
        let mut canvas = BrailleCanvas::new(2, 1);
        canvas.set_pixel(0, 0, 1);
        canvas.set_pixel(1, 1, 1);
        canvas.set_pixel(2, 2, 1);
        canvas.set_pixel(3, 3, 1);
        // First char: (0,0) and (1,1) = 0x01 | 0x10 = 0x11
        // Second char: (0,2) and (1,3) = 0x04 | 0x80 = 0x84
        assert_eq!(canvas.to_string(), "⠑⢄");
    }

    #[test]
    fn test_cell_keeps_max_level() {
        let mut canvas = BrailleCanvas::new(1, 1);
        canvas.set_pixel(0, 0, 1);
        canvas.set_pixel(1, 2, 4);
        canvas.set_pixel(1, 2, 2); // lower level must not overwrite
        let (_, level) = canvas.cell(0, 0);
        assert_eq!(level, 4);
    }

    #[test]
    fn test_clear() {
        let mut canvas = BrailleCanvas::new(2, 2);
        canvas.set_pixel(1, 1, 3);
        canvas.clear();
        assert_eq!(canvas.cell(0, 0), ('\u{2800}', 0));
    }
}
