// Spritesheet slicing into fixed-size frames

use glam::Vec2;

/// A rectangular region within a spritesheet
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetRegion {
    /// Position in the sheet (pixels, origin top-left)
    pub x: u32,
    pub y: u32,

    /// Size of the region (pixels)
    pub width: u32,
    pub height: u32,

    /// UV coordinates (0.0 to 1.0)
    pub uv_min: Vec2,
    pub uv_max: Vec2,
}

impl SheetRegion {
    /// Create a new region with calculated UV coordinates
    pub fn new(x: u32, y: u32, width: u32, height: u32, sheet_width: u32, sheet_height: u32) -> Self {
        let uv_min = Vec2::new(
            x as f32 / sheet_width as f32,
            y as f32 / sheet_height as f32,
        );
        let uv_max = Vec2::new(
            (x + width) as f32 / sheet_width as f32,
            (y + height) as f32 / sheet_height as f32,
        );

        Self {
            x,
            y,
            width,
            height,
            uv_min,
            uv_max,
        }
    }

    /// Native size of the region in pixels
    pub fn native_size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }
}

/// A sheet image known only by its pixel dimensions
///
/// Slicing is pure arithmetic, the GPU texture is owned by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteSheet {
    pub width: u32,
    pub height: u32,
}

impl SpriteSheet {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Cut a single region out of the sheet
    ///
    /// Returns None if the region does not fit inside the sheet.
    pub fn region(&self, x: u32, y: u32, width: u32, height: u32) -> Option<SheetRegion> {
        if width == 0 || height == 0 || x + width > self.width || y + height > self.height {
            return None;
        }
        Some(SheetRegion::new(x, y, width, height, self.width, self.height))
    }

    /// Cut `count` consecutive frames of one row, left to right
    ///
    /// Frames that would fall outside the sheet are dropped, so the result
    /// may be shorter than `count`.
    pub fn row(&self, y: u32, frame_width: u32, frame_height: u32, count: u32) -> Vec<SheetRegion> {
        (0..count)
            .filter_map(|i| self.region(i * frame_width, y, frame_width, frame_height))
            .collect()
    }

    /// Number of whole tiles per row for a square tile size
    pub fn columns(&self, tile_size: u32) -> u32 {
        if tile_size == 0 {
            return 0;
        }
        self.width / tile_size
    }

    /// Region of the tile with the given id, counting left to right, top to bottom
    pub fn tile(&self, id: u32, tile_size: u32) -> Option<SheetRegion> {
        let columns = self.columns(tile_size);
        if columns == 0 {
            return None;
        }
        let col = id % columns;
        let row = id / columns;
        self.region(col * tile_size, row * tile_size, tile_size, tile_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_uv() {
        let region = SheetRegion::new(0, 0, 64, 64, 256, 256);

        assert_eq!(region.uv_min, Vec2::new(0.0, 0.0));
        assert_eq!(region.uv_max, Vec2::new(0.25, 0.25));
        assert_eq!(region.native_size(), Vec2::new(64.0, 64.0));
    }

    #[test]
    fn test_region_out_of_bounds() {
        let sheet = SpriteSheet::new(128, 128);
        assert!(sheet.region(64, 64, 64, 64).is_some());
        assert!(sheet.region(65, 0, 64, 64).is_none());
        assert!(sheet.region(0, 0, 0, 64).is_none());
    }

    #[test]
    fn test_row_slicing() {
        let sheet = SpriteSheet::new(832, 1344);
        let frames = sheet.row(512, 64, 64, 9);

        assert_eq!(frames.len(), 9);
        assert_eq!(frames[0].x, 0);
        assert_eq!(frames[8].x, 512);
        assert!(frames.iter().all(|f| f.y == 512));
    }

    #[test]
    fn test_row_truncated_by_sheet_width() {
        let sheet = SpriteSheet::new(200, 64);
        let frames = sheet.row(0, 64, 64, 9);
        assert_eq!(frames.len(), 3);
    }

    #[test]
    fn test_tile_lookup() {
        let sheet = SpriteSheet::new(64, 64);
        assert_eq!(sheet.columns(16), 4);

        let tile = sheet.tile(5, 16).unwrap();
        assert_eq!((tile.x, tile.y), (16, 16));

        assert!(sheet.tile(16, 16).is_none());
        assert!(sheet.tile(0, 0).is_none());
    }
}
