use image::{ImageBuffer, Luma};

/// Depth values in millimeters
pub type DepthImage = ImageBuffer<Luma<u16>, Vec<u16>>;
/// One where a player was segmented, zero otherwise
pub type MaskImage = ImageBuffer<Luma<u8>, Vec<u8>>;
/// Player index (1 - 7) of every pixel, zero for the background
pub type PlayerImage = ImageBuffer<Luma<u8>, Vec<u8>>;

pub trait MaskOps {
    fn set_in_mask(&mut self, x: u32, y: u32, val: bool);
    fn is_in_mask(&self, x: u32, y: u32) -> bool;
    /// Number of pixels within the mask
    fn mask_size(&self) -> usize;
}

impl MaskOps for MaskImage {
    fn set_in_mask(&mut self, x: u32, y: u32, val: bool) {
        self[(x, y)] = if val { Luma([1u8]) } else { Luma([0u8]) }
    }
    fn is_in_mask(&self, x: u32, y: u32) -> bool {
        self[(x, y)].0[0] != 0
    }
    fn mask_size(&self) -> usize {
        self.pixels().filter(|p| p.0[0] != 0).count()
    }
}
