//! Conversion of the raw frames of the sensor into images.
//!
//! Color frames are 32 bit BGRX. Depth frames pack the player index into
//! the lower `PLAYER_INDEX_BITMASK_WIDTH` bits and the depth in millimeters
//! into the upper bits of every pixel.

use std::io::Read;

use byteorder::{LittleEndian, ReadBytesExt};
use image::{GrayImage, ImageBuffer, Pixel, RgbaImage};
#[cfg(feature = "parallel_convert")]
use rayon::prelude::*;

use crate::errors::*;
use crate::types::{DepthImage, MaskImage, PlayerImage};

/// Bits of a depth pixel holding the player index
pub const PLAYER_INDEX_BITMASK: u16 = 0x7;
/// Shift to get the depth of a depth pixel
pub const PLAYER_INDEX_BITMASK_WIDTH: u16 = 3;

/// Applies `f` on every pair of source and destination rows.
/// Runs on the rayon thread pool with the `parallel_convert` feature.
fn map_rows<S, D, F>(src: &[S], src_row: usize, dst: &mut [D], dst_row: usize, f: F)
    where S: Sync,
          D: Send,
          F: Fn(&[S], &mut [D]) + Sync
{
    if src_row == 0 || dst_row == 0 {
        return;
    }
    #[cfg(feature = "parallel_convert")]
    {
        dst.par_chunks_mut(dst_row)
            .zip(src.par_chunks(src_row))
            .for_each(|(d, s)| f(s, d));
    }
    #[cfg(not(feature = "parallel_convert"))]
    {
        for (d, s) in dst.chunks_mut(dst_row).zip(src.chunks(src_row)) {
            f(s, d);
        }
    }
}

/// Wraps the converted pixels of a frame into an image
fn to_image_buffer<P: Pixel>(width: u32,
                             height: u32,
                             data: Vec<P::Subpixel>)
                             -> Result<ImageBuffer<P, Vec<P::Subpixel>>> {
    let expected = width as usize * height as usize * P::CHANNEL_COUNT as usize;
    let actual = data.len();
    ImageBuffer::from_raw(width, height, data)
        .ok_or_else(|| ErrorKind::FrameSize(expected, actual).into())
}

fn check_size(expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(ErrorKind::FrameSize(expected, actual).into());
    }
    Ok(())
}

/// Color of a player within `DepthFrame::player_image` (RGB).
/// Black for the background (player zero).
pub fn player_color(player: u8) -> [u8; 3] {
    if player == 0 {
        return [0, 0, 0];
    }
    let base = (player as u32).pow(3);
    let channel = |offset: u32| (base + offset).min(255) as u8;
    [channel(200), channel(180), channel(100)]
}

/// A frame of the color camera
#[derive(Debug, Clone, PartialEq)]
pub struct ColorFrame {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl ColorFrame {
    /// `data` has to hold four bytes (BGRX) per pixel
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<ColorFrame> {
        check_size(width as usize * height as usize * 4, data.len())?;
        Ok(ColorFrame {
            width: width,
            height: height,
            data: data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// The frame as opaque RGBA image
    pub fn to_image(&self) -> Result<RgbaImage> {
        let row = self.width as usize * 4;
        let mut out = vec![0u8; self.data.len()];
        map_rows(&self.data, row, &mut out, row, |src, dst| {
            for (s, d) in src.chunks(4).zip(dst.chunks_mut(4)) {
                d[0] = s[2];
                d[1] = s[1];
                d[2] = s[0];
                d[3] = 255;
            }
        });
        to_image_buffer(self.width, self.height, out)
    }
}

/// A frame of the depth camera with player segmentation
#[derive(Debug, Clone, PartialEq)]
pub struct DepthFrame {
    width: u32,
    height: u32,
    data: Vec<u16>,
}

impl DepthFrame {
    /// `data` holds one packed value per pixel, row by row
    pub fn new(width: u32, height: u32, data: Vec<u16>) -> Result<DepthFrame> {
        check_size(width as usize * height as usize, data.len())?;
        Ok(DepthFrame {
            width: width,
            height: height,
            data: data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u16] {
        &self.data
    }

    /// Player index (1 - 7) of the pixel at `idx`, zero if no player is there.
    /// Panics if `idx` is out of bounds.
    pub fn player_index(&self, idx: usize) -> u8 {
        (self.data[idx] & PLAYER_INDEX_BITMASK) as u8
    }

    /// Depth of the pixel at `idx` in millimeters, zero if unknown.
    /// Panics if `idx` is out of bounds.
    pub fn depth_mm(&self, idx: usize) -> u16 {
        self.data[idx] >> PLAYER_INDEX_BITMASK_WIDTH
    }

    fn map<P, F>(&self, channels: usize, f: F) -> Vec<P>
        where P: Copy + Default + Send,
              F: Fn(u16, &mut [P]) + Sync
    {
        let row = self.width as usize;
        let mut out = vec![P::default(); self.data.len() * channels];
        map_rows(&self.data, row, &mut out, row * channels, |src, dst| {
            for (&v, d) in src.iter().zip(dst.chunks_mut(channels)) {
                f(v, d);
            }
        });
        out
    }

    /// Every player gets its own color, the background is black
    pub fn player_image(&self) -> Result<RgbaImage> {
        let data = self.map::<u8, _>(4, |v, d| {
            let [r, g, b] = player_color((v & PLAYER_INDEX_BITMASK) as u8);
            d.copy_from_slice(&[r, g, b, 255]);
        });
        to_image_buffer(self.width, self.height, data)
    }

    /// The player index of every pixel
    pub fn player_index_image(&self) -> Result<PlayerImage> {
        let data = self.map::<u8, _>(1, |v, d| d[0] = (v & PLAYER_INDEX_BITMASK) as u8);
        to_image_buffer(self.width, self.height, data)
    }

    /// Depth in millimeters without the player indices
    pub fn depth_image(&self) -> Result<DepthImage> {
        let data = self.map::<u16, _>(1, |v, d| d[0] = v >> PLAYER_INDEX_BITMASK_WIDTH);
        to_image_buffer(self.width, self.height, data)
    }

    /// Mask of all pixels belonging to any player
    pub fn player_mask(&self) -> Result<MaskImage> {
        let data = self.map::<u8, _>(1, |v, d| d[0] = ((v & PLAYER_INDEX_BITMASK) != 0) as u8);
        to_image_buffer(self.width, self.height, data)
    }

    /// Depth as gray values: `min_mm` is white, fading linearly to black
    /// at `max_mm`. Unknown depths and depths outside of the range are black.
    pub fn grayscale(&self, min_mm: u16, max_mm: u16) -> Result<GrayImage> {
        if max_mm <= min_mm {
            warn!("Empty depth range {} - {}", min_mm, max_mm);
        }
        let range = max_mm.saturating_sub(min_mm) as u32;
        let data = self.map::<u8, _>(1, |v, d| {
            let depth = v >> PLAYER_INDEX_BITMASK_WIDTH;
            d[0] = if range == 0 || depth == 0 || depth < min_mm || depth > max_mm {
                0
            } else {
                (255 - (depth - min_mm) as u32 * 255 / range) as u8
            };
        });
        to_image_buffer(self.width, self.height, data)
    }
}

/// Reads a depth frame of the given size stored as little endian u16 values
pub fn read_depth_frame<R: Read>(mut reader: R, width: u32, height: u32) -> Result<DepthFrame> {
    let mut data = vec![0u16; width as usize * height as usize];
    reader.read_u16_into::<LittleEndian>(&mut data)
        .chain_err(|| format!("Cannot read depth frame of {}x{}", width, height))?;
    debug!("Read depth frame of {}x{}", width, height);
    DepthFrame::new(width, height, data)
}

/// Reads a color frame of the given size stored as BGRX bytes
pub fn read_color_frame<R: Read>(mut reader: R, width: u32, height: u32) -> Result<ColorFrame> {
    let mut data = vec![0u8; width as usize * height as usize * 4];
    reader.read_exact(&mut data)
        .chain_err(|| format!("Cannot read color frame of {}x{}", width, height))?;
    debug!("Read color frame of {}x{}", width, height);
    ColorFrame::new(width, height, data)
}
