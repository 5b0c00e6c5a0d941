//! Headless frame capture

use std::path::Path;

use thiserror::Error;

use crate::rasterizer::Framebuffer;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("framebuffer is {width}x{height} but holds {len} bytes")]
    Size { width: usize, height: usize, len: usize },
    #[error("failed to write PNG: {0}")]
    Image(#[from] image::ImageError),
}

/// Write the framebuffer as an RGBA PNG
pub fn save_png<P: AsRef<Path>>(fb: &Framebuffer, path: P) -> Result<(), SnapshotError> {
    let img = image::RgbaImage::from_raw(fb.width as u32, fb.height as u32, fb.pixels.clone())
        .ok_or(SnapshotError::Size {
            width: fb.width,
            height: fb.height,
            len: fb.pixels.len(),
        })?;

    img.save_with_format(path, image::ImageFormat::Png)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::Color;

    #[test]
    fn test_save_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");

        let mut fb = Framebuffer::new(8, 6);
        fb.clear(Color::BLUE);
        fb.set_pixel(7, 5, Color::with_alpha(9, 8, 7, 6));
        save_png(&fb, &path).unwrap();

        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!(img.dimensions(), (8, 6));
        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 255, 255]);
        assert_eq!(img.get_pixel(7, 5).0, [9, 8, 7, 6]);
    }

    #[test]
    fn test_bad_buffer_size() {
        let mut fb = Framebuffer::new(4, 4);
        fb.pixels.truncate(10);
        let dir = tempfile::tempdir().unwrap();
        let err = save_png(&fb, dir.path().join("bad.png")).unwrap_err();
        assert!(matches!(err, SnapshotError::Size { len: 10, .. }));
    }
}
