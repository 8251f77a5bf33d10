use std::path::Path;

use crate::error::MediaError;

/// Largest edge a still is kept at once decoded; the canvas never shows it
/// bigger than this.
const MAX_STILL_EDGE: u32 = 2048;

pub fn decode_still(path: &Path) -> Result<image::RgbaImage, MediaError> {
    let img = image::open(path).map_err(|source| MediaError::Image {
        path: path.to_path_buf(),
        source,
    })?;
    let img = if img.width() > MAX_STILL_EDGE || img.height() > MAX_STILL_EDGE {
        img.thumbnail(MAX_STILL_EDGE, MAX_STILL_EDGE)
    } else {
        img
    };
    Ok(img.to_rgba8())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_reports_path() {
        let err = decode_still(Path::new("/nonexistent/storycut/still.png")).unwrap_err();
        assert!(matches!(err, MediaError::Image { .. }));
        assert!(err.to_string().contains("still.png"));
    }

    #[test]
    fn decodes_small_png() {
        let path = std::env::temp_dir().join(format!("storycut-still-{}.png", std::process::id()));
        image::RgbaImage::from_pixel(4, 2, image::Rgba([255, 0, 0, 255]))
            .save(&path)
            .unwrap();
        let img = decode_still(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(img.dimensions(), (4, 2));
        assert_eq!(img.get_pixel(0, 0).0, [255, 0, 0, 255]);
    }
}
