use std::path::{Path, PathBuf};
use image::RgbImage;

use crate::errors::{ColoringPageError, Result};

/// Represents an input photo with its metadata
#[derive(Debug)]
pub struct InputImage {
    pub image: RgbImage,
    pub path: PathBuf,
    pub filename: String,
}

/// Load a photo, ensuring RGB format.
///
/// An unreadable or zero-sized file surfaces as a load failure so the caller
/// can present it without tearing down the session.
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<InputImage> {
    let path = path.as_ref();

    // Get filename without extension
    let filename = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| ColoringPageError::InvalidPath(path.to_path_buf()))?
        .to_string();

    let img = image::open(path).map_err(|e| ColoringPageError::Load(e.to_string()))?;

    let rgb_img = img.to_rgb8();

    if rgb_img.width() == 0 || rgb_img.height() == 0 {
        return Err(ColoringPageError::Load(format!(
            "{} decoded to an empty image",
            path.display()
        )));
    }

    Ok(InputImage {
        image: rgb_img,
        path: path.to_path_buf(),
        filename,
    })
}

/// Save the working page to the specified path. The encoder is chosen from
/// the file extension (PNG, JPEG, ...).
pub fn save_image<P: AsRef<Path>>(image: &RgbImage, path: P) -> Result<()> {
    image
        .save(path.as_ref())
        .map_err(|e| ColoringPageError::Save(e.to_string()))?;

    Ok(())
}
