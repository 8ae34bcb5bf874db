//! One-shot screen capture.
//!
//! The magnifier freezes whatever is on screen at startup; everything after
//! that navigates over this single image. There is deliberately no
//! re-capture path and no shared-memory fast path.

use image::RgbaImage;

use crate::error::Error;

pub struct Screenshot {
    pub image: RgbaImage,
    pub width: u32,
    pub height: u32,
}

/// Grab the first monitor's current contents as an RGBA image.
pub fn capture_screen() -> Result<Screenshot, Error> {
    let monitors = xcap::Monitor::all()
        .map_err(|e| Error::Capture(format!("enumerating monitors: {e}")))?;
    let monitor = monitors
        .into_iter()
        .next()
        .ok_or_else(|| Error::Capture("no monitor found".to_string()))?;

    let image = monitor
        .capture_image()
        .map_err(|e| Error::Capture(format!("grabbing monitor image: {e}")))?;
    let (width, height) = image.dimensions();
    log::info!("captured {width}x{height} screenshot");

    Ok(Screenshot {
        image,
        width,
        height,
    })
}
