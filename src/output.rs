//! Destinations for the encoded PNG

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::rendering::Screenshot;

/// Something that accepts a finished PNG.
pub trait OutputSink {
    /// Short human-readable name used in log lines
    fn name(&self) -> String;

    fn deliver(&mut self, shot: &Screenshot) -> Result<()>;
}

/// Writes the PNG bytes to a file path.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OutputSink for FileSink {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    fn deliver(&mut self, shot: &Screenshot) -> Result<()> {
        std::fs::write(&self.path, &shot.png_data)
            .map_err(|e| Error::Draw(format!("failed to save {}: {}", self.path.display(), e)))
    }
}

/// Pushes the image onto the OS clipboard.
#[cfg(feature = "clipboard")]
#[derive(Debug, Default)]
pub struct ClipboardSink;

#[cfg(feature = "clipboard")]
impl OutputSink for ClipboardSink {
    fn name(&self) -> String {
        "clipboard".to_string()
    }

    fn deliver(&mut self, shot: &Screenshot) -> Result<()> {
        // the clipboard takes raw pixels, so decode the exact bytes written to disk
        let rgba = image::load_from_memory(&shot.png_data)?.to_rgba8();
        let (width, height) = rgba.dimensions();
        let data = arboard::ImageData {
            width: width as usize,
            height: height as usize,
            bytes: rgba.into_raw().into(),
        };

        let mut clipboard = arboard::Clipboard::new().map_err(|e| Error::Clipboard(e.to_string()))?;
        clipboard
            .set_image(data)
            .map_err(|e| Error::Clipboard(e.to_string()))
    }
}

/// Stand-in used when the crate is built without clipboard support.
#[cfg(not(feature = "clipboard"))]
#[derive(Debug, Default)]
pub struct ClipboardSink;

#[cfg(not(feature = "clipboard"))]
impl OutputSink for ClipboardSink {
    fn name(&self) -> String {
        "clipboard".to_string()
    }

    fn deliver(&mut self, _shot: &Screenshot) -> Result<()> {
        Err(Error::Clipboard("built without the `clipboard` feature".into()))
    }
}

/// Where a finished image went.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Delivery {
    pub saved_to: Option<PathBuf>,
    pub copied: bool,
}

/// Hand `shot` to the optional clipboard sink, then always to the file sink.
///
/// A clipboard failure is logged and does not prevent the file write.
pub fn fan_out(
    shot: &Screenshot,
    clipboard: Option<&mut dyn OutputSink>,
    file: &mut FileSink,
) -> Result<Delivery> {
    let mut delivery = Delivery::default();

    if let Some(sink) = clipboard {
        match sink.deliver(shot) {
            Ok(()) => {
                log::info!("copied {}x{} image to {}", shot.width, shot.height, sink.name());
                delivery.copied = true;
            }
            Err(e) => log::warn!("failed to copy image to {}: {}", sink.name(), e),
        }
    }

    file.deliver(shot)?;
    log::info!("wrote {} (sha256 {})", file.name(), shot.digest());
    delivery.saved_to = Some(file.path().to_path_buf());
    Ok(delivery)
}
