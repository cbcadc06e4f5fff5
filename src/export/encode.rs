//! PNG encoding of rendered snapshots.

use super::types::ExportError;

/// Encodes `surface` as PNG into memory.
///
/// Cairo surfaces cannot leave the thread that owns them, so encoding happens here
/// and only the resulting bytes are handed to the background saver.
pub fn encode_png(surface: &cairo::ImageSurface) -> Result<Vec<u8>, ExportError> {
    let mut buffer = Vec::new();
    surface
        .write_to_png(&mut buffer)
        .map_err(|e| ExportError::Encode(e.to_string()))?;
    log::debug!(
        "Encoded {}x{} snapshot ({} bytes)",
        surface.width(),
        surface.height(),
        buffer.len()
    );
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cairo::{Context, Format, ImageSurface};

    #[test]
    fn encodes_png_signature() {
        let surface = ImageSurface::create(Format::ARgb32, 16, 8).unwrap();
        {
            let ctx = Context::new(&surface).unwrap();
            ctx.set_source_rgb(1.0, 0.0, 0.0);
            ctx.paint().unwrap();
        }

        let png = encode_png(&surface).unwrap();

        assert_eq!(&png[0..8], &[137, 80, 78, 71, 13, 10, 26, 10]);
        let decoded = image::load_from_memory(&png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (16, 8));
    }
}
