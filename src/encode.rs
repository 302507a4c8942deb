//! PNG persistence for rendered buffers.

use std::path::Path;

use crate::{
    error::{UishotError, UishotResult},
    render::PixelBuffer,
};

/// Write `buffer` as a lossless RGBA PNG. The buffer arrives premultiplied
/// from the renderer and is converted to straight alpha for encoding.
pub fn write_png(buffer: &PixelBuffer, path: &Path) -> UishotResult<()> {
    let data = unpremultiply(&buffer.data);

    image::save_buffer_with_format(
        path,
        &data,
        buffer.width,
        buffer.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .map_err(|err| match err {
        image::ImageError::IoError(io) => {
            UishotError::write(format!("unable to write '{}': {io}", path.display()))
        }
        other => UishotError::encode(format!("unable to encode '{}': {other}", path.display())),
    })
}

fn unpremultiply(premul: &[u8]) -> Vec<u8> {
    let mut out = premul.to_vec();
    for px in out.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
    out
}
