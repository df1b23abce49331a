use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::error::{SurfaceError, SurfaceResult};

pub const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Wrap PNG bytes into a data URL.
pub fn png_data_url(png: &[u8]) -> String {
    let mut url = String::with_capacity(PNG_DATA_URL_PREFIX.len() + png.len() * 4 / 3 + 4);
    url.push_str(PNG_DATA_URL_PREFIX);
    STANDARD.encode_string(png, &mut url);
    url
}

/// Extract PNG bytes from a data URL produced by [`png_data_url`].
pub fn decode_png_data_url(url: &str) -> SurfaceResult<Vec<u8>> {
    let payload = url
        .strip_prefix(PNG_DATA_URL_PREFIX)
        .ok_or(SurfaceError::InvalidDataUrl)?;
    Ok(STANDARD.decode(payload)?)
}
