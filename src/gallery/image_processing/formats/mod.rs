pub mod jpeg;
pub mod png;

pub use super::types::OutputFormat;

use crate::gallery::GenerationError;
use crate::gallery::cache::{PARTIAL_PREFIX, PARTIAL_SUFFIX};
use image::DynamicImage;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Write a thumbnail into `cache_dir` so that it is either complete or absent.
///
/// The image is encoded into a dot-prefixed temporary file in the cache directory and
/// renamed over `cache_name` once fully written.
pub fn save_atomic(
    image: &DynamicImage,
    cache_dir: &Path,
    cache_name: &str,
    jpeg_quality: u8,
) -> Result<PathBuf, GenerationError> {
    let final_path = cache_dir.join(cache_name);
    let mut temp = tempfile::Builder::new()
        .prefix(PARTIAL_PREFIX)
        .suffix(PARTIAL_SUFFIX)
        .tempfile_in(cache_dir)?;

    {
        let mut writer = BufWriter::new(temp.as_file_mut());
        match OutputFormat::for_cache_name(cache_name) {
            OutputFormat::Jpeg => jpeg::encode(image, &mut writer, jpeg_quality)?,
            OutputFormat::Png => png::encode(image, &mut writer)?,
        }
        writer.flush()?;
    }

    temp.persist(&final_path)?;
    debug!("Wrote thumbnail {:?}", final_path);
    Ok(final_path)
}
