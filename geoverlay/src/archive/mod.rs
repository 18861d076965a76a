//! Archive-backed multi-file raster overlays.
//!
//! Some backends answer a raster fetch with a zip archive containing one or
//! more GeoTIFF files instead of a single payload. [`extract_rasters`]
//! unpacks every raster entry; a failure on one entry is reported and the
//! remaining entries are still processed (partial-success policy).

use std::io::{Cursor, Read};
use std::path::Path;

use image::ImageFormat;
use thiserror::Error;
use tracing::{debug, warn};
use zip::ZipArchive;

/// File extensions treated as raster entries.
const RASTER_EXTENSIONS: &[&str] = &["tif", "tiff"];

/// Upper bound on the per-entry buffer pre-allocation. The declared entry
/// size comes from the archive and is not trusted; larger entries grow the
/// buffer as they are actually read.
const MAX_ENTRY_PREALLOC: usize = 1024 * 1024;

/// Errors for archives that cannot be processed at all. Per-entry failures
/// are logged and skipped instead.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// The payload is not a readable zip archive.
    #[error("failed to read archive: {0}")]
    Unreadable(#[from] zip::result::ZipError),
}

/// One raster file extracted from an overlay archive.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterEntry {
    /// Entry filename without directory components; used to derive the
    /// registry layer name.
    pub filename: String,
    pub data: Vec<u8>,
}

/// Extracts every raster entry from a zip archive.
///
/// Non-raster entries are skipped silently. Entries that fail to extract or
/// are not actually TIFF data are logged at WARN and skipped. Only an
/// unreadable archive container fails the whole call.
pub fn extract_rasters(bytes: &[u8]) -> Result<Vec<RasterEntry>, ArchiveError> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let mut entries = Vec::new();

    for index in 0..archive.len() {
        let mut file = match archive.by_index(index) {
            Ok(file) => file,
            Err(e) => {
                warn!(index, error = %e, "failed to open archive entry, skipping");
                continue;
            }
        };
        if file.is_dir() {
            continue;
        }

        let Some(filename) = entry_filename(file.name()) else {
            debug!(entry = file.name(), "skipping archive entry without a filename");
            continue;
        };
        if !is_raster_filename(&filename) {
            debug!(entry = %filename, "skipping non-raster archive entry");
            continue;
        }

        let mut data = Vec::with_capacity((file.size() as usize).min(MAX_ENTRY_PREALLOC));
        if let Err(e) = file.read_to_end(&mut data) {
            warn!(entry = %filename, error = %e, "failed to extract archive entry, skipping");
            continue;
        }

        match image::guess_format(&data) {
            Ok(ImageFormat::Tiff) => {
                debug!(entry = %filename, bytes = data.len(), "extracted raster entry");
                entries.push(RasterEntry { filename, data });
            }
            Ok(other) => {
                warn!(entry = %filename, format = ?other, "archive entry is not TIFF data, skipping");
            }
            Err(e) => {
                warn!(entry = %filename, error = %e, "unrecognized raster data in archive entry, skipping");
            }
        }
    }

    Ok(entries)
}

fn entry_filename(entry_name: &str) -> Option<String> {
    Path::new(entry_name)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
}

fn is_raster_filename(filename: &str) -> bool {
    Path::new(filename)
        .extension()
        .map(|ext| {
            let ext = ext.to_string_lossy().to_lowercase();
            RASTER_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    /// Little-endian TIFF magic followed by filler, enough for format
    /// detection.
    const TIFF_BYTES: &[u8] = b"II*\x00\x08\x00\x00\x00geoverlay";

    fn build_zip(entries: &[(&str, &[u8])]) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, data) in entries {
            writer
                .start_file(*name, SimpleFileOptions::default())
                .unwrap();
            writer.write_all(data).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_extracts_raster_entries_and_ignores_others() {
        let archive = build_zip(&[
            ("a.tif", TIFF_BYTES),
            ("b.tif", TIFF_BYTES),
            ("c.txt", b"not a raster"),
        ]);

        let entries = extract_rasters(&archive).unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.filename.as_str()).collect();
        assert_eq!(names, vec!["a.tif", "b.tif"]);
    }

    #[test]
    fn test_entry_filename_strips_directories() {
        let archive = build_zip(&[("data/rasters/ndvi_2024.tiff", TIFF_BYTES)]);
        let entries = extract_rasters(&archive).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].filename, "ndvi_2024.tiff");
    }

    #[test]
    fn test_partial_success_on_bad_entry() {
        // b.tif carries PNG magic: wrong format, skipped; a.tif survives.
        let archive = build_zip(&[
            ("a.tif", TIFF_BYTES),
            ("b.tif", b"\x89PNG\r\n\x1a\n....."),
        ]);

        let entries = extract_rasters(&archive).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].filename, "a.tif");
    }

    #[test]
    fn test_unreadable_archive_is_an_error() {
        let err = extract_rasters(b"definitely not a zip").unwrap_err();
        assert!(matches!(err, ArchiveError::Unreadable(_)));
    }

    #[test]
    fn test_empty_archive_yields_no_entries() {
        let archive = build_zip(&[]);
        assert!(extract_rasters(&archive).unwrap().is_empty());
    }

    #[test]
    fn test_entry_larger_than_prealloc_cap_extracts_fully() {
        let mut data = TIFF_BYTES.to_vec();
        data.resize(MAX_ENTRY_PREALLOC + 4096, 0);
        let archive = build_zip(&[("big.tif", data.as_slice())]);

        let entries = extract_rasters(&archive).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].data.len(), MAX_ENTRY_PREALLOC + 4096);
    }

    #[test]
    fn test_extension_matching_is_case_insensitive() {
        let archive = build_zip(&[("UPPER.TIF", TIFF_BYTES)]);
        let entries = extract_rasters(&archive).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].filename, "UPPER.TIF");
    }
}
