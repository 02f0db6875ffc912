//! DOCX format detection.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Local file header signature every ZIP archive starts with.
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// Check that a file starts with a ZIP signature.
///
/// # Arguments
/// * `path` - Path to the candidate DOCX file
///
/// # Returns
/// * `Ok(())` if the file looks like a ZIP package
/// * `Err(Error::DocumentLoad)` if it does not
///
/// # Example
/// ```no_run
/// use sansliterate::detect::check_package_header;
///
/// check_package_header("document.docx").unwrap();
/// ```
pub fn check_package_header<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    let mut header = [0u8; 4];
    let read = File::open(path)
        .and_then(|mut file| file.read(&mut header))
        .map_err(|e| Error::DocumentLoad(format!("cannot read {}: {e}", path.display())))?;

    if !is_zip_bytes(&header[..read]) {
        return Err(Error::DocumentLoad(format!(
            "{} is not a DOCX package (no ZIP signature)",
            path.display()
        )));
    }
    Ok(())
}

/// Check if bytes start with a ZIP signature.
pub fn is_zip_bytes(data: &[u8]) -> bool {
    data.starts_with(ZIP_MAGIC)
}

/// Check if a path has a `.docx` extension (case-insensitive).
pub fn has_docx_extension<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("docx"))
}

/// Check if a file is a DOCX package: `.docx` extension and a ZIP signature.
pub fn is_docx<P: AsRef<Path>>(path: P) -> bool {
    let path = path.as_ref();
    has_docx_extension(path) && check_package_header(path).is_ok()
}
