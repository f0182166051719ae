//! EXIF extraction via the `exiv2` command.

use std::path::Path;
use std::process::Command;

use log::warn;

use skylight_types::error::Result;

/// Read EXIF fields from a photo, keeping only the configured headers in
/// their configured order.
///
/// `exiv2` exits non-zero for photos without EXIF data; an empty field
/// list already covers that, so the exit status is ignored. Anything on
/// stderr is logged as a warning.
pub fn read_exif(file: &Path, headers: &[String]) -> Result<Vec<(String, String)>> {
    let output = Command::new("exiv2").arg(file).output()?;

    for line in String::from_utf8_lossy(&output.stderr).lines() {
        if !line.trim().is_empty() {
            warn!("exif problem ({}): {}", file.display(), line);
        }
    }

    Ok(parse_exif_output(
        &String::from_utf8_lossy(&output.stdout),
        headers,
    ))
}

/// Split `exiv2` summary output into `(field, value)` pairs.
///
/// Each line is split at the first `:`; values keep any further colons
/// (timestamps contain them). Fields not in `headers` are dropped and the
/// survivors are ordered by the header list.
pub fn parse_exif_output(stdout: &str, headers: &[String]) -> Vec<(String, String)> {
    let mut exif: Vec<(String, String)> = Vec::new();
    for line in stdout.lines() {
        let Some((field, value)) = line.split_once(':') else {
            continue;
        };
        let field = field.trim();
        if headers.iter().any(|h| h == field) {
            exif.push((field.to_string(), value.trim().to_string()));
        }
    }
    exif.sort_by_key(|(field, _)| {
        headers
            .iter()
            .position(|h| h == field)
            .unwrap_or(headers.len())
    });
    exif
}

// ------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------
