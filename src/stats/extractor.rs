//! Pulls `/reference:` arguments out of a single compiler command line.

/// The argument prefix the C# and VB compilers use for assembly references.
pub const REFERENCE_MARKER: &str = "/reference:";

/// Extract every reference token from a compiler command line, in order.
///
/// The command line is split on [`REFERENCE_MARKER`] and everything before the
/// first marker is discarded. The final segment usually carries the rest of the
/// command line, so it is cut at the next `/` and only the first piece is kept.
/// Tokens are trimmed of surrounding whitespace; quotes are left in place.
///
/// Duplicates are returned as-is. A command line without the marker yields an
/// empty vector.
pub fn extract_references(command_line: &str) -> Vec<String> {
    let mut segments: Vec<&str> = command_line.split(REFERENCE_MARKER).skip(1).collect();

    if let Some(last) = segments.last_mut() {
        // `split` always yields at least one piece
        *last = last.split('/').next().unwrap_or_default();
    }

    segments
        .into_iter()
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(ToString::to_string)
        .collect()
}
