/**
 * Filename Sanitizing
 *
 * Client-supplied filenames are never used as-is. `sanitize_filename`
 * reduces one to a safe basename:
 *
 * - path components are dropped (`../../etc/passwd` → `passwd`)
 * - anything outside `[A-Za-z0-9._-]` becomes `_`
 * - runs of dots collapse to one and leading dots are removed
 * - the result is at most 200 characters, keeping the extension
 * - an empty result falls back to `file_<millis>`
 */

use chrono::Utc;

/// Longest sanitized filename
pub const MAX_FILENAME_LEN: usize = 200;

/// Reduce a client filename to a safe basename
pub fn sanitize_filename(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or("");

    let mut cleaned = String::with_capacity(base.len());
    for c in base.chars() {
        let c = if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
            c
        } else {
            '_'
        };
        if c == '.' && cleaned.ends_with('.') {
            continue;
        }
        cleaned.push(c);
    }

    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        return format!("file_{}", Utc::now().timestamp_millis());
    }

    truncate_keeping_extension(cleaned, MAX_FILENAME_LEN)
}

/// Lowercase extension including the dot, or "" if there is none
pub fn file_extension(name: &str) -> String {
    match name.rfind('.') {
        Some(idx) if idx > 0 => name[idx..].to_ascii_lowercase(),
        _ => String::new(),
    }
}

// Only ASCII survives sanitizing, so byte offsets are char offsets.
fn truncate_keeping_extension(name: &str, max: usize) -> String {
    if name.len() <= max {
        return name.to_string();
    }
    let ext = match name.rfind('.') {
        Some(idx) if name.len() - idx < max => &name[idx..],
        _ => "",
    };
    let stem_len = max - ext.len();
    format!("{}{}", &name[..stem_len], ext)
}
