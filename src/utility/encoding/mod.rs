// gitsync-rs: Git Repository Sync Worker
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Tolerant decoding of process output (UTF-8 / GBK).
//!
//! ```text
//! raw bytes --> strict UTF-8 ? --> strict GBK ? --> lossy UTF-8
//! ```
//!
//! Uses `encoding_rs`. Never fails: invalid sequences become U+FFFD.
//!
//! git writes UTF-8 for its own messages, but paths and hook output on
//! Chinese-locale Windows machines frequently arrive as GBK.

use encoding_rs::GBK;
use std::borrow::Cow;

/// Converts process output bytes to UTF-8.
///
/// Tries strict UTF-8, then strict GBK, then falls back to lossy UTF-8.
///
/// # Example
/// ```
/// use gitsync_rs::utility::encoding::bytes_to_utf8;
///
/// let gbk_bytes = b"\xd6\xd0\xce\xc4"; // "中文" in GBK
/// assert_eq!(bytes_to_utf8(gbk_bytes), "中文");
/// ```
#[must_use]
pub fn bytes_to_utf8(bytes: &[u8]) -> Cow<'_, str> {
    if let Ok(text) = std::str::from_utf8(bytes) {
        return Cow::Borrowed(text);
    }
    if let Some(text) = GBK.decode_without_bom_handling_and_without_replacement(bytes) {
        return text;
    }
    String::from_utf8_lossy(bytes)
}

/// Iterates over the non-empty lines of decoded output.
///
/// Handles both LF and CRLF line endings.
pub fn non_empty_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty())
}

#[cfg(test)]
mod tests;
