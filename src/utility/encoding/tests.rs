// gitsync-rs: Git Repository Sync Worker
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{bytes_to_utf8, non_empty_lines};
use std::borrow::Cow;

#[test]
fn test_utf8_passthrough_borrows() {
    let input = "Hello, 世界!";
    let result = bytes_to_utf8(input.as_bytes());
    assert!(matches!(result, Cow::Borrowed(_)));
    insta::assert_snapshot!(result, @"Hello, 世界!");
}

#[test]
fn test_gbk_fallback() {
    // "提交" in GBK
    let input = b"\xcc\xe1\xbd\xbb";
    insta::assert_snapshot!(bytes_to_utf8(input), @"提交");
}

#[test]
fn test_gbk_two_characters() {
    let input = b"\xd6\xd0\xce\xc4";
    assert_eq!(bytes_to_utf8(input), "中文");
}

#[test]
fn test_invalid_bytes_are_replaced() {
    // 0xFF is neither valid UTF-8 nor a valid GBK lead byte
    let input = b"ok\xff";
    let result = bytes_to_utf8(input);
    assert_eq!(result, "ok\u{FFFD}");
}

#[test]
fn test_non_empty_lines() {
    let text = " M a.txt\r\n\n?? b.txt\n   \nR  c.txt -> d.txt";
    let lines: Vec<&str> = non_empty_lines(text).collect();
    assert_eq!(lines, vec![" M a.txt", "?? b.txt", "R  c.txt -> d.txt"]);
}

#[test]
fn test_non_empty_lines_empty_input() {
    assert_eq!(non_empty_lines("").count(), 0);
    assert_eq!(non_empty_lines("\n\r\n").count(), 0);
}
