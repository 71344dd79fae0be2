// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Cleaning of untrusted identity text before it becomes a store key or value.

/// Strip control characters (0x00-0x1F, 0x7F) and surrounding whitespace.
///
/// Input that is not well-formed UTF-8 is treated as empty. Accepts either
/// `&str` or raw bytes, so header and body values share one path.
pub fn sanitize_identity(input: impl AsRef<[u8]>) -> String {
    let Ok(text) = std::str::from_utf8(input.as_ref()) else {
        return String::new();
    };

    let stripped: String = text.chars().filter(|c| !is_stripped_control(*c)).collect();
    stripped.trim().to_string()
}

/// ASCII C0 controls plus DEL. C1 controls are left alone.
fn is_stripped_control(c: char) -> bool {
    matches!(c, '\u{0000}'..='\u{001F}' | '\u{007F}')
}
