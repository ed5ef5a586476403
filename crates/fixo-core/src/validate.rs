// SPDX-FileCopyrightText: 2026 Fixo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Client-side input validation for auth forms.
//!
//! Failures map to inline field messages; they never reach the backend.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::FixoError;

/// Local format (`0` + 9 digits) or international format (`+84` + 9 digits).
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(0\d{9}|\+84\d{9})$").expect("phone regex is valid"));

/// Validates a phone number.
///
/// Accepts `0xxxxxxxxx` and `+84xxxxxxxxx` with exactly 9 digits after the
/// prefix; rejects every other shape.
pub fn validate_phone(phone: &str) -> Result<(), FixoError> {
    if PHONE_RE.is_match(phone) {
        Ok(())
    } else {
        Err(FixoError::Validation(
            "phone must be 0xxxxxxxxx or +84xxxxxxxxx".into(),
        ))
    }
}

/// Validates a password.
///
/// Requires 6-20 characters containing at least one ASCII letter and at
/// least one digit.
pub fn validate_password(password: &str) -> Result<(), FixoError> {
    let len = password.chars().count();
    if !(6..=20).contains(&len) {
        return Err(FixoError::Validation(
            "password must be 6-20 characters".into(),
        ));
    }
    let has_letter = password.chars().any(|c| c.is_ascii_alphabetic());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    if !has_letter || !has_digit {
        return Err(FixoError::Validation(
            "password must contain at least one letter and one digit".into(),
        ));
    }
    Ok(())
}
