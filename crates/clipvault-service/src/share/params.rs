//! Creation-time option normalization.
//!
//! Raw values arrive as text from the form. Parsing is lenient in the same
//! way a browser-side `parseInt` is: surrounding whitespace is ignored and
//! only the leading integer is read, so `"2.5"` is 2 and `"12abc"` is 12.

use clipvault_core::config::ShareConfig;

/// Normalized options for a new share.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShareOptions {
    /// Redemptions allowed; always at least 1.
    pub max_receivers: i32,
    /// Minutes until expiry; in `1..=max_expiry_minutes`.
    pub expiry_minutes: i64,
}

impl ShareOptions {
    /// Options used when the sender supplies nothing.
    pub fn defaults(policy: &ShareConfig) -> Self {
        Self::from_raw(None, None, policy)
    }

    /// Normalize raw form values against the share policy.
    ///
    /// Absent, unparsable, or non-positive values fall back to the policy
    /// defaults. Expiry is then capped at `max_expiry_minutes`.
    pub fn from_raw(
        max_receivers: Option<&str>,
        expiry_minutes: Option<&str>,
        policy: &ShareConfig,
    ) -> Self {
        let max_receivers = positive(max_receivers)
            .map(|v| v.min(i64::from(i32::MAX)) as i32)
            .unwrap_or(policy.default_max_receivers);

        let expiry_minutes = positive(expiry_minutes)
            .unwrap_or(policy.default_expiry_minutes)
            .min(policy.max_expiry_minutes);

        Self {
            max_receivers,
            expiry_minutes,
        }
    }
}

fn positive(raw: Option<&str>) -> Option<i64> {
    raw.and_then(leading_int).filter(|v| *v > 0)
}

/// Read an optional sign and the leading run of digits. Saturates on overflow.
fn leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim();
    let (negative, digits) = match s.as_bytes().first()? {
        b'-' => (true, &s[1..]),
        b'+' => (false, &s[1..]),
        _ => (false, s),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let magnitude = digits[..end].bytes().fold(0i64, |acc, b| {
        acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
    });
    Some(if negative { -magnitude } else { magnitude })
}
