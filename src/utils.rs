//! Pure helpers shared across the pipeline: artist-name matching and backoff
//! arithmetic. Everything here is deterministic and side-effect free so the
//! integration tests can exercise it directly.

/// Normalizes an artist name for comparison: lowercase, internal whitespace
/// collapsed to single spaces, trimmed.
pub fn normalize_name(s: &str) -> String {
    s.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Decides whether a record's display name belongs to a target artist.
///
/// Positive on normalized equality, or when the display name contains the
/// target's last whitespace-delimited token. Upstream stores names in varied
/// formats ("Gogh, Vincent van (Dutch, 1853–1890)"), so exact equality alone
/// under-matches badly. The last-name fallback accepts a controlled
/// false-positive rate (same surname, different person) in exchange for
/// recall on a small, manually curated list.
pub fn artist_matches(display_name: &str, target_name: &str) -> bool {
    let a = normalize_name(display_name);
    if a.is_empty() {
        return false;
    }
    let t = normalize_name(target_name);
    if t.is_empty() {
        return false;
    }
    let last = t.rsplit(' ').next().unwrap_or(&t);
    a == t || a.contains(last)
}

/// Exponential backoff delay in milliseconds before jitter:
/// `min(cap_ms, base_ms * 2^attempt)`. Strictly increasing in `attempt`
/// until the cap is reached.
pub fn backoff_before_jitter(attempt: u32, base_ms: u64, cap_ms: u64) -> u64 {
    let factor = 2u64.saturating_pow(attempt);
    cap_ms.min(base_ms.saturating_mul(factor))
}
