use goghflow::utils::*;

#[test]
fn test_normalize_name() {
    assert_eq!(normalize_name("Vincent van Gogh"), "vincent van gogh");
    assert_eq!(normalize_name("  Vincent   van\tGogh  "), "vincent van gogh");
    assert_eq!(normalize_name("CLAUDE MONET"), "claude monet");
    assert_eq!(normalize_name(""), "");
    assert_eq!(normalize_name("   "), "");
}

#[test]
fn test_artist_matches_exact() {
    assert!(artist_matches("Vincent van Gogh", "Vincent van Gogh"));
    assert!(artist_matches("vincent VAN gogh", "Vincent van Gogh"));
}

#[test]
fn test_artist_matches_last_name_fallback() {
    // Upstream stores names in varied formats; the surname fallback must
    // catch the "Surname, Given (Nationality, dates)" form.
    assert!(artist_matches(
        "Gogh, Vincent van (Dutch, 1853–1890)",
        "Vincent van Gogh"
    ));
    assert!(artist_matches(
        "Renoir, Pierre-Auguste (French, 1841–1919)",
        "Pierre-Auguste Renoir"
    ));
}

#[test]
fn test_artist_matches_rejects_other_artists() {
    assert!(!artist_matches("Claude Monet", "Vincent van Gogh"));
    assert!(!artist_matches("", "Vincent van Gogh"));
    assert!(!artist_matches("   ", "Vincent van Gogh"));
}

#[test]
fn test_artist_matches_empty_target_never_matches() {
    assert!(!artist_matches("Claude Monet", ""));
    assert!(!artist_matches("Claude Monet", "   "));
}

#[test]
fn test_backoff_increases_until_cap() {
    let base = 2_000;
    let cap = 180_000;

    let mut prev = 0;
    let mut capped = false;
    for attempt in 0..12 {
        let delay = backoff_before_jitter(attempt, base, cap);
        assert!(delay <= cap);
        if capped {
            assert_eq!(delay, cap);
        } else if delay == cap {
            capped = true;
        } else {
            // strictly increasing pre-cap
            assert!(delay > prev);
        }
        prev = delay;
    }
    assert!(capped, "cap should be reached within 12 attempts");
}

#[test]
fn test_backoff_first_attempt_is_base() {
    assert_eq!(backoff_before_jitter(0, 2_000, 180_000), 2_000);
    assert_eq!(backoff_before_jitter(1, 2_000, 180_000), 4_000);
}

#[test]
fn test_backoff_no_overflow_on_large_attempts() {
    assert_eq!(backoff_before_jitter(200, 2_000, 180_000), 180_000);
}
