// SPDX-FileCopyrightText: 2026 Triago Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cookie-backed session state.
//!
//! The pipeline only computes score deltas; the balance itself lives in
//! the client's cookies with a fixed retention window. Reads tolerate
//! missing or garbled cookies by falling back to the initial balance --
//! last-writer-wins, no transactional guarantee across concurrent
//! requests for the same session.

use axum_extra::headers::Cookie;
use rand::seq::SliceRandom;
use rand::Rng;

/// Cookie holding the point balance.
pub const POINTS_COOKIE: &str = "points";

/// Cookie holding the visitor pseudonym.
pub const PSEUDO_COOKIE: &str = "pseudo";

const ADJECTIVES: &[&str] = &["Green", "Smart", "Eco", "Fast"];
const ANIMALS: &[&str] = &["Koala", "Tiger", "Falcon", "Otter"];

/// Read the point balance from cookies, defaulting to `initial` when the
/// cookie is absent or unparseable.
pub fn read_points(cookies: Option<&Cookie>, initial: u32) -> u32 {
    cookies
        .and_then(|c| c.get(POINTS_COOKIE))
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(initial)
}

/// Read the pseudonym from cookies, if present.
pub fn read_pseudo(cookies: Option<&Cookie>) -> Option<String> {
    cookies
        .and_then(|c| c.get(PSEUDO_COOKIE))
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Build a `Set-Cookie` value for the point balance.
pub fn points_cookie(points: u32, max_age_secs: u64) -> String {
    format!("{POINTS_COOKIE}={points}; Path=/; Max-Age={max_age_secs}")
}

/// Build a `Set-Cookie` value for the pseudonym.
pub fn pseudo_cookie(pseudo: &str, max_age_secs: u64) -> String {
    format!("{PSEUDO_COOKIE}={pseudo}; Path=/; Max-Age={max_age_secs}")
}

/// Generate a fresh visitor pseudonym (adjective + animal + number).
pub fn generate_pseudonym() -> String {
    let mut rng = rand::thread_rng();
    let adjective = ADJECTIVES.choose(&mut rng).expect("non-empty list");
    let animal = ANIMALS.choose(&mut rng).expect("non-empty list");
    let number: u16 = rng.gen_range(0..1000);
    format!("{adjective}{animal}{number}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cookie(value: &str) -> Cookie {
        use axum_extra::headers::{Header, HeaderValue};
        let value = HeaderValue::from_str(value).unwrap();
        Cookie::decode(&mut [value].iter()).unwrap()
    }

    #[test]
    fn read_points_parses_cookie() {
        let c = cookie("points=42; pseudo=GreenKoala7");
        assert_eq!(read_points(Some(&c), 100), 42);
    }

    #[test]
    fn read_points_defaults_when_missing() {
        let c = cookie("pseudo=GreenKoala7");
        assert_eq!(read_points(Some(&c), 100), 100);
        assert_eq!(read_points(None, 100), 100);
    }

    #[test]
    fn read_points_defaults_on_garbage() {
        let c = cookie("points=not-a-number");
        assert_eq!(read_points(Some(&c), 100), 100);
    }

    #[test]
    fn read_pseudo_roundtrip() {
        let c = cookie("points=10; pseudo=FastOtter12");
        assert_eq!(read_pseudo(Some(&c)).as_deref(), Some("FastOtter12"));
        assert_eq!(read_pseudo(None), None);
    }

    #[test]
    fn cookie_values_carry_retention() {
        let v = points_cookie(88, 604_800);
        assert_eq!(v, "points=88; Path=/; Max-Age=604800");

        let v = pseudo_cookie("EcoFalcon3", 604_800);
        assert!(v.starts_with("pseudo=EcoFalcon3;"));
        assert!(v.contains("Max-Age=604800"));
    }

    #[test]
    fn generated_pseudonym_has_expected_shape() {
        let pseudo = generate_pseudonym();
        assert!(ADJECTIVES.iter().any(|a| pseudo.starts_with(a)));
        assert!(pseudo.chars().last().unwrap().is_ascii_digit());
    }
}
