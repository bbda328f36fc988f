//! Linking-code generation.

use crate::errors::{AppError, AppResult};
use rand::Rng;
use std::collections::HashSet;

pub const CODE_MIN: u32 = 100_000;
pub const CODE_MAX: u32 = 999_999;

/// Uniform draw over the 6-digit range.
pub fn generate_code<G: Rng + ?Sized>(rng: &mut G) -> String {
    rng.gen_range(CODE_MIN..=CODE_MAX).to_string()
}

/// Draw a code not held by any currently open entry.
///
/// Gives up with `Conflict` after `attempts` draws.
pub fn generate_free_code<G: Rng + ?Sized>(
    rng: &mut G,
    open_codes: &HashSet<&str>,
    attempts: usize,
) -> AppResult<String> {
    for _ in 0..attempts.max(1) {
        let code = generate_code(rng);
        if !open_codes.contains(code.as_str()) {
            return Ok(code);
        }
    }
    Err(AppError::Conflict(format!(
        "no free linking code after {} attempts",
        attempts.max(1)
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn is_well_formed(code: &str) -> bool {
        code.len() == 6 && code.bytes().all(|b| b.is_ascii_digit())
    }

    #[test]
    fn codes_stay_in_six_digit_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let code = generate_code(&mut rng);
            assert!(is_well_formed(&code), "bad code {code}");
            assert!(!code.starts_with('0'));
        }
    }

    #[test]
    fn free_code_skips_open_codes() {
        let mut probe = StdRng::seed_from_u64(42);
        let first = generate_code(&mut probe);

        let open: HashSet<&str> = [first.as_str()].into_iter().collect();
        let mut rng = StdRng::seed_from_u64(42);
        let code = generate_free_code(&mut rng, &open, 8).unwrap();

        assert_ne!(code, first);
    }

    #[test]
    fn exhausted_attempts_is_a_conflict() {
        // every possible code is open
        let all: Vec<String> = (CODE_MIN..=CODE_MAX).map(|c| c.to_string()).collect();
        let open: HashSet<&str> = all.iter().map(|s| s.as_str()).collect();
        let mut rng = StdRng::seed_from_u64(1);

        let err = generate_free_code(&mut rng, &open, 3).unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }
}
