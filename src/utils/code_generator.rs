//! Short code generation.
//!
//! Codes are 6 characters drawn uniformly from the 62-symbol alphanumeric
//! alphabet. Generators are plain values injected into the service, so tests
//! can substitute a seeded or mocked source.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Mutex, PoisonError};

/// Characters a short code may contain.
pub const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Length of every generated short code.
pub const SHORT_CODE_LENGTH: usize = 6;

/// Source of candidate short codes.
///
/// Implementations only draw codes; uniqueness is checked by
/// [`crate::application::services::ShortenService`].
#[cfg_attr(test, mockall::automock)]
pub trait CodeGenerator: Send + Sync {
    /// Draws a fresh candidate code.
    fn generate(&self) -> String;
}

/// Draws codes from the calling thread's RNG.
///
/// Holds no state, so concurrent requests never contend on a shared source.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomCodeGenerator;

impl RandomCodeGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> String {
        generate_code(&mut rand::rng())
    }
}

/// Deterministic generator backed by a seeded [`StdRng`].
///
/// Two generators built from the same seed yield the same code sequence.
#[derive(Debug)]
pub struct SeededCodeGenerator {
    rng: Mutex<StdRng>,
}

impl SeededCodeGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl CodeGenerator for SeededCodeGenerator {
    fn generate(&self) -> String {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        generate_code(&mut *rng)
    }
}

/// Draws a [`SHORT_CODE_LENGTH`]-character code from [`ALPHABET`].
pub fn generate_code<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..SHORT_CODE_LENGTH)
        .map(|_| {
            let idx = rng.random_range(0..ALPHABET.len());
            ALPHABET[idx] as char
        })
        .collect()
}

/// Returns true if `code` has the shape of a generated short code.
pub fn is_generated_code(code: &str) -> bool {
    code.len() == SHORT_CODE_LENGTH && code.bytes().all(|b| ALPHABET.contains(&b))
}
