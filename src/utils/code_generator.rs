//! Short code generation.
//!
//! Codes are drawn from the operating system's entropy source and mapped onto
//! the 62-symbol alphanumeric alphabet. Codes are random, never sequential.

use crate::error::AppError;

/// Alphabet short codes are drawn from.
const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Default number of characters in a generated code.
pub const DEFAULT_CODE_LENGTH: usize = 8;

/// Largest multiple of the alphabet size that fits in a byte.
/// Bytes at or above it are discarded so every symbol is equally likely.
const REJECTION_THRESHOLD: u8 = (256 - 256 % ALPHABET.len()) as u8;

/// Upper bound on entropy refills for a single code.
const MAX_REFILLS: usize = 16;

/// Produces candidate short codes.
///
/// Implementations only propose codes; uniqueness is enforced by the store.
#[cfg_attr(test, mockall::automock)]
pub trait CodeGenerator: Send + Sync {
    /// Generates a fresh candidate code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Generator`] if no entropy is available.
    fn generate(&self) -> Result<String, AppError>;
}

/// Random alphanumeric code generator backed by `getrandom`.
#[derive(Debug, Clone)]
pub struct RandomCodeGenerator {
    length: usize,
}

impl RandomCodeGenerator {
    /// Creates a generator producing codes of `length` characters.
    pub fn new(length: usize) -> Self {
        Self { length }
    }
}

impl Default for RandomCodeGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_CODE_LENGTH)
    }
}

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> Result<String, AppError> {
        let mut code = String::with_capacity(self.length);
        let mut buffer = vec![0u8; self.length * 2];

        for _ in 0..MAX_REFILLS {
            getrandom::fill(&mut buffer).map_err(|e| {
                tracing::error!(error = %e, "Entropy source unavailable");
                AppError::generator("Failed to generate short code")
            })?;

            for &byte in &buffer {
                if code.len() == self.length {
                    return Ok(code);
                }
                if byte < REJECTION_THRESHOLD {
                    code.push(ALPHABET[usize::from(byte) % ALPHABET.len()] as char);
                }
            }

            if code.len() == self.length {
                return Ok(code);
            }
        }

        tracing::error!(refills = MAX_REFILLS, "Entropy source kept yielding rejected bytes");
        Err(AppError::generator("Failed to generate short code"))
    }
}

/// Checks that a caller-supplied short code is usable as a lookup key.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if the code is empty or contains
/// characters that cannot appear in a path segment.
pub fn validate_short_code(code: &str) -> Result<(), AppError> {
    if code.trim().is_empty() {
        return Err(AppError::validation("shortUrl is required"));
    }

    if code.chars().any(|c| c.is_whitespace() || c == '/') {
        return Err(AppError::validation(
            "shortUrl must not contain whitespace or '/'",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_code_has_default_length() {
        let code = RandomCodeGenerator::default().generate().unwrap();
        assert_eq!(code.len(), DEFAULT_CODE_LENGTH);
    }

    #[test]
    fn test_generate_code_custom_length() {
        let code = RandomCodeGenerator::new(12).generate().unwrap();
        assert_eq!(code.len(), 12);
    }

    #[test]
    fn test_generate_code_is_alphanumeric() {
        let generator = RandomCodeGenerator::default();
        for _ in 0..100 {
            let code = generator.generate().unwrap();
            assert!(code.chars().all(|c| c.is_ascii_alphanumeric()), "{code}");
        }
    }

    #[test]
    fn test_generate_code_produces_unique_codes() {
        let generator = RandomCodeGenerator::default();
        let codes: HashSet<_> = (0..1000).map(|_| generator.generate().unwrap()).collect();
        assert_eq!(codes.len(), 1000);
    }

    #[test]
    fn test_rejection_threshold() {
        assert_eq!(REJECTION_THRESHOLD, 248);
    }

    #[test]
    fn test_validate_short_code_accepts_generated() {
        let code = RandomCodeGenerator::default().generate().unwrap();
        assert!(validate_short_code(&code).is_ok());
    }

    #[test]
    fn test_validate_short_code_empty() {
        assert!(matches!(
            validate_short_code(""),
            Err(AppError::Validation { .. })
        ));
        assert!(validate_short_code("   ").is_err());
    }

    #[test]
    fn test_validate_short_code_rejects_slash_and_spaces() {
        assert!(validate_short_code("abc/def").is_err());
        assert!(validate_short_code("abc def").is_err());
    }
}
