//! Payment reference generation.

use rand::Rng;

use crate::domain::foundation::Timestamp;

pub const MEMBERSHIP_REFERENCE_PREFIX: &str = "membership";
pub const PURCHASE_REFERENCE_PREFIX: &str = "purchase";

const TOKEN_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const TOKEN_LEN: usize = 11;

/// Builds `{prefix}_{unix_millis}_{token}`.
///
/// The token is random base-36, so uniqueness is probabilistic. The database
/// enforces it with a unique index on purchase references.
pub fn generate_reference(prefix: &str) -> String {
    let mut rng = rand::rng();
    let token: String = (0..TOKEN_LEN)
        .map(|_| TOKEN_ALPHABET[rng.random_range(0..TOKEN_ALPHABET.len())] as char)
        .collect();
    format!("{}_{}_{}", prefix, Timestamp::now().as_unix_millis(), token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn reference_has_three_parts() {
        let reference = generate_reference(PURCHASE_REFERENCE_PREFIX);
        let parts: Vec<&str> = reference.splitn(3, '_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "purchase");
        assert!(parts[1].parse::<i64>().unwrap() > 0);
        assert_eq!(parts[2].len(), TOKEN_LEN);
    }

    #[test]
    fn consecutive_references_differ() {
        let a = generate_reference(MEMBERSHIP_REFERENCE_PREFIX);
        let b = generate_reference(MEMBERSHIP_REFERENCE_PREFIX);
        assert_ne!(a, b);
    }

    proptest! {
        #[test]
        fn token_is_lowercase_base36(prefix in "[a-z]{1,12}") {
            let reference = generate_reference(&prefix);
            let expected_prefix = format!("{}_", prefix);
            prop_assert!(reference.starts_with(&expected_prefix));
            let token = reference.rsplit('_').next().unwrap();
            prop_assert_eq!(token.len(), TOKEN_LEN);
            prop_assert!(token.bytes().all(|b| TOKEN_ALPHABET.contains(&b)));
        }
    }
}
