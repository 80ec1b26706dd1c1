//! Customer-facing order and tracking numbers.
//!
//! Both are a fixed prefix followed by random uppercase base-36 characters.
//! Nothing checks for collisions: with 36^9 order suffixes a demo session
//! will not see one, but uniqueness is probabilistic only.

use rand::Rng;

const BASE36: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

pub const ORDER_NUMBER_PREFIX: &str = "SG";
pub const ORDER_NUMBER_SUFFIX_LEN: usize = 9;

pub const TRACKING_NUMBER_PREFIX: &str = "TRK";
pub const TRACKING_NUMBER_SUFFIX_LEN: usize = 12;

/// `len` random characters from `[0-9A-Z]`.
pub fn random_base36<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| BASE36[rng.random_range(0..BASE36.len())] as char)
        .collect()
}

/// e.g. `SG4K7Q1ZP0M`
pub fn order_number() -> String {
    let mut rng = rand::rng();
    format!(
        "{}{}",
        ORDER_NUMBER_PREFIX,
        random_base36(&mut rng, ORDER_NUMBER_SUFFIX_LEN)
    )
}

/// e.g. `TRK8XN2B7Q0LC5D`
pub fn tracking_number() -> String {
    let mut rng = rand::rng();
    format!(
        "{}{}",
        TRACKING_NUMBER_PREFIX,
        random_base36(&mut rng, TRACKING_NUMBER_SUFFIX_LEN)
    )
}

/// Canonical form of a user-typed order number.
pub fn normalize_order_number(input: &str) -> String {
    input.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_base36_upper(s: &str) -> bool {
        s.chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase())
    }

    #[test]
    fn test_order_number_shape() {
        let number = order_number();
        assert_eq!(number.len(), 11);
        assert!(number.starts_with("SG"));
        assert!(is_base36_upper(&number[2..]));
    }

    #[test]
    fn test_tracking_number_shape() {
        let number = tracking_number();
        assert_eq!(number.len(), 15);
        assert!(number.starts_with("TRK"));
        assert!(is_base36_upper(&number[3..]));
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize_order_number("  sgab12cd34x \n"), "SGAB12CD34X");
    }
}
