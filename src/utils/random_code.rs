use rand::Rng;

const DIGITS: &[u8] = b"0123456789";

/// Numeric one-time code of `len` digits, leading zeros allowed
pub fn generate_numeric_code(len: usize) -> String {
    let mut rng = rand::rng();
    (0..len.max(1))
        .map(|_| DIGITS[rng.random_range(0..DIGITS.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_have_requested_length_and_only_digits() {
        for len in [4, 6, 8] {
            let code = generate_numeric_code(len);
            assert_eq!(code.len(), len);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }
}
