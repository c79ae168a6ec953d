//! Classification of digit bytes under the A=1 .. Z=26 letter code.

/// Any ASCII decimal digit.
pub fn is_digit(byte: u8) -> bool {
    byte.is_ascii_digit()
}

/// A digit that may open a message: '1'..='9'.
pub fn is_leading_digit(byte: u8) -> bool {
    matches!(byte, b'1'..=b'9')
}

/// Whether `previous` followed by `current` is ambiguous: read either as one two-digit code
/// (11..=19, 21..=26) or as two single-digit codes.
///
/// 10 and 20 are not ambiguous since '0' has no code of its own, and 27..=29 can only be read
/// as two single codes.
pub fn forms_ambiguous_pair(previous: u8, current: u8) -> bool {
    match previous {
        b'1' => matches!(current, b'1'..=b'9'),
        b'2' => matches!(current, b'1'..=b'6'),
        _ => false,
    }
}

/// Whether a '0' may follow `previous`, forming 10 or 20.
pub fn accepts_zero(previous: u8) -> bool {
    matches!(previous, b'1' | b'2')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(code: &str) -> bool {
        let bytes = code.as_bytes();
        forms_ambiguous_pair(bytes[0], bytes[1])
    }

    #[test]
    fn digits() {
        for b in b'0'..=b'9' {
            assert!(is_digit(b));
        }
        for b in [b'/', b':', b'a', b' ', b'\n', 0u8, 0xff] {
            assert!(!is_digit(b), "{b:#04x} is not a digit");
        }
    }

    #[test]
    fn leading_digits() {
        assert!(!is_leading_digit(b'0'));
        for b in b'1'..=b'9' {
            assert!(is_leading_digit(b));
        }
        assert!(!is_leading_digit(b'x'));
    }

    #[test]
    fn teens_are_ambiguous() {
        for code in ["11", "12", "13", "14", "15", "16", "17", "18", "19"] {
            assert!(pair(code), "{code} should be ambiguous");
        }
    }

    #[test]
    fn twenties_up_to_26_are_ambiguous() {
        for code in ["21", "22", "23", "24", "25", "26"] {
            assert!(pair(code), "{code} should be ambiguous");
        }
    }

    #[test]
    fn twenty_seven_to_twenty_nine_are_two_codes() {
        for code in ["27", "28", "29"] {
            assert!(!pair(code), "{code} can only be read as two codes");
        }
    }

    #[test]
    fn tens_with_zero_are_not_ambiguous() {
        assert!(!pair("10"));
        assert!(!pair("20"));
    }

    #[test]
    fn higher_leading_digits_never_pair() {
        for previous in b'3'..=b'9' {
            for current in b'0'..=b'9' {
                assert!(!forms_ambiguous_pair(previous, current));
            }
        }
        for current in b'0'..=b'9' {
            assert!(!forms_ambiguous_pair(b'0', current));
        }
    }

    #[test]
    fn zero_attaches_only_to_one_and_two() {
        assert!(accepts_zero(b'1'));
        assert!(accepts_zero(b'2'));
        for previous in [b'0', b'3', b'4', b'5', b'6', b'7', b'8', b'9'] {
            assert!(!accepts_zero(previous));
        }
    }
}
