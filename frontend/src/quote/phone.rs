/// Digits in a full mobile number: two for the area code, nine for the line.
pub const PHONE_DIGITS: usize = 11;

pub const PHONE_PLACEHOLDER: &str = "(XX) XXXXX-XXXX";

/// Applies the `(XX) XXXXX-XXXX` mask to whatever the user typed.
///
/// Non-digits are dropped and anything past eleven digits is ignored, so the
/// function is safe to run on every keystroke and on its own output.
pub fn format_phone(raw: &str) -> String {
    let digits: Vec<char> = raw
        .chars()
        .filter(|c| c.is_ascii_digit())
        .take(PHONE_DIGITS)
        .collect();

    let mut masked = String::with_capacity(PHONE_PLACEHOLDER.len());
    for (i, digit) in digits.iter().enumerate() {
        match i {
            0 => masked.push('('),
            2 => masked.push_str(") "),
            7 => masked.push('-'),
            _ => {}
        }
        masked.push(*digit);
    }
    masked
}
