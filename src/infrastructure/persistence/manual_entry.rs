use crate::domain::errors::HistoryError;
use crate::domain::roulette::Outcome;

/// Most numbers accepted in one manual entry
pub const MAX_MANUAL_NUMBERS: usize = 100;

/// Parses whitespace-separated spins typed by hand.
///
/// Tokens that are not plain digits, or fall outside 0-36, are dropped.
/// More than `MAX_MANUAL_NUMBERS` accepted numbers rejects the whole entry.
pub fn parse_manual_numbers(text: &str) -> Result<Vec<u8>, HistoryError> {
    let numbers: Vec<u8> = text
        .split_whitespace()
        .filter(|token| token.chars().all(|c| c.is_ascii_digit()))
        .filter_map(|token| token.parse::<i64>().ok())
        .filter_map(|n| Outcome::new(n).ok())
        .map(|o| o.number())
        .collect();

    if numbers.len() > MAX_MANUAL_NUMBERS {
        return Err(HistoryError::TooManyNumbers {
            count: numbers.len(),
            max: MAX_MANUAL_NUMBERS,
        });
    }
    Ok(numbers)
}
