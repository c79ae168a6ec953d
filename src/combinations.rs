use num_bigint::BigUint;
use num_traits::One;
use tracing::{debug, trace};

use crate::codes::{accepts_zero, forms_ambiguous_pair, is_digit, is_leading_digit};
use crate::fibonacci::FibonacciTable;

/// Reasons a message cannot be decoded at all.
///
/// Positions are zero-based byte offsets into the message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StructuralError {
    #[error("message is empty")]
    Empty,
    #[error("message starts with 0")]
    LeadingZero,
    #[error("message starts with non-digit byte {byte:#04x}")]
    LeadingNonDigit { byte: u8 },
    #[error("encountered non-digit byte {byte:#04x} at pos. {position}")]
    EmbeddedNonDigit { position: usize, byte: u8 },
    #[error("encountered 0 which can not be attached to {previous} at pos. {position}")]
    InvalidZeroAttachment { position: usize, previous: char },
}

/// Counts the ways `message` can be read as a sequence of letter codes 1..=26.
///
/// The message is scanned once. Consecutive ambiguous pairs (11..=19, 21..=26) form a cluster;
/// a cluster of `k` pairs can be segmented in F(k + 2) ways and clusters are independent, so the
/// count is the product of one Fibonacci factor per cluster. A '0' binds the digit before it
/// into a forced 10 or 20, which removes that digit from the open cluster.
///
/// The table is shared across calls and grows as longer clusters are seen.
///
/// # Example
/// ```
/// use decode_combinations::combinations::count_combinations;
/// use decode_combinations::fibonacci::FibonacciTable;
/// use num_bigint::BigUint;
/// let mut table = FibonacciTable::new();
/// // "bbf", "bz", "vf"
/// assert_eq!(count_combinations(b"226", &mut table).unwrap(), BigUint::from(3u32));
/// ```
pub fn count_combinations(
    message: &[u8],
    table: &mut FibonacciTable,
) -> Result<BigUint, StructuralError> {
    let (&first, rest) = message.split_first().ok_or(StructuralError::Empty)?;

    if first == b'0' {
        return Err(StructuralError::LeadingZero);
    } else if !is_leading_digit(first) {
        return Err(StructuralError::LeadingNonDigit { byte: first });
    }

    let mut combinations = BigUint::one();
    let mut cluster = 0usize;
    let mut previous = first;

    for (offset, &current) in rest.iter().enumerate() {
        let position = offset + 1;

        if !is_digit(current) {
            return Err(StructuralError::EmbeddedNonDigit {
                position,
                byte: current,
            });
        }

        if current == b'0' {
            if !accepts_zero(previous) {
                return Err(StructuralError::InvalidZeroAttachment {
                    position,
                    previous: char::from(previous),
                });
            }
            // The digit before the zero is taken by the forced 10/20
            if cluster > 0 {
                close_cluster(&mut combinations, table, cluster - 1);
                cluster = 0;
            }
        } else if forms_ambiguous_pair(previous, current) {
            cluster += 1;
        } else if cluster > 0 {
            close_cluster(&mut combinations, table, cluster);
            cluster = 0;
        }

        previous = current;
    }

    if cluster > 0 {
        close_cluster(&mut combinations, table, cluster);
    }

    debug!(
        len = message.len(),
        bits = combinations.bits(),
        "counted combinations"
    );
    Ok(combinations)
}

/// Counts `message` with a fresh Fibonacci table that is dropped afterwards.
pub fn count(message: &[u8]) -> Result<BigUint, StructuralError> {
    count_combinations(message, &mut FibonacciTable::new())
}

fn close_cluster(combinations: &mut BigUint, table: &mut FibonacciTable, pairs: usize) {
    trace!(pairs, "closing cluster");
    *combinations *= table.fib(pairs + 2);
}

/// A counter that owns its Fibonacci table for the lifetime of the value.
///
/// Useful when many messages are counted in a row: the table built for earlier messages is
/// reused for later ones.
#[derive(Debug, Default)]
pub struct CombinationCounter {
    table: FibonacciTable,
}

impl CombinationCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&mut self, message: &[u8]) -> Result<BigUint, StructuralError> {
        count_combinations(message, &mut self.table)
    }

    pub fn table(&self) -> &FibonacciTable {
        &self.table
    }
}
