use num_bigint::BigUint;
use num_traits::{One, Zero};
use tracing::debug;

/// Memoized table of arbitrary-precision Fibonacci numbers.
///
/// Index `i` holds F(i), with F(0) = 0 and F(1) = 1 present from construction. The table grows
/// lazily up to the highest index ever requested and never shrinks; once an entry is computed
/// it is never recomputed or modified.
///
/// Growing the table needs `&mut self`, so a single table cannot be extended from several
/// threads at once. Parallel callers give each worker its own table.
///
/// # Example
/// ```
/// use decode_combinations::fibonacci::FibonacciTable;
/// use num_bigint::BigUint;
/// let mut table = FibonacciTable::new();
/// assert_eq!(*table.fib(100), BigUint::parse_bytes(b"354224848179261915075", 10).unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct FibonacciTable {
    values: Vec<BigUint>,
}

impl FibonacciTable {
    pub fn new() -> Self {
        Self {
            values: vec![BigUint::zero(), BigUint::one()], // F(0), F(1)
        }
    }

    /// Returns F(`n`), extending the table from its current frontier if needed.
    pub fn fib(&mut self, n: usize) -> &BigUint {
        if n >= self.values.len() {
            self.extend_to(n);
        }
        &self.values[n]
    }

    /// Returns F(`n`) only if it has already been computed.
    pub fn get(&self, n: usize) -> Option<&BigUint> {
        self.values.get(n)
    }

    /// Highest index currently cached. Always at least 1.
    pub fn highest_index(&self) -> usize {
        self.values.len() - 1
    }

    // Iteratively append F(frontier)..=F(n), each the sum of the two entries before it
    fn extend_to(&mut self, n: usize) {
        let frontier = self.values.len();
        self.values.reserve(n + 1 - frontier);

        for i in frontier..=n {
            let next = &self.values[i - 1] + &self.values[i - 2];
            self.values.push(next);
        }

        debug!(from = frontier, to = n, "extended fibonacci table");
    }
}

impl Default for FibonacciTable {
    fn default() -> Self {
        Self::new()
    }
}
