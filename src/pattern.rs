// Pattern generation
// Counts and lazily enumerates the cartesian product of per-position
// equivalence classes

/// Hard ceiling on the number of patterns a single query may expand into
pub const COMBINATION_LIMIT: u64 = 5000;

/// Product of class sizes, without materializing anything.
///
/// An empty class makes the whole product 0, never 1 — a query position that
/// can match nothing must not silently degrade into matching everything.
/// Saturates instead of overflowing; any saturated value is far above the
/// ceiling anyway. O(number of classes).
pub fn possible_combination_count(classes: &[Vec<String>]) -> u64 {
    let mut product: u64 = 1;
    for class in classes {
        if class.is_empty() {
            return 0;
        }
        product = product.saturating_mul(class.len() as u64);
    }
    product
}

/// Lazy cartesian-product enumerator over equivalence classes
///
/// Yields one concrete pattern string per combination, in lexicographic
/// order of class-index tuples (the last position varies fastest). The order
/// is a contract: the search engine's "first matching pattern wins" rule
/// depends on it being reproducible.
///
/// Callers must run the combination bound check first; this type trusts that
/// the product is small.
pub struct PatternGenerator<'a> {
    classes: &'a [Vec<String>],
    cursor: Vec<usize>,
    done: bool,
}

impl<'a> PatternGenerator<'a> {
    pub fn new(classes: &'a [Vec<String>]) -> Self {
        // No positions, or a position with no candidates: nothing to yield
        let done = classes.is_empty() || classes.iter().any(|c| c.is_empty());
        Self {
            classes,
            cursor: vec![0; classes.len()],
            done,
        }
    }
}

impl Iterator for PatternGenerator<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.done {
            return None;
        }

        let pattern: String = self
            .cursor
            .iter()
            .zip(self.classes)
            .map(|(&i, class)| class[i].as_str())
            .collect();

        // Odometer increment, last position fastest
        for pos in (0..self.cursor.len()).rev() {
            self.cursor[pos] += 1;
            if self.cursor[pos] < self.classes[pos].len() {
                return Some(pattern);
            }
            self.cursor[pos] = 0;
        }
        self.done = true;
        Some(pattern)
    }
}
