//! Exact visiting order over a small cost matrix.
//!
//! Every ordering of the destinations is tried (Heap's algorithm, in place)
//! starting from a fixed index, with no return leg. Five destinations make
//! 120 orderings, so exhaustive search is cheap.

use super::matrix::CostMatrix;

/// The winning order and its cost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitOrder {
    /// Point indices in visiting order, beginning with the start.
    pub order: Vec<usize>,

    pub total_secs: u64,
}

impl VisitOrder {
    /// Consecutive `(from, to)` index pairs along the order.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.order.windows(2).map(|w| (w[0], w[1]))
    }
}

/// Calls `visit` with every permutation of `items`, in Heap's order.
///
/// The first call sees `items` unchanged.
pub fn for_each_permutation<T>(items: &mut [T], mut visit: impl FnMut(&[T])) {
    let n = items.len();
    let mut counters = vec![0usize; n];
    visit(items);

    let mut i = 1;
    while i < n {
        if counters[i] < i {
            if i % 2 == 0 {
                items.swap(0, i);
            } else {
                items.swap(counters[i], i);
            }
            visit(items);
            counters[i] += 1;
            i = 1;
        } else {
            counters[i] = 0;
            i += 1;
        }
    }
}

/// Cost of visiting `path` in order, starting from `start`.
pub fn path_cost(matrix: &CostMatrix, start: usize, path: &[usize]) -> u64 {
    let mut total = 0u64;
    let mut prev = start;
    for &next in path {
        total += u64::from(matrix.secs(prev, next));
        prev = next;
    }
    total
}

/// Cheapest order visiting every other point once, starting at `start`.
///
/// Ties keep the first ordering seen. `None` if `start` is out of range.
pub fn best_order(matrix: &CostMatrix, start: usize) -> Option<VisitOrder> {
    if start >= matrix.len() {
        return None;
    }

    let mut rest: Vec<usize> = (0..matrix.len()).filter(|&i| i != start).collect();
    let mut best: Option<VisitOrder> = None;

    for_each_permutation(&mut rest, |path| {
        let total = path_cost(matrix, start, path);
        if best.as_ref().is_none_or(|b| total < b.total_secs) {
            let mut order = Vec::with_capacity(path.len() + 1);
            order.push(start);
            order.extend_from_slice(path);
            best = Some(VisitOrder {
                order,
                total_secs: total,
            });
        }
    });

    best
}
