use crate::sequence::Sequence;
use crate::sorting_algorithms::{Mark, SortChart};

/// Iterative quicksort: the recursion is an explicit stack of pending
/// (low, high) ranges, so one call never does more than one partition.
/// A range is only ever stacked when it holds at least two elements.
pub struct QuickSort {
    pending: Sequence<(usize, usize)>,
    started: bool,
}

impl QuickSort {
    pub fn new() -> Self {
        QuickSort {
            pending: Sequence::new(),
            started: false,
        }
    }

    pub fn reset(&mut self) {
        self.pending.clear();
        self.started = false;
    }

    pub fn begin(&mut self, chart: &SortChart) {
        self.pending.clear();
        if chart.len() > 1 {
            self.pending.insert_at_end((0, chart.len() - 1));
        }
        self.started = true;
    }

    pub fn is_done(&self) -> bool {
        self.started && self.pending.is_empty()
    }

    pub fn pending_ranges(&self) -> &Sequence<(usize, usize)> {
        &self.pending
    }

    pub fn advance(&mut self, chart: &mut SortChart) {
        if !self.started {
            return;
        }
        let (low, high) = match self.pending.pop_back() {
            Some(range) => range,
            None => return,
        };
        chart.clear_marks();

        let pivot_index = self.partition(chart, low, high);

        if pivot_index > low + 1 {
            self.pending.insert_at_end((low, pivot_index - 1));
        }
        if pivot_index + 1 < high {
            self.pending.insert_at_end((pivot_index + 1, high));
        }
        if self.is_done() {
            chart.clear_marks();
            chart.mark_range(0, chart.len(), Mark::Sorted);
            chart.quiet();
        }
    }

    /// Lomuto partition around the last element: everything at most the pivot
    /// is swapped left, then the pivot lands between the halves.
    fn partition(&mut self, chart: &mut SortChart, low: usize, high: usize) -> usize {
        let pivot = chart.values[high];
        chart.set_mark(high, Mark::Pivot);
        let mut i = low;
        for j in low..high {
            if chart.values[j] <= pivot {
                if i != j {
                    chart.swap(i, j);
                } else {
                    chart.set_mark(j, Mark::Compare);
                }
                i += 1;
            }
        }
        if i != high {
            chart.swap(i, high);
        }
        i
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chart_with(values: Vec<i32>) -> SortChart {
        let mut chart = SortChart::new(values.len(), 10, None).unwrap();
        chart.values = values;
        chart
    }

    #[test]
    fn sorts_to_completion() {
        let mut chart = chart_with(vec![7, 2, 9, 1, 8, 3, 6, 4]);
        let mut sort = QuickSort::new();
        sort.begin(&chart);
        while !sort.is_done() {
            sort.advance(&mut chart);
        }
        assert_eq!(chart.values, vec![1, 2, 3, 4, 6, 7, 8, 9]);
    }

    #[test]
    fn stack_never_holds_trivial_ranges() {
        let mut chart = chart_with(vec![5, 9, 2, 8, 1, 7, 3, 6, 4, 0]);
        let mut sort = QuickSort::new();
        sort.begin(&chart);
        while !sort.is_done() {
            for k in 0..sort.pending_ranges().len() {
                let &(lo, hi) = sort.pending_ranges().item_at(k).unwrap();
                assert!(hi > lo);
            }
            sort.advance(&mut chart);
        }
        assert!(chart.is_sorted());
    }

    #[test]
    fn duplicates_sort_correctly() {
        let mut chart = chart_with(vec![3, 1, 3, 2, 3, 1]);
        let mut sort = QuickSort::new();
        sort.begin(&chart);
        for _ in 0..100 {
            sort.advance(&mut chart);
        }
        assert!(sort.is_done());
        assert_eq!(chart.values, vec![1, 1, 2, 3, 3, 3]);
    }

    #[test]
    fn stack_empty_only_at_completion() {
        let mut chart = chart_with(vec![4, 3, 2, 1, 0, 5, 9, 7]);
        let mut sort = QuickSort::new();
        sort.begin(&chart);
        while !sort.is_done() {
            sort.advance(&mut chart);
            if !sort.is_done() {
                assert!(!sort.pending_ranges().is_empty());
            }
        }
        assert!(chart.is_sorted());
        sort.advance(&mut chart);
        assert!(chart.is_sorted());
    }
}
