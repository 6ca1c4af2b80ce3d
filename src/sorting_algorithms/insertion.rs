use crate::sorting_algorithms::{Mark, SortChart};

/// Insertion sort as a step machine: one comparison per call, and at most one
/// adjacent swap. `cursor` is the position being inserted, `scan` walks it
/// left until the slot to its left no longer exceeds it.
pub struct InsertionSort {
    cursor: usize,
    scan: usize,
    started: bool,
}

impl InsertionSort {
    pub fn new() -> Self {
        InsertionSort {
            cursor: 1,
            scan: 1,
            started: false,
        }
    }

    pub fn reset(&mut self) {
        self.cursor = 1;
        self.scan = 1;
        self.started = false;
    }

    pub fn begin(&mut self) {
        self.started = true;
    }

    pub fn is_done(&self, chart: &SortChart) -> bool {
        self.cursor >= chart.len()
    }

    pub fn advance(&mut self, chart: &mut SortChart) {
        if !self.started || self.is_done(chart) {
            return;
        }
        chart.clear_marks();
        chart.mark_range(0, self.cursor, Mark::Sorted);

        if chart.values[self.scan - 1] > chart.values[self.scan] {
            chart.swap(self.scan - 1, self.scan);
            self.scan -= 1;
            if self.scan == 0 {
                self.cursor += 1;
                self.scan = self.cursor;
            }
        } else {
            chart.set_mark(self.scan, Mark::Compare);
            self.cursor += 1;
            self.scan = self.cursor;
        }
        if self.is_done(chart) {
            chart.clear_marks();
            chart.mark_range(0, chart.len(), Mark::Sorted);
            chart.quiet();
        }
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
    fn ten_advances_sort_the_known_sequence() {
        let mut chart = chart_with(vec![5, 3, 4, 1, 2]);
        let mut sort = InsertionSort::new();
        sort.begin();
        for _ in 0..10 {
            sort.advance(&mut chart);
        }
        assert_eq!(chart.values, vec![1, 2, 3, 4, 5]);
        assert!(sort.is_done(&chart));
    }

    #[test]
    fn completion_is_idempotent() {
        let mut chart = chart_with(vec![5, 3, 4, 1, 2]);
        let mut sort = InsertionSort::new();
        sort.begin();
        for _ in 0..50 {
            sort.advance(&mut chart);
        }
        assert_eq!(chart.values, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn idle_until_begun() {
        let mut chart = chart_with(vec![2, 1]);
        let mut sort = InsertionSort::new();
        sort.advance(&mut chart);
        assert_eq!(chart.values, vec![2, 1]);
        sort.begin();
        sort.advance(&mut chart);
        assert_eq!(chart.values, vec![1, 2]);
    }

    #[test]
    fn one_swap_at_most_per_call() {
        let mut chart = chart_with(vec![4, 3, 2, 1]);
        let mut sort = InsertionSort::new();
        sort.begin();
        while !sort.is_done(&chart) {
            let before = chart.values.clone();
            sort.advance(&mut chart);
            let moved = before
                .iter()
                .zip(chart.values.iter())
                .filter(|(a, b)| a != b)
                .count();
            assert!(moved <= 2);
        }
        assert!(chart.is_sorted());
    }
}
