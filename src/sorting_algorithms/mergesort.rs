use crate::sequence::Sequence;
use crate::sorting_algorithms::{Mark, SortChart};

/// One in-progress merge of two adjacent sorted runs. The halves are copied
/// into the buffers when the merge starts; placements drain them back into
/// the chart one slot per call. At most one of these is alive at a time.
struct MergeRun {
    left: Sequence<i32>,
    right: Sequence<i32>,
    write: usize,
}

/// Bottom-up iterative merge sort. `width` is the current run length (doubles
/// after each full pass), `offset` the left edge of the pair being merged.
pub struct MergeSort {
    width: usize,
    offset: usize,
    run: Option<MergeRun>,
    started: bool,
}

impl MergeSort {
    pub fn new() -> Self {
        MergeSort {
            width: 1,
            offset: 0,
            run: None,
            started: false,
        }
    }

    pub fn reset(&mut self) {
        self.width = 1;
        self.offset = 0;
        self.run = None;
        self.started = false;
    }

    pub fn begin(&mut self) {
        self.started = true;
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn is_done(&self, chart: &SortChart) -> bool {
        self.started && self.width >= chart.len()
    }

    pub fn advance(&mut self, chart: &mut SortChart) {
        if !self.started || self.width >= chart.len() {
            return;
        }

        if self.run.is_some() {
            self.place_one(chart);
        } else {
            self.load_or_turn(chart);
        }

        if self.is_done(chart) {
            chart.clear_marks();
            chart.mark_range(0, chart.len(), Mark::Sorted);
            chart.quiet();
        }
    }

    /// Either loads the next pair of runs into a fresh MergeRun, or, when the
    /// offset has walked past the last pair, ends the pass: double the width,
    /// rewind the offset.
    fn load_or_turn(&mut self, chart: &mut SortChart) {
        let len = chart.len();
        if self.offset + self.width >= len {
            self.width *= 2;
            self.offset = 0;
            return;
        }
        let left = self.offset;
        let mid = left + self.width;
        let right = usize::min(mid + self.width, len);

        let mut run = MergeRun {
            left: Sequence::new(),
            right: Sequence::new(),
            write: left,
        };
        for &v in &chart.values[left..mid] {
            run.left.insert_at_end(v);
        }
        for &v in &chart.values[mid..right] {
            run.right.insert_at_end(v);
        }
        chart.clear_marks();
        chart.mark_range(left, mid, Mark::LeftRun);
        chart.mark_range(mid, right, Mark::RightRun);
        self.run = Some(run);
    }

    /// One placement: the smaller buffer head (left wins ties) goes into the
    /// next destination slot; an exhausted side just drains the other.
    fn place_one(&mut self, chart: &mut SortChart) {
        let finished = if let Some(run) = self.run.as_mut() {
            let take_left = match (run.left.front(), run.right.front()) {
                (Some(&l), Some(&r)) => l <= r,
                (Some(_), None) => true,
                _ => false,
            };
            let value = if take_left {
                run.left.pop_front()
            } else {
                run.right.pop_front()
            };
            if let Some(value) = value {
                chart.place(run.write, value);
                run.write += 1;
            }
            run.left.is_empty() && run.right.is_empty()
        } else {
            false
        };

        if finished {
            self.run = None;
            self.offset += 2 * self.width;
        }
    }
}
