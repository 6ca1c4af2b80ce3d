use crate::audio::Signal;
use crate::sequence::Sequence;
use colored::Colorize;
use rand::Rng;
use std::sync::mpsc::Sender;

#[derive(Debug)]
pub enum ChartError {
    TooSmall(usize),
    FlatHeight(i32),
}

impl std::fmt::Display for ChartError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooSmall(n) => write!(f, "a sort chart needs at least 2 bars, got {}", n),
            Self::FlatHeight(h) => write!(f, "bar height must be positive, got {}", h),
        }
    }
}

impl std::error::Error for ChartError {}

/// Semantic state of one chart slot. Display code maps these to colors;
/// the step machines only ever record what a slot currently *is*.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    Plain,
    Compare,
    Swap,
    Pivot,
    Sorted,
    LeftRun,
    RightRun,
}

/// The shared value array every sort steps over, plus per-slot marks and the
/// optional tone sender. Owns no algorithm state of its own.
pub struct SortChart {
    pub values: Vec<i32>,
    marks: Vec<Mark>,
    max_height: i32,
    audio: Option<Sender<Signal>>,
}

impl SortChart {
    pub fn new(
        len: usize,
        max_height: i32,
        audio: Option<Sender<Signal>>,
    ) -> Result<Self, ChartError> {
        if len < 2 {
            return Err(ChartError::TooSmall(len));
        }
        if max_height < 1 {
            return Err(ChartError::FlatHeight(max_height));
        }
        let mut rng = rand::thread_rng();
        let values = (0..len).map(|_| rng.gen_range(1..=max_height)).collect();
        Ok(SortChart {
            values,
            marks: vec![Mark::Plain; len],
            max_height,
            audio,
        })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Fisher and Yates' method, drawn through a temporary sequence: pick a
    /// random survivor, append it to the reshuffled list, remove it from the
    /// pool. The multiset of values is unchanged.
    pub fn randomize(&mut self) {
        let mut rng = rand::thread_rng();
        let mut pool: Sequence<i32> = Sequence::new();
        for &v in &self.values {
            pool.insert_at_end(v);
        }
        let mut shuffled = Vec::with_capacity(self.values.len());
        while !pool.is_empty() {
            let k = rng.gen_range(0..pool.len());
            if let Some(&v) = pool.item_at(k) {
                pool.delete_item(&v);
                shuffled.push(v);
            }
        }
        self.values = shuffled;
        self.clear_marks();
    }

    /// Swaps two slots, marks them, and sounds the incoming values.
    pub fn swap(&mut self, i: usize, j: usize) {
        self.values.swap(i, j);
        self.marks[i] = Mark::Swap;
        self.marks[j] = Mark::Swap;
        self.tone(self.values[i]);
    }

    /// Overwrites one slot (merge placement) and marks it.
    pub fn place(&mut self, i: usize, value: i32) {
        self.values[i] = value;
        self.marks[i] = Mark::Swap;
        self.tone(value);
    }

    pub fn set_mark(&mut self, i: usize, mark: Mark) {
        self.marks[i] = mark;
    }

    pub fn mark_range(&mut self, lo: usize, hi: usize, mark: Mark) {
        for m in &mut self.marks[lo..hi] {
            *m = mark;
        }
    }

    pub fn clear_marks(&mut self) {
        for m in &mut self.marks {
            *m = Mark::Plain;
        }
    }

    pub fn is_sorted(&self) -> bool {
        self.values.windows(2).all(|w| w[0] <= w[1])
    }

    fn tone(&self, value: i32) {
        if let Some(ref sender) = self.audio {
            let frequency = 880.0 * (value as f32 / self.max_height as f32);
            sender.send(Signal::Tone(frequency)).unwrap_or_default();
        }
    }

    pub fn quiet(&self) {
        if let Some(ref sender) = self.audio {
            sender.send(Signal::Tone(0.0)).unwrap_or_default();
        }
    }

    /// Renders the bar chart into one string buffer: home the cursor, draw
    /// every row, print in a single call so the frame never flickers.
    pub fn render(&self, title: &str) -> String {
        let mut buffer = String::new();
        buffer.push_str("\x1B[?25l");
        buffer.push_str("\x1B[H");
        buffer.push_str("\x1B[J");
        buffer.push_str(&format!("{}\n", title));

        for y in 0..self.max_height {
            let floor = self.max_height - y;
            for (x, &val) in self.values.iter().enumerate() {
                let symbol = if val >= floor { "[]" } else { "  " };
                let styled = match self.marks[x] {
                    Mark::Plain => symbol.white(),
                    Mark::Compare => symbol.cyan(),
                    Mark::Swap => symbol.bright_yellow(),
                    Mark::Pivot => symbol.red().on_truecolor(128, 128, 128),
                    Mark::Sorted => symbol.green(),
                    Mark::LeftRun => symbol.on_truecolor(140, 140, 140),
                    Mark::RightRun => symbol.on_truecolor(180, 180, 180),
                };
                buffer += &format!("{}", styled);
            }
            buffer.push('\n');
        }
        buffer.push_str("\x1B[?25h");
        buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn randomize_conserves_multiset() {
        let mut chart = SortChart::new(32, 20, None).unwrap();
        let mut before = chart.values.clone();
        chart.randomize();
        let mut after = chart.values.clone();
        before.sort_unstable();
        after.sort_unstable();
        assert_eq!(before, after);
    }

    #[test]
    fn rejects_degenerate_sizes() {
        assert!(SortChart::new(1, 20, None).is_err());
        assert!(SortChart::new(8, 0, None).is_err());
    }

    #[test]
    fn swap_marks_both_slots() {
        let mut chart = SortChart::new(4, 10, None).unwrap();
        chart.values = vec![4, 3, 2, 1];
        chart.swap(0, 3);
        assert_eq!(chart.values, vec![1, 3, 2, 4]);
        assert_eq!(chart.marks[0], Mark::Swap);
        assert_eq!(chart.marks[3], Mark::Swap);
    }
}
