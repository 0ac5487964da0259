/// Acknowledged-block accounting for one file upload.
///
/// Percentages are rounded to the nearest integer but held at 99 until
/// the final block is acknowledged, so 100 is only ever reported for a
/// fully uploaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockProgress {
    acknowledged: u64,
    total: u64,
}

impl BlockProgress {
    /// Starts tracking a file of `total` blocks.
    pub fn new(total: u64) -> Self {
        Self {
            acknowledged: 0,
            total,
        }
    }

    /// Records one more acknowledged block and returns the new percentage.
    pub fn acknowledge(&mut self) -> u8 {
        if self.acknowledged < self.total {
            self.acknowledged += 1;
        }
        self.percent()
    }

    /// Blocks acknowledged so far.
    pub fn acknowledged(&self) -> u64 {
        self.acknowledged
    }

    /// Blocks in the file.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Whether every block has been acknowledged.
    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.acknowledged == self.total
    }

    /// `round(acknowledged / total * 100)`, capped at 99 while incomplete.
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        if self.is_complete() {
            return 100;
        }
        // Round half up in integer arithmetic.
        let rounded = (self.acknowledged * 200 + self.total) / (self.total * 2);
        rounded.min(99) as u8
    }
}
