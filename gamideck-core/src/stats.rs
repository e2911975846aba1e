use crate::Rating;
use serde::Serialize;

/// Per-rating counters for one review session.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub total: u32,
    pub again: u32,
    pub hard: u32,
    pub good: u32,
    pub easy: u32,
}

impl Totals {
    pub fn record(&mut self, r: &Rating) {
        self.total += 1;
        match r {
            Rating::Again => self.again += 1,
            Rating::Hard => self.hard += 1,
            Rating::Good => self.good += 1,
            Rating::Easy => self.easy += 1,
        }
    }

    pub fn accuracy(&self) -> f32 {
        if self.total == 0 {
            0.0
        } else {
            (self.good + self.easy) as f32 / self.total as f32
        }
    }
}
