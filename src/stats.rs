//! Operation counters
//!
//! Comparisons and links are the two cost measures used when analysing
//! self-adjusting heaps, so every forest keeps a running tally of both.

use std::fmt;
use std::ops::{Add, Sub};

/// Running totals of priority comparisons and link operations
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    /// Number of times two priorities were compared
    pub comparisons: u64,
    /// Number of times one tree was attached below another
    pub links: u64,
}

impl Stats {
    /// Total cost, counting a comparison and a link as one unit each
    pub fn total(&self) -> u64 {
        self.comparisons + self.links
    }
}

impl Add for Stats {
    type Output = Stats;

    fn add(self, rhs: Stats) -> Stats {
        Stats {
            comparisons: self.comparisons + rhs.comparisons,
            links: self.links + rhs.links,
        }
    }
}

impl Sub for Stats {
    type Output = Stats;

    fn sub(self, rhs: Stats) -> Stats {
        Stats {
            comparisons: self.comparisons.saturating_sub(rhs.comparisons),
            links: self.links.saturating_sub(rhs.links),
        }
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} comparisons, {} links", self.comparisons, self.links)
    }
}
