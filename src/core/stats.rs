use std::f64::consts::PI;

use super::models::{
    Application,
    ApplicationStatus,
};

pub const RING_RADIUS: f64 = 80.0;

pub fn ring_circumference() -> f64 {
    2.0 * PI * RING_RADIUS
}

/// One visible slice of the status ring, in the ring's length units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSegment {
    pub status: ApplicationStatus,
    pub length: f64,
    pub offset: f64,
}

impl ArcSegment {
    /// Start and sweep as fractions of a full turn.
    pub fn turns(&self) -> (f64, f64) {
        let circumference = ring_circumference();
        (self.offset / circumference, self.length / circumference)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusStats {
    counts: [usize; 4],
    total: usize,
}

impl StatusStats {
    pub fn from_rows(rows: &[Application]) -> Self {
        let mut counts = [0usize; 4];
        for row in rows {
            counts[row.status.index()] += 1;
        }
        Self { counts, total: rows.len() }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn count(&self, status: ApplicationStatus) -> usize {
        self.counts[status.index()]
    }

    pub fn fraction(&self, status: ApplicationStatus) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.count(status) as f64 / self.total as f64
    }

    pub fn arc_length(&self, status: ApplicationStatus) -> f64 {
        self.fraction(status) * ring_circumference()
    }

    /// Segments in fixed status order, each starting where the previous ended.
    /// Statuses with no rows produce no segment.
    pub fn arcs(&self) -> Vec<ArcSegment> {
        let mut offset = 0.0;
        let mut arcs = Vec::new();

        for status in ApplicationStatus::ALL {
            let length = self.arc_length(status);
            if self.count(status) > 0 {
                arcs.push(ArcSegment { status, length, offset });
            }
            offset += length;
        }

        arcs
    }
}
