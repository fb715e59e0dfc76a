use std::sync::{Mutex, PoisonError};

use crate::types::TouchPoint;

/// Accumulates touch points recorded by the host's input path.
///
/// The draw path never reads the live list; it takes a [`snapshot`] once per
/// frame and binds that copy, so input arriving mid-frame only affects the
/// next frame.
///
/// [`snapshot`]: TouchLog::snapshot
#[derive(Debug, Default)]
pub struct TouchLog {
    points: Mutex<Vec<TouchPoint>>,
}

impl TouchLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a point to the log.
    pub fn record(&self, point: TouchPoint) {
        self.lock().push(point);
    }

    /// Copies the current list, leaving the log untouched.
    pub fn snapshot(&self) -> Vec<TouchPoint> {
        self.lock().clone()
    }

    /// Drops every recorded point.
    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<TouchPoint>> {
        self.points.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_of_empty_log_is_empty() {
        let log = TouchLog::new();
        assert!(log.snapshot().is_empty());
    }

    #[test]
    fn snapshot_is_isolated_from_later_records() {
        let log = TouchLog::new();
        log.record(TouchPoint { x: 1.0, y: 2.0 });

        let snapshot = log.snapshot();
        log.record(TouchPoint { x: 3.0, y: 4.0 });
        log.clear();

        assert_eq!(snapshot, vec![TouchPoint { x: 1.0, y: 2.0 }]);
    }

    #[test]
    fn records_accumulate_in_order() {
        let log = TouchLog::new();
        log.record(TouchPoint { x: 1.0, y: 1.0 });
        log.record(TouchPoint { x: 2.0, y: 2.0 });

        let snapshot = log.snapshot();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[1], TouchPoint { x: 2.0, y: 2.0 });
    }

    #[test]
    fn clear_empties_the_log() {
        let log = TouchLog::new();
        log.record(TouchPoint { x: 1.0, y: 1.0 });
        log.clear();
        assert!(log.snapshot().is_empty());
    }
}
