use std::fmt::{Display, Formatter};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::ringqueue::RingQueue;
use crate::core::stats::QueueStats;

/// Point-in-time record of a queue, written out as one NDJSON line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub label: String, // caller-chosen tag, e.g. the pipeline phase
    pub capacity: usize,
    pub count: usize,
    pub stats: QueueStats,
}

impl Snapshot {
    pub fn capture<T>(label: impl Into<String>, queue: &RingQueue<T>) -> Self {
        Self {
            label: label.into(),
            capacity: queue.capacity(),
            count: queue.count(),
            stats: queue.stats(),
        }
    }
}

impl Display for Snapshot {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Snapshot {{ label: {}, count: {}/{}, inserted: {}, removed: {}, evicted: {}, timeouts: {} }}",
            self.label,
            self.count,
            self.capacity,
            self.stats.inserted,
            self.stats.removed,
            self.stats.evicted,
            self.stats.timeouts,
        )
    }
}

/// Append snapshots to `path`, one JSON object per line.
pub fn append_snapshots(snapshots: &[Snapshot], path: impl AsRef<Path>) -> std::io::Result<()> {
    let mut file = OpenOptions::new().append(true).create(true).open(path)?;

    for snapshot in snapshots {
        let json = serde_json::to_string(snapshot)?;
        writeln!(file, "{json}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn capture_reads_queue_state() {
        let queue = RingQueue::new(2).unwrap();
        queue.insert(1);
        queue.insert(2);
        queue.insert(3);

        let snapshot = Snapshot::capture("full", &queue);
        assert_eq!(snapshot.count, 2);
        assert_eq!(snapshot.capacity, 2);
        assert_eq!(snapshot.stats.evicted, 1);
        assert_eq!(
            snapshot.to_string(),
            "Snapshot { label: full, count: 2/2, inserted: 3, removed: 0, evicted: 1, timeouts: 0 }"
        );
    }

    #[test]
    fn append_writes_one_line_per_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshots.ndjson");

        let queue = RingQueue::new(4).unwrap();
        let first = Snapshot::capture("empty", &queue);
        queue.insert("x");
        let second = Snapshot::capture("one", &queue);

        append_snapshots(&[first.clone()], &path).unwrap();
        append_snapshots(&[second.clone()], &path).unwrap();

        let parsed: Vec<Snapshot> = fs::read_to_string(&path)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(parsed, vec![first, second]);
    }
}
