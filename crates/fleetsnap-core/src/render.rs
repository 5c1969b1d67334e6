//! Snapshot consumer seam

use crate::model::ClusterSnapshot;

/// Receives snapshots as the aggregator completes them
///
/// Formatting lives entirely on this side of the boundary. A snapshot
/// rendered before a later cluster fails stays rendered.
pub trait Renderer {
    fn render(&mut self, snapshot: &ClusterSnapshot) -> std::io::Result<()>;

    /// Called once after the last snapshot of a successful run
    fn finish(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Collects snapshots in memory
impl Renderer for Vec<ClusterSnapshot> {
    fn render(&mut self, snapshot: &ClusterSnapshot) -> std::io::Result<()> {
        self.push(snapshot.clone());
        Ok(())
    }
}
