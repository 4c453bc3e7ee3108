//! Complexity counters derived from a finished symbol list.
use crate::types::{Metrics, Symbol};

/// Build the metrics block. The to-do count is read off `symbols` so it can
/// never disagree with the list it describes.
pub fn aggregate(symbols: &[Symbol], control_blocks: u32) -> Metrics {
    let to_dos = symbols.iter().filter(|s| return matches!(s, Symbol::ToDo(_))).count();
    return Metrics {
        control_blocks,
        to_dos: u32::try_from(to_dos).unwrap_or(u32::MAX),
    };
}
