use std::collections::HashMap;

use chromasort_core::{Fingerprint, Level};
use serde::Serialize;

/// Levels whose initial states have the same layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateGroup {
    /// Shared fingerprint of the initial states.
    pub fingerprint: Fingerprint,
    /// Ids of the duplicated levels, in input order.
    pub level_ids: Vec<String>,
}

/// Groups levels with structurally identical initial states.
///
/// Container order is significant: permuted containers are not duplicates.
/// Only groups of two or more are returned, ordered by the position of their
/// first member.
///
/// # Examples
///
/// ```
/// use chromasort_core::{Difficulty, Level, PuzzleState};
/// use chromasort_qa::find_duplicates;
///
/// let state: PuzzleState = "2:RB 2:BR 2:".parse()?;
/// let levels = [
///     Level::new("a", "A", Difficulty::Easy, state.clone())?,
///     Level::new("b", "B", Difficulty::Hard, state)?,
/// ];
/// let groups = find_duplicates(&levels);
/// assert_eq!(groups.len(), 1);
/// assert_eq!(groups[0].level_ids, ["a", "b"]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[must_use]
pub fn find_duplicates(levels: &[Level]) -> Vec<DuplicateGroup> {
    let mut index_of: HashMap<Fingerprint, usize> = HashMap::new();
    let mut groups: Vec<DuplicateGroup> = Vec::new();

    for level in levels {
        let fingerprint = level.initial_state().fingerprint();
        let index = *index_of.entry(fingerprint.clone()).or_insert_with(|| {
            groups.push(DuplicateGroup {
                fingerprint,
                level_ids: Vec::new(),
            });
            groups.len() - 1
        });
        groups[index].level_ids.push(level.id().to_owned());
    }

    groups.retain(|group| group.level_ids.len() > 1);
    for group in &groups {
        log::debug!("duplicate layout {}: {:?}", group.fingerprint, group.level_ids);
    }
    groups
}
