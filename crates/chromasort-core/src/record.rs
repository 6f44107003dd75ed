//! Structured export records for handing levels to packaging tools.

use serde::{Deserialize, Serialize};

use crate::{
    Color, Container, ContainerId, Difficulty, Level, ModelError, PuzzleState, StarThresholds,
};

/// A serializable snapshot of a [`Level`].
///
/// Converting back with [`TryFrom`] runs the same checks as building a level
/// directly, so records read from disk cannot smuggle malformed data in.
///
/// # Examples
///
/// ```
/// use chromasort_core::{Difficulty, Level, LevelRecord, PuzzleState};
///
/// let state: PuzzleState = "2:RB 2:BR 2:".parse()?;
/// let level = Level::new("forest-001", "Forest 1", Difficulty::Easy, state)?;
/// let record = LevelRecord::from(&level);
/// assert_eq!(record.containers.len(), 3);
/// assert_eq!(Level::try_from(record)?, level);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelRecord {
    /// Level id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Declared difficulty tier.
    pub difficulty: Difficulty,
    /// Optional description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Optional move limit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub move_limit: Option<u32>,
    /// Optional star thresholds; exactly three ascending values when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub star_thresholds: Option<Vec<u32>>,
    /// Containers in puzzle order.
    pub containers: Vec<ContainerRecord>,
}

/// A serializable snapshot of a [`Container`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerRecord {
    /// Container id.
    pub id: ContainerId,
    /// Capacity in units.
    pub capacity: usize,
    /// Colors, bottom first.
    pub colors: Vec<Color>,
}

impl From<&Container> for ContainerRecord {
    fn from(container: &Container) -> Self {
        Self {
            id: container.id(),
            capacity: container.capacity(),
            colors: container.units().to_vec(),
        }
    }
}

impl TryFrom<ContainerRecord> for Container {
    type Error = ModelError;

    fn try_from(record: ContainerRecord) -> Result<Self, Self::Error> {
        Self::with_units(record.id, record.capacity, record.colors)
    }
}

impl From<&Level> for LevelRecord {
    fn from(level: &Level) -> Self {
        Self {
            id: level.id().to_owned(),
            name: level.name().to_owned(),
            difficulty: level.difficulty(),
            description: level.description().map(str::to_owned),
            move_limit: level.move_limit(),
            star_thresholds: level.star_thresholds().map(|t| t.values().to_vec()),
            containers: level
                .initial_state()
                .containers()
                .iter()
                .map(ContainerRecord::from)
                .collect(),
        }
    }
}

impl TryFrom<LevelRecord> for Level {
    type Error = ModelError;

    fn try_from(record: LevelRecord) -> Result<Self, Self::Error> {
        let containers = record
            .containers
            .into_iter()
            .map(Container::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        let state = PuzzleState::new(containers)?;
        let mut level = Level::new(record.id, record.name, record.difficulty, state)?;
        if let Some(limit) = record.move_limit {
            level = level.with_move_limit(limit)?;
        }
        if let Some(description) = record.description {
            level = level.with_description(description);
        }
        if let Some(thresholds) = record.star_thresholds {
            level = level.with_star_thresholds(StarThresholds::try_from(thresholds.as_slice())?);
        }
        Ok(level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_level() -> Level {
        let state: PuzzleState = "3:RBR 3:BRB 3:".parse().unwrap();
        Level::new("ocean-001", "Ocean 1", Difficulty::Medium, state)
            .unwrap()
            .with_move_limit(20)
            .unwrap()
            .with_description("two colors")
            .with_star_thresholds(StarThresholds::new([5, 7, 9]).unwrap())
    }

    #[test]
    fn test_json_shape() {
        let record = LevelRecord::from(&sample_level());
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["id"], "ocean-001");
        assert_eq!(json["difficulty"], "medium");
        assert_eq!(json["move_limit"], 20);
        assert_eq!(json["star_thresholds"], serde_json::json!([5, 7, 9]));
        assert_eq!(
            json["containers"][0],
            serde_json::json!({"id": 0, "capacity": 3, "colors": ["red", "blue", "red"]})
        );
        assert_eq!(json["containers"][2]["colors"], serde_json::json!([]));
    }

    #[test]
    fn test_optional_fields_are_omitted() {
        let state: PuzzleState = "1:R 1:".parse().unwrap();
        let level = Level::new("x", "X", Difficulty::Easy, state).unwrap();
        let json = serde_json::to_value(LevelRecord::from(&level)).unwrap();
        assert!(json.get("move_limit").is_none());
        assert!(json.get("description").is_none());
        assert!(json.get("star_thresholds").is_none());
    }

    #[test]
    fn test_round_trip_through_json() {
        let level = sample_level();
        let json = serde_json::to_string(&LevelRecord::from(&level)).unwrap();
        let record: LevelRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(Level::try_from(record).unwrap(), level);
    }

    #[test]
    fn test_rejects_malformed_records() {
        let mut record = LevelRecord::from(&sample_level());
        record.star_thresholds = Some(vec![1, 2]);
        assert_eq!(
            Level::try_from(record),
            Err(ModelError::StarThresholdCount { len: 2 })
        );

        let mut record = LevelRecord::from(&sample_level());
        record.containers[0].capacity = 0;
        assert!(matches!(
            Level::try_from(record),
            Err(ModelError::ZeroCapacity { .. })
        ));

        let mut record = LevelRecord::from(&sample_level());
        record.containers.clear();
        assert_eq!(Level::try_from(record), Err(ModelError::EmptyPuzzle));
    }
}
