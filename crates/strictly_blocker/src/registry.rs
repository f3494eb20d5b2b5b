//! Obstacle registry: a fixed-size arena of obstacle positions.
//!
//! Slot indices are stable for the lifetime of the registry. There is no
//! insertion or removal of slots; "removing" an obstacle parks it on
//! [`Coord::SENTINEL`].

use super::types::Coord;
use serde::Serialize;
use tracing::{debug, instrument, warn};

/// Stable identity of an obstacle (its slot index).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, derive_more::Display,
)]
#[display("obstacle #{_0}")]
pub struct ObstacleId(usize);

impl ObstacleId {
    /// Returns the slot index.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Storage for every obstacle's current position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ObstacleRegistry {
    slots: Box<[Coord]>,
}

impl ObstacleRegistry {
    /// Creates a registry with one slot per initial position, in order.
    #[instrument(skip(positions))]
    pub fn new(positions: impl IntoIterator<Item = Coord>) -> Self {
        let slots: Box<[Coord]> = positions.into_iter().collect();
        debug!(count = slots.len(), "Obstacle registry created");
        Self { slots }
    }

    /// Number of slots (active or removed).
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if the registry has no slots at all.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns the id for slot `index`, if such a slot exists.
    pub fn id(&self, index: usize) -> Option<ObstacleId> {
        (index < self.slots.len()).then_some(ObstacleId(index))
    }

    /// Returns the first obstacle (lowest index) sitting on `(x, y)`.
    ///
    /// Removed obstacles never match, because the sentinel is never a
    /// coordinate anyone asks about on the grid.
    pub fn find_obstacle_at(&self, x: i32, y: i32) -> Option<ObstacleId> {
        self.find_at(Coord::new(x, y))
    }

    /// Coordinate form of [`ObstacleRegistry::find_obstacle_at`].
    pub fn find_at(&self, at: Coord) -> Option<ObstacleId> {
        if at.is_sentinel() {
            return None;
        }
        self.slots.iter().position(|slot| *slot == at).map(ObstacleId)
    }

    /// Current position of an obstacle.
    pub fn position(&self, id: ObstacleId) -> Option<Coord> {
        self.slots.get(id.0).copied()
    }

    /// Returns true if the obstacle has been removed from play.
    pub fn is_removed(&self, id: ObstacleId) -> bool {
        self.position(id).is_some_and(Coord::is_sentinel)
    }

    /// Overwrites an obstacle's position.
    ///
    /// No bounds or collision checks happen here; the caller validates.
    /// An id from another, larger registry is ignored (and asserts in
    /// debug builds).
    #[instrument(skip(self))]
    pub fn set_obstacle_position(&mut self, id: ObstacleId, x: i32, y: i32) {
        match self.slots.get_mut(id.0) {
            Some(slot) => *slot = Coord::new(x, y),
            None => {
                warn!(%id, len = self.slots.len(), "Write to unknown obstacle slot ignored");
                debug_assert!(false, "{id} is not a slot of this registry");
            }
        }
    }

    /// Parks an obstacle on the sentinel, taking it out of play for good.
    #[instrument(skip(self))]
    pub fn remove_from_play(&mut self, id: ObstacleId) {
        self.set_obstacle_position(id, Coord::SENTINEL.x, Coord::SENTINEL.y);
        debug!(%id, "Obstacle removed from play");
    }

    /// All obstacles in slot order, including removed ones.
    pub fn iter(&self) -> impl Iterator<Item = (ObstacleId, Coord)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .map(|(index, at)| (ObstacleId(index), *at))
    }

    /// Obstacles still in play, in slot order.
    pub fn active(&self) -> impl Iterator<Item = (ObstacleId, Coord)> + '_ {
        self.iter().filter(|(_, at)| !at.is_sentinel())
    }

    /// Number of obstacles parked on the sentinel.
    pub fn removed_count(&self) -> usize {
        self.slots.iter().filter(|at| at.is_sentinel()).count()
    }

    /// Raw positions in slot order.
    pub fn positions(&self) -> &[Coord] {
        &self.slots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> ObstacleRegistry {
        ObstacleRegistry::new([Coord::new(1, 1), Coord::new(2, 4)])
    }

    #[test]
    fn test_find_returns_matching_slot() {
        let reg = registry();
        assert_eq!(reg.find_obstacle_at(1, 1), reg.id(0));
        assert_eq!(reg.find_obstacle_at(2, 4), reg.id(1));
        assert_eq!(reg.find_obstacle_at(3, 3), None);
    }

    #[test]
    fn test_find_prefers_lowest_index() {
        let reg = ObstacleRegistry::new([Coord::new(0, 0), Coord::new(5, 5), Coord::new(5, 5)]);
        assert_eq!(reg.find_at(Coord::new(5, 5)), reg.id(1));
    }

    #[test]
    fn test_set_position_is_unchecked() {
        let mut reg = registry();
        let id = reg.id(0).unwrap();
        reg.set_obstacle_position(id, 40, 40);
        assert_eq!(reg.position(id), Some(Coord::new(40, 40)));
        assert_eq!(reg.find_obstacle_at(1, 1), None);
    }

    #[test]
    fn test_removed_obstacle_never_found() {
        let mut reg = registry();
        let id = reg.id(1).unwrap();
        reg.remove_from_play(id);
        assert!(reg.is_removed(id));
        assert_eq!(reg.position(id), Some(Coord::SENTINEL));
        assert_eq!(reg.find_at(Coord::SENTINEL), None);
        assert_eq!(reg.find_obstacle_at(2, 4), None);
        assert_eq!(reg.removed_count(), 1);
        assert_eq!(reg.active().count(), 1);
    }

    #[test]
    fn test_id_out_of_range() {
        let reg = registry();
        assert!(reg.id(2).is_none());
        assert_eq!(reg.len(), 2);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "is not a slot of this registry")]
    fn test_foreign_id_asserts_in_debug() {
        let big = ObstacleRegistry::new([Coord::new(0, 0); 3]);
        let foreign = big.id(2).unwrap();
        let mut small = registry();
        small.set_obstacle_position(foreign, 0, 0);
    }
}
