//! Id-ordered character storage.

use crate::character::{Character, EntityId, Team};
use crate::geometry::Point;

/// Characters kept sorted by id, so iteration order is spawn order.
#[derive(Debug, Default)]
pub struct Roster {
    characters: Vec<Character>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a character. Ids are handed out in increasing order, so the
    /// vector stays sorted.
    pub(crate) fn push(&mut self, character: Character) {
        debug_assert!(
            self.characters
                .last()
                .is_none_or(|last| last.id() < character.id())
        );
        self.characters.push(character);
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    pub fn index_of(&self, id: EntityId) -> Option<usize> {
        self.characters
            .binary_search_by_key(&id, Character::id)
            .ok()
    }

    pub fn get(&self, id: EntityId) -> Option<&Character> {
        self.index_of(id).map(|index| &self.characters[index])
    }

    pub(crate) fn get_mut(&mut self, id: EntityId) -> Option<&mut Character> {
        self.index_of(id).map(|index| &mut self.characters[index])
    }

    pub(crate) fn at(&self, index: usize) -> &Character {
        &self.characters[index]
    }

    pub(crate) fn at_mut(&mut self, index: usize) -> &mut Character {
        &mut self.characters[index]
    }

    /// Two distinct characters borrowed mutably at once.
    pub(crate) fn pair_mut(&mut self, first: usize, second: usize) -> Option<(&mut Character, &mut Character)> {
        if first == second || first.max(second) >= self.characters.len() {
            return None;
        }
        if first < second {
            let (head, tail) = self.characters.split_at_mut(second);
            Some((&mut head[first], &mut tail[0]))
        } else {
            let (head, tail) = self.characters.split_at_mut(first);
            Some((&mut tail[0], &mut head[second]))
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Character> {
        self.characters.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Character> {
        self.characters.iter_mut()
    }

    /// Living members of `team`, in id order.
    pub fn team(&self, team: Team) -> impl Iterator<Item = &Character> {
        self.living().filter(move |character| character.team() == team)
    }

    pub fn living(&self) -> impl Iterator<Item = &Character> {
        self.characters.iter().filter(|character| character.is_alive())
    }

    /// Positions of living members of `team`, for target selection.
    pub fn candidates(&self, team: Team) -> Vec<(EntityId, Point)> {
        self.team(team)
            .map(|character| (character.id(), character.position()))
            .collect()
    }

    /// Closest living member of `team` to `from`, first in id order on ties.
    pub fn nearest(&self, from: Point, team: Team) -> Option<&Character> {
        self.team(team).fold(None, |best: Option<&Character>, character| match best {
            Some(best) if best.position().distance(from) <= character.position().distance(from) => Some(best),
            _ => Some(character),
        })
    }

    /// Drops dead characters and returns their ids.
    pub(crate) fn reap(&mut self) -> Vec<EntityId> {
        let dead: Vec<EntityId> = self
            .characters
            .iter()
            .filter(|character| !character.is_alive())
            .map(Character::id)
            .collect();
        if !dead.is_empty() {
            self.characters.retain(Character::is_alive);
        }
        dead
    }
}
