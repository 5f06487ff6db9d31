use crate::models::Team;
use std::collections::HashMap;

/// Teams keyed by team key, iterated in the order they were first inserted.
#[derive(Debug, Clone, Default)]
pub struct TeamDirectory {
    teams: Vec<Team>,
    index: HashMap<String, usize>,
}

impl TeamDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `team`, replacing a team with the same key in place.
    /// Returns the replaced team, if any.
    pub fn insert(&mut self, team: Team) -> Option<Team> {
        if let Some(&slot) = self.index.get(team.key()) {
            return Some(std::mem::replace(&mut self.teams[slot], team));
        }
        self.index.insert(team.key().to_string(), self.teams.len());
        self.teams.push(team);
        None
    }

    pub fn get(&self, key: &str) -> Option<&Team> {
        self.index.get(key).map(|&slot| &self.teams[slot])
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Team> {
        self.index.get(key).map(|&slot| &mut self.teams[slot])
    }

    pub fn by_number(&self, team_number: u32) -> Option<&Team> {
        self.get(&Team::key_for(team_number))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Team> {
        self.teams.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Team> {
        self.teams.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }
}

impl FromIterator<Team> for TeamDirectory {
    fn from_iter<I: IntoIterator<Item = Team>>(iter: I) -> Self {
        let mut directory = TeamDirectory::new();
        for team in iter {
            directory.insert(team);
        }
        directory
    }
}

impl<'a> IntoIterator for &'a TeamDirectory {
    type Item = &'a Team;
    type IntoIter = std::slice::Iter<'a, Team>;

    fn into_iter(self) -> Self::IntoIter {
        self.teams.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order_is_kept() {
        let directory: TeamDirectory = [973, 254, 1678].into_iter().map(Team::new).collect();
        let keys: Vec<&str> = directory.iter().map(Team::key).collect();
        assert_eq!(keys, vec!["frc973", "frc254", "frc1678"]);
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut directory: TeamDirectory = [1, 2].into_iter().map(Team::new).collect();
        let mut replacement = Team::new(1);
        replacement.set_attr("seen", true);

        assert!(directory.insert(replacement).is_some());
        assert_eq!(directory.len(), 2);
        assert_eq!(directory.iter().next().unwrap().attr("seen").and_then(|v| v.as_bool()), Some(true));
    }

    #[test]
    fn test_lookup_by_number() {
        let directory: TeamDirectory = [254].into_iter().map(Team::new).collect();
        assert_eq!(directory.by_number(254).map(Team::key), Some("frc254"));
        assert!(directory.by_number(1).is_none());
        assert!(directory.get("frc1").is_none());
        assert!(directory.contains("frc254"));
    }
}
