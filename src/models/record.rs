use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// Result of a single finished match from one team's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Loss,
    Tie,
}

/// Wins / losses / ties tally for a team within some scope (one event, one season, all time).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Record {
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
}

impl Record {
    pub const fn new(wins: u32, losses: u32, ties: u32) -> Self {
        Self { wins, losses, ties }
    }

    /// Increments exactly one of the three counters.
    pub fn tally(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Loss => self.losses += 1,
            Outcome::Tie => self.ties += 1,
        }
    }

    pub fn matches_played(&self) -> u32 {
        self.wins + self.losses + self.ties
    }

    /// Fraction of played matches that were won, ties counted as half a win.
    /// Returns `None` when no matches were played.
    pub fn win_rate(&self) -> Option<f64> {
        let played = self.matches_played();
        if played == 0 {
            return None;
        }
        Some((f64::from(self.wins) + f64::from(self.ties) * 0.5) / f64::from(played))
    }

    pub fn as_tuple(&self) -> (u32, u32, u32) {
        (self.wins, self.losses, self.ties)
    }
}

impl Add for Record {
    type Output = Record;

    fn add(self, rhs: Record) -> Record {
        Record {
            wins: self.wins + rhs.wins,
            losses: self.losses + rhs.losses,
            ties: self.ties + rhs.ties,
        }
    }
}

impl AddAssign for Record {
    fn add_assign(&mut self, rhs: Record) {
        *self = *self + rhs;
    }
}

impl Sum for Record {
    fn sum<I: Iterator<Item = Record>>(iter: I) -> Record {
        iter.fold(Record::default(), Add::add)
    }
}

impl<'a> Sum<&'a Record> for Record {
    fn sum<I: Iterator<Item = &'a Record>>(iter: I) -> Record {
        iter.copied().sum()
    }
}

impl From<(u32, u32, u32)> for Record {
    fn from((wins, losses, ties): (u32, u32, u32)) -> Self {
        Record::new(wins, losses, ties)
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.wins, self.losses, self.ties)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tally_increments_single_counter() {
        let mut record = Record::default();
        record.tally(Outcome::Win);
        record.tally(Outcome::Win);
        record.tally(Outcome::Loss);
        record.tally(Outcome::Tie);
        assert_eq!(record, Record::new(2, 1, 1));
        assert_eq!(record.matches_played(), 4);
    }

    #[test]
    fn test_sum_is_componentwise() {
        let records = [Record::new(3, 1, 0), Record::new(0, 2, 1), Record::new(5, 0, 2)];
        let total: Record = records.iter().sum();
        assert_eq!(total, Record::new(8, 3, 3));

        let empty: Record = std::iter::empty::<Record>().sum();
        assert_eq!(empty, Record::default());
    }

    #[test]
    fn test_win_rate() {
        assert_eq!(Record::default().win_rate(), None);
        assert_eq!(Record::new(3, 1, 0).win_rate(), Some(0.75));
        assert_eq!(Record::new(1, 0, 2).win_rate(), Some(2.0 / 3.0));
    }

    #[test]
    fn test_display_format() {
        assert_eq!(Record::new(10, 2, 1).to_string(), "10-2-1");
        assert_eq!(Record::from((1, 0, 0)).as_tuple(), (1, 0, 0));
    }
}
