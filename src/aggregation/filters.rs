use crate::models::{AttrValue, Team};
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// Criteria for narrowing the team list. Unset criteria match every team.
///
/// State and country are compared exactly as the service reports them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamFilter {
    pub state: Option<String>,
    pub country: Option<String>,
    pub min_number: Option<u32>,
    pub max_number: Option<u32>,
    /// Keep only teams rostered at this event
    pub event_key: Option<String>,
}

impl TeamFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    pub fn country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn min_number(mut self, min_number: u32) -> Self {
        self.min_number = Some(min_number);
        self
    }

    pub fn max_number(mut self, max_number: u32) -> Self {
        self.max_number = Some(max_number);
        self
    }

    pub fn event_key(mut self, event_key: impl Into<String>) -> Self {
        self.event_key = Some(event_key.into());
        self
    }

    /// Checks everything except event membership, which needs a roster.
    pub fn matches(&self, team: &Team) -> bool {
        let location = team.location();
        self.state
            .as_deref()
            .is_none_or(|state| location.state() == Some(state))
            && self
                .country
                .as_deref()
                .is_none_or(|country| location.country() == Some(country))
            && self.min_number.is_none_or(|min| team.team_number() >= min)
            && self.max_number.is_none_or(|max| team.team_number() <= max)
    }

    /// Filters `teams`, additionally requiring membership in `roster` when one is given.
    pub fn apply<'a, I>(&self, teams: I, roster: Option<&BTreeSet<String>>) -> Vec<&'a Team>
    where
        I: IntoIterator<Item = &'a Team>,
    {
        teams
            .into_iter()
            .filter(|team| self.matches(team))
            .filter(|team| roster.is_none_or(|roster| roster.contains(team.key())))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

/// Orders teams by a numeric attribute. Teams without a numeric value for `key`
/// always come last, in their original order.
pub fn rank_by_attr<'a>(
    teams: impl IntoIterator<Item = &'a Team>,
    key: &str,
    order: SortOrder,
    limit: usize,
) -> Vec<&'a Team> {
    let mut ranked: Vec<(&Team, Option<f64>)> = teams
        .into_iter()
        .map(|team| (team, team.attr(key).and_then(AttrValue::as_f64)))
        .collect();

    ranked.sort_by(|(_, a), (_, b)| match (a, b) {
        (Some(a), Some(b)) => match order {
            SortOrder::Ascending => a.total_cmp(b),
            SortOrder::Descending => b.total_cmp(a),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    ranked.into_iter().take(limit).map(|(team, _)| team).collect()
}
