use crate::provider::AllianceInfo;

/// Where a playoff alliance ended up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AllianceStatus {
    Won,
    Eliminated,
    Active,
    #[default]
    Unknown,
}

impl AllianceStatus {
    /// Reads the `{"status": "..."}` object attached to an alliance.
    /// Absent or malformed payloads are `Unknown`.
    pub fn from_payload(payload: Option<&serde_json::Value>) -> Self {
        let status = payload
            .and_then(|value| value.as_object())
            .and_then(|object| object.get("status"))
            .and_then(|status| status.as_str());

        match status {
            Some("won") => AllianceStatus::Won,
            Some("eliminated") => AllianceStatus::Eliminated,
            Some("playing" | "active") => AllianceStatus::Active,
            _ => AllianceStatus::Unknown,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alliance {
    event_key: String,
    name: Option<String>,
    team_keys: Vec<String>,
    status: AllianceStatus,
}

impl Alliance {
    pub fn from_info(event_key: &str, info: &AllianceInfo) -> Self {
        Self {
            event_key: event_key.to_string(),
            name: info.name.clone(),
            team_keys: info.picks.clone(),
            status: AllianceStatus::from_payload(info.status.as_ref()),
        }
    }

    pub fn event_key(&self) -> &str {
        &self.event_key
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Team keys in seed order, captain first
    pub fn team_keys(&self) -> &[String] {
        &self.team_keys
    }

    pub fn status(&self) -> AllianceStatus {
        self.status
    }

    pub fn won_event(&self) -> bool {
        self.status == AllianceStatus::Won
    }

    pub fn contains(&self, team_key: &str) -> bool {
        self.team_keys.iter().any(|key| key == team_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing_utils::TestDataBuilder;
    use serde_json::json;

    #[test]
    fn test_won_alliance() {
        let info = TestDataBuilder::alliance(&["frc254", "frc1678", "frc971"], Some("won"));
        let alliance = Alliance::from_info("2024cala", &info);

        assert!(alliance.won_event());
        assert_eq!(alliance.event_key(), "2024cala");
        assert_eq!(alliance.team_keys()[0], "frc254");
        assert!(alliance.contains("frc971"));
        assert!(!alliance.contains("frc1"));
    }

    #[test]
    fn test_missing_status_is_unknown() {
        let info = TestDataBuilder::alliance(&["frc1", "frc2"], None);
        let alliance = Alliance::from_info("2024cala", &info);

        assert_eq!(alliance.status(), AllianceStatus::Unknown);
        assert!(!alliance.won_event());
    }

    #[test]
    fn test_malformed_status_is_unknown() {
        assert_eq!(
            AllianceStatus::from_payload(Some(&json!("won"))),
            AllianceStatus::Unknown
        );
        assert_eq!(
            AllianceStatus::from_payload(Some(&json!({ "level": "f" }))),
            AllianceStatus::Unknown
        );
        assert_eq!(
            AllianceStatus::from_payload(Some(&json!({ "status": 3 }))),
            AllianceStatus::Unknown
        );
    }

    #[test]
    fn test_known_statuses() {
        assert_eq!(
            AllianceStatus::from_payload(Some(&json!({ "status": "eliminated" }))),
            AllianceStatus::Eliminated
        );
        assert_eq!(
            AllianceStatus::from_payload(Some(&json!({ "status": "playing" }))),
            AllianceStatus::Active
        );
    }
}
