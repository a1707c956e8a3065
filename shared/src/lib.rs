use serde::{Deserialize, Serialize};

pub const MIN_PLAYERS: usize = 3;
pub const IMPOSTER_SECRET: &str = "You are the Imposter";
pub const CATEGORY_EXTENSION: &str = "csv";
pub const HEADER_MARKER: &str = "answer";

pub const MSG_NOT_ENOUGH_PLAYERS: &str = "Need at least 3 players.";
pub const MSG_NO_CATEGORY: &str = "No category selected.";
pub const MSG_EMPTY_CATEGORY: &str = "Category is empty or missing.";
pub const MSG_INVALID_BODY: &str = "Invalid JSON body.";

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Imposter,
    Civilian,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct PlayerAssignment {
    pub player: String,
    pub role: Role,
    pub secret_word: String,
}

impl PlayerAssignment {
    pub fn imposter(player: String) -> Self {
        Self {
            player,
            role: Role::Imposter,
            secret_word: IMPOSTER_SECRET.to_string(),
        }
    }

    pub fn civilian(player: String, word: &str) -> Self {
        Self {
            player,
            role: Role::Civilian,
            secret_word: word.to_string(),
        }
    }

    pub fn is_imposter(&self) -> bool {
        self.role == Role::Imposter
    }
}

/// Body of a setup request. Both fields fall back to empty values when absent.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct SetupRequest {
    #[serde(default)]
    pub players: Vec<String>,
    #[serde(default)]
    pub category: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SetupResponse {
    pub queue: Vec<PlayerAssignment>,
    pub starter: String,
}

impl SetupResponse {
    pub fn imposters(&self) -> impl Iterator<Item = &PlayerAssignment> {
        self.queue.iter().filter(|a| a.is_imposter())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_role_wire_names() {
        assert_eq!(serde_json::to_value(Role::Imposter).unwrap(), json!("IMPOSTER"));
        assert_eq!(serde_json::to_value(Role::Civilian).unwrap(), json!("CIVILIAN"));
    }

    #[test]
    fn test_imposter_assignment() {
        let assignment = PlayerAssignment::imposter("Ana".to_string());
        assert!(assignment.is_imposter());
        assert_eq!(assignment.secret_word, IMPOSTER_SECRET);
    }

    #[test]
    fn test_civilian_assignment() {
        let assignment = PlayerAssignment::civilian("Ben".to_string(), "Apple");
        assert!(!assignment.is_imposter());
        assert_eq!(assignment.role, Role::Civilian);
        assert_eq!(assignment.secret_word, "Apple");
    }

    #[test]
    fn test_setup_response_shape() {
        let response = SetupResponse {
            queue: vec![
                PlayerAssignment::civilian("A".to_string(), "Dog"),
                PlayerAssignment::imposter("B".to_string()),
            ],
            starter: "A".to_string(),
        };

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(
            value,
            json!({
                "queue": [
                    {"player": "A", "role": "CIVILIAN", "secret_word": "Dog"},
                    {"player": "B", "role": "IMPOSTER", "secret_word": "You are the Imposter"}
                ],
                "starter": "A"
            })
        );
        assert_eq!(response.imposters().count(), 1);
    }

    #[test]
    fn test_setup_request_defaults() {
        let request: SetupRequest = serde_json::from_str("{}").unwrap();
        assert!(request.players.is_empty());
        assert!(request.category.is_empty());

        let request: SetupRequest =
            serde_json::from_str(r#"{"players": ["a", "b", "c"], "category": "Animals"}"#)
                .unwrap();
        assert_eq!(request.players.len(), MIN_PLAYERS);
        assert_eq!(request.category, "Animals");
    }

    #[test]
    fn test_error_response_shape() {
        let body = ErrorResponse::new(MSG_NO_CATEGORY);
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"error": "No category selected."})
        );
    }
}
