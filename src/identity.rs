use serde::Serialize;

use crate::config::IdentityConfig;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub user_id: String,
    pub email: String,
    pub roll_number: String,
}

impl Identity {
    pub fn from_config(config: &IdentityConfig) -> Self {
        Self {
            user_id: build_user_id(&config.full_name, &config.dob_ddmmyyyy),
            email: config.email.clone(),
            roll_number: config.roll_number.clone(),
        }
    }
}

/// `john_doe_17091999` style identifier: the trimmed, lowercased name with
/// each whitespace character turned into `_`, then the DOB's digits.
pub fn build_user_id(full_name: &str, dob: &str) -> String {
    let name: String = full_name
        .trim()
        .to_lowercase()
        .chars()
        .map(|ch| if ch.is_whitespace() { '_' } else { ch })
        .collect();
    let digits: String = dob.chars().filter(|ch| ch.is_ascii_digit()).collect();

    format!("{name}_{digits}")
}
