//! Prompt audience

use serde::{Deserialize, Serialize};

/// Who the generated prompt is written for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Restaurant operator looking for actionable improvements
    #[default]
    Owner,
    /// Prospective customer deciding whether to visit
    Consumer,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::Owner, Role::Consumer];

    /// Label shown in the role selector
    pub fn label(&self) -> &'static str {
        match self {
            Role::Owner => "식당주인용",
            Role::Consumer => "고객용",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Owner => write!(f, "owner"),
            Role::Consumer => write!(f, "consumer"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "owner" | "식당주인용" | "주인" => Ok(Role::Owner),
            "consumer" | "customer" | "고객용" | "고객" => Ok(Role::Consumer),
            _ => Err(format!(
                "Unknown role: {}. Valid values: owner, consumer",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse() {
        assert_eq!("owner".parse::<Role>().unwrap(), Role::Owner);
        assert_eq!("식당주인용".parse::<Role>().unwrap(), Role::Owner);
        assert_eq!("고객용".parse::<Role>().unwrap(), Role::Consumer);
        assert_eq!("Customer".parse::<Role>().unwrap(), Role::Consumer);
        assert!("admin".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_display_roundtrip() {
        for role in Role::ALL {
            assert_eq!(role.to_string().parse::<Role>().unwrap(), role);
        }
    }
}
