/*
 * Closedness Violations
 */

use serde::{Deserialize, Serialize};

/// First non-closed type found while verifying a copy parameter
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClosednessViolation {
    /// The parameter's own type is extensible
    RootNotClosed { type_name: String },

    /// A top-level member's type (or its element type) is extensible
    MemberNotClosed { member: String, type_name: String },

    /// A type deeper in the graph is extensible; reported against the
    /// parameter, with the member path that reaches it
    TransitiveNotClosed { path: String, type_name: String },
}

impl ClosednessViolation {
    pub fn type_name(&self) -> &str {
        match self {
            ClosednessViolation::RootNotClosed { type_name }
            | ClosednessViolation::MemberNotClosed { type_name, .. }
            | ClosednessViolation::TransitiveNotClosed { type_name, .. } => type_name,
        }
    }

    /// Single descriptive string used as the finding's message argument
    pub fn describe(&self) -> String {
        match self {
            ClosednessViolation::RootNotClosed { type_name } => {
                format!("parameter type '{}' must be closed", type_name)
            }
            ClosednessViolation::MemberNotClosed { member, type_name } => {
                format!("type '{}' of member '{}' must be closed", type_name, member)
            }
            ClosednessViolation::TransitiveNotClosed { path, type_name } => {
                format!(
                    "type '{}' reachable through '{}' must be closed",
                    type_name, path
                )
            }
        }
    }
}

impl std::fmt::Display for ClosednessViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.describe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_variants() {
        let root = ClosednessViolation::RootNotClosed {
            type_name: "Foo".to_string(),
        };
        assert_eq!(root.describe(), "parameter type 'Foo' must be closed");

        let member = ClosednessViolation::MemberNotClosed {
            member: "Child".to_string(),
            type_name: "Node".to_string(),
        };
        assert_eq!(member.describe(), "type 'Node' of member 'Child' must be closed");

        let deep = ClosednessViolation::TransitiveNotClosed {
            path: "I.Shape".to_string(),
            type_name: "Shape".to_string(),
        };
        assert!(deep.to_string().contains("through 'I.Shape'"));
        assert_eq!(deep.type_name(), "Shape");
    }
}
