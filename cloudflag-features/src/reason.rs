//! Evaluation outcomes reported by an evaluation client.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Why an evaluation could not produce a flag value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    ClientNotReady,
    FlagNotFound,
    MalformedFlag,
    UserNotSpecified,
    WrongType,
    Exception,
}

impl ErrorKind {
    /// Wire name, e.g. `FLAG_NOT_FOUND`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::ClientNotReady => "CLIENT_NOT_READY",
            ErrorKind::FlagNotFound => "FLAG_NOT_FOUND",
            ErrorKind::MalformedFlag => "MALFORMED_FLAG",
            ErrorKind::UserNotSpecified => "USER_NOT_SPECIFIED",
            ErrorKind::WrongType => "WRONG_TYPE",
            ErrorKind::Exception => "EXCEPTION",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Reason attached to an evaluation, in the LaunchDarkly JSON shape
/// (`{"kind":"ERROR","errorKind":"EXCEPTION"}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EvaluationReason {
    /// The flag is switched off.
    Off,

    /// No rule matched; the flag's fallthrough was served.
    Fallthrough {
        #[serde(rename = "inExperiment", default, skip_serializing_if = "is_false")]
        in_experiment: bool,
    },

    /// The subject is individually targeted.
    TargetMatch,

    RuleMatch {
        #[serde(rename = "ruleIndex")]
        rule_index: usize,
        #[serde(rename = "ruleId")]
        rule_id: String,
    },

    PrerequisiteFailed {
        #[serde(rename = "prerequisiteKey")]
        prerequisite_key: String,
    },

    /// The client could not evaluate the flag and served the default.
    Error {
        #[serde(rename = "errorKind")]
        error_kind: ErrorKind,
    },
}

impl EvaluationReason {
    pub fn fallthrough() -> Self {
        EvaluationReason::Fallthrough {
            in_experiment: false,
        }
    }

    pub fn error(error_kind: ErrorKind) -> Self {
        EvaluationReason::Error { error_kind }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, EvaluationReason::Error { .. })
    }

    /// The error kind when this reason is an error.
    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            EvaluationReason::Error { error_kind } => Some(*error_kind),
            _ => None,
        }
    }
}

/// Result of a boolean evaluation: the value served, which variation it
/// came from and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationDetail {
    pub value: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variation_index: Option<usize>,
    pub reason: EvaluationReason,
}

impl EvaluationDetail {
    pub fn new(value: bool, variation_index: Option<usize>, reason: EvaluationReason) -> Self {
        Self {
            value,
            variation_index,
            reason,
        }
    }

    /// Detail served when evaluation failed: the default value, no variation.
    pub fn error(default_value: bool, error_kind: ErrorKind) -> Self {
        Self::new(default_value, None, EvaluationReason::error(error_kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_display_uses_wire_name() {
        assert_eq!(ErrorKind::Exception.to_string(), "EXCEPTION");
        assert_eq!(ErrorKind::FlagNotFound.to_string(), "FLAG_NOT_FOUND");
    }

    #[test]
    fn test_error_reason_json_shape() {
        let json = serde_json::to_value(EvaluationReason::error(ErrorKind::Exception)).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "ERROR", "errorKind": "EXCEPTION"}));
    }

    #[test]
    fn test_fallthrough_json_omits_experiment_flag() {
        let json = serde_json::to_value(EvaluationReason::fallthrough()).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "FALLTHROUGH"}));
    }

    #[test]
    fn test_rule_match_from_json() {
        let reason: EvaluationReason = serde_json::from_value(serde_json::json!({
            "kind": "RULE_MATCH",
            "ruleIndex": 2,
            "ruleId": "beta-users"
        }))
        .unwrap();

        assert_eq!(
            reason,
            EvaluationReason::RuleMatch {
                rule_index: 2,
                rule_id: "beta-users".to_string()
            }
        );
        assert!(!reason.is_error());
    }

    #[test]
    fn test_error_kind_accessor() {
        assert_eq!(
            EvaluationReason::error(ErrorKind::WrongType).error_kind(),
            Some(ErrorKind::WrongType)
        );
        assert_eq!(EvaluationReason::Off.error_kind(), None);
    }

    #[test]
    fn test_error_detail_carries_default() {
        let detail = EvaluationDetail::error(true, ErrorKind::ClientNotReady);
        assert!(detail.value);
        assert_eq!(detail.variation_index, None);
        assert!(detail.reason.is_error());
    }
}
