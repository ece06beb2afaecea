//! Candle moderation lifecycle.
//!
//! ```text
//!            submit
//!              |
//!              v
//!          Pending --approve--> Approved --report--> Reported
//!              |                  |   ^                |  |
//!            delete             delete +----approve----+  |
//!              v                  v                       |
//!           Deleted <----------------------delete---------+
//! ```
//!
//! [`transition`] is the only place the legal edges are defined. Both
//! moderation surfaces (admin panel and chat buttons) go through it, so the
//! wording shown to moderators cannot drift between them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::candle::CandleStatus;
use crate::error::CoreError;

/// Something that can happen to an existing candle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModerationEvent {
    Approve,
    Delete,
    Report,
}

impl ModerationEvent {
    pub fn as_str(self) -> &'static str {
        match self {
            ModerationEvent::Approve => "approve",
            ModerationEvent::Delete => "delete",
            ModerationEvent::Report => "report",
        }
    }
}

impl fmt::Display for ModerationEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Action accepted by the admin panel. `reject` is a delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminAction {
    Approve,
    Reject,
}

/// Valid values for the admin `action` field.
pub const VALID_ADMIN_ACTIONS: &[&str] = &["approve", "reject"];

impl AdminAction {
    pub fn event(self) -> ModerationEvent {
        match self {
            AdminAction::Approve => ModerationEvent::Approve,
            AdminAction::Reject => ModerationEvent::Delete,
        }
    }
}

impl FromStr for AdminAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approve" => Ok(AdminAction::Approve),
            "reject" => Ok(AdminAction::Reject),
            other => Err(format!(
                "Invalid action '{other}'. Must be one of: {}",
                VALID_ADMIN_ACTIONS.join(", ")
            )),
        }
    }
}

/// Where a moderation decision came from. Recorded in the activity log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModerationSource {
    AdminPanel,
    ChatCallback,
    Viewer,
}

impl ModerationSource {
    pub fn as_str(self) -> &'static str {
        match self {
            ModerationSource::AdminPanel => "admin_panel",
            ModerationSource::ChatCallback => "chat_callback",
            ModerationSource::Viewer => "viewer",
        }
    }
}

/// Store mutation required by a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Set status to `Approved` and stamp `approved_at`.
    Approve,
    /// Remove the record.
    Delete,
    /// Set status to `Reported` and post an urgent prompt.
    Report,
}

/// A legal move through the lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: CandleStatus,
    pub event: ModerationEvent,
    /// `None` means the candle no longer exists afterwards.
    pub to: Option<CandleStatus>,
    pub effect: Effect,
}

impl Transition {
    /// Whether the candle was under a viewer report when this was decided.
    pub fn resolves_report(&self) -> bool {
        self.from == CandleStatus::Reported && self.event != ModerationEvent::Report
    }

    /// Whether a report arrives while an earlier report prompt is still open.
    ///
    /// That prompt must be closed before the new one is posted, so a candle
    /// never has two prompts with live buttons.
    pub fn supersedes_report(&self) -> bool {
        self.from == CandleStatus::Reported && self.effect == Effect::Report
    }

    /// Status name returned to callers; `"Deleted"` for removals.
    pub fn outcome_label(&self) -> &'static str {
        match self.to {
            Some(status) => status.as_str(),
            None => "Deleted",
        }
    }

    /// Line appended to the moderation prompt once the decision is applied.
    ///
    /// Report transitions post a fresh prompt instead of resolving one.
    pub fn resolution_text(&self) -> Option<&'static str> {
        match (self.resolves_report(), self.effect) {
            (_, Effect::Report) => None,
            (true, Effect::Approve) => Some("Report resolved: approved"),
            (true, Effect::Delete) => Some("Report resolved: deleted"),
            (false, Effect::Approve) => Some("Approved"),
            (false, Effect::Delete) => Some("Deleted"),
        }
    }
}

/// Decide whether `event` may be applied to a candle currently in `from`.
///
/// Illegal combinations are rejected with [`CoreError::Conflict`]; they must
/// never silently move the candle.
pub fn transition(from: CandleStatus, event: ModerationEvent) -> Result<Transition, CoreError> {
    use CandleStatus::{Approved, Pending, Reported};
    use ModerationEvent::{Approve, Delete, Report};

    let (to, effect) = match (from, event) {
        (Pending | Reported, Approve) => (Some(Approved), Effect::Approve),
        (_, Delete) => (None, Effect::Delete),
        // A repeat report re-notifies moderators; there is no suppression.
        (Approved | Reported, Report) => (Some(Reported), Effect::Report),
        (Approved, Approve) => {
            return Err(CoreError::Conflict("Candle is already approved".into()));
        }
        (Pending, Report) => {
            return Err(CoreError::Conflict(
                "Only approved candles can be reported".into(),
            ));
        }
    };

    Ok(Transition {
        from,
        event,
        to,
        effect,
    })
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::candle::CandleStatus::{Approved, Pending, Reported};

    #[test]
    fn pending_approve_becomes_approved() {
        let t = transition(Pending, ModerationEvent::Approve).unwrap();
        assert_eq!(t.to, Some(Approved));
        assert_eq!(t.effect, Effect::Approve);
        assert_eq!(t.resolution_text(), Some("Approved"));
        assert_eq!(t.outcome_label(), "Approved");
    }

    #[test]
    fn pending_delete_removes_record() {
        let t = transition(Pending, ModerationEvent::Delete).unwrap();
        assert_eq!(t.to, None);
        assert_eq!(t.effect, Effect::Delete);
        assert_eq!(t.resolution_text(), Some("Deleted"));
        assert_eq!(t.outcome_label(), "Deleted");
    }

    #[test]
    fn approved_report_becomes_reported_without_resolution() {
        let t = transition(Approved, ModerationEvent::Report).unwrap();
        assert_eq!(t.to, Some(Reported));
        assert_eq!(t.effect, Effect::Report);
        assert_eq!(t.resolution_text(), None);
        assert!(!t.resolves_report());
    }

    #[test]
    fn reported_approve_uses_report_wording() {
        let t = transition(Reported, ModerationEvent::Approve).unwrap();
        assert_eq!(t.to, Some(Approved));
        assert!(t.resolves_report());
        assert_eq!(t.resolution_text(), Some("Report resolved: approved"));
    }

    #[test]
    fn reported_delete_uses_report_wording() {
        let t = transition(Reported, ModerationEvent::Delete).unwrap();
        assert_eq!(t.to, None);
        assert_eq!(t.resolution_text(), Some("Report resolved: deleted"));
    }

    #[test]
    fn approved_candle_can_still_be_deleted() {
        let t = transition(Approved, ModerationEvent::Delete).unwrap();
        assert_eq!(t.to, None);
        assert_eq!(t.resolution_text(), Some("Deleted"));
    }

    #[test]
    fn reporting_pending_candle_is_rejected() {
        let err = transition(Pending, ModerationEvent::Report).unwrap_err();
        assert_matches!(err, CoreError::Conflict(_));
    }

    #[test]
    fn approving_approved_candle_is_rejected() {
        let err = transition(Approved, ModerationEvent::Approve).unwrap_err();
        assert_matches!(err, CoreError::Conflict(_));
    }

    #[test]
    fn repeat_report_stays_reported() {
        let t = transition(Reported, ModerationEvent::Report).unwrap();
        assert_eq!(t.to, Some(Reported));
        assert_eq!(t.effect, Effect::Report);
    }

    #[test]
    fn only_a_repeat_report_supersedes_a_prompt() {
        assert!(transition(Reported, ModerationEvent::Report).unwrap().supersedes_report());
        assert!(!transition(Approved, ModerationEvent::Report).unwrap().supersedes_report());
        assert!(!transition(Reported, ModerationEvent::Delete).unwrap().supersedes_report());
    }

    #[test]
    fn no_transition_lands_in_pending() {
        for from in [Pending, Approved, Reported] {
            for event in [
                ModerationEvent::Approve,
                ModerationEvent::Delete,
                ModerationEvent::Report,
            ] {
                if let Ok(t) = transition(from, event) {
                    assert_ne!(t.to, Some(Pending), "{from} --{event}--> Pending");
                }
            }
        }
    }

    #[test]
    fn only_approved_or_reported_can_become_reported() {
        for from in [Pending, Approved, Reported] {
            let result = transition(from, ModerationEvent::Report);
            assert_eq!(result.is_ok(), from != Pending);
        }
    }

    #[test]
    fn admin_actions_parse() {
        assert_eq!("approve".parse::<AdminAction>().unwrap(), AdminAction::Approve);
        assert_eq!("reject".parse::<AdminAction>().unwrap().event(), ModerationEvent::Delete);
    }

    #[test]
    fn unknown_admin_action_is_rejected() {
        let err = "delete".parse::<AdminAction>().unwrap_err();
        assert!(err.contains("approve, reject"));
    }
}
