use std::borrow::Cow;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::record::{Lifecycle, Record};

/// Which side of the platform an account belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum UserKind {
    JobSeeker,
    Recruiter,
}

impl UserKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserKind::JobSeeker => "job_seeker",
            UserKind::Recruiter => "recruiter",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum UserStatus {
    Active,
    Inactive,
    Pending,
    Suspended,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "Active",
            UserStatus::Inactive => "Inactive",
            UserStatus::Pending => "Pending",
            UserStatus::Suspended => "Suspended",
        }
    }

    /// Target of the activate/deactivate switch: active accounts are
    /// deactivated, anything else is activated.
    pub fn toggled(&self) -> Self {
        match self {
            UserStatus::Active => UserStatus::Inactive,
            _ => UserStatus::Active,
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Lifecycle for UserStatus {
    fn can_transition_to(&self, next: &Self) -> bool {
        use UserStatus::*;
        if self == next {
            return true;
        }
        match next {
            // Nothing goes back to awaiting approval.
            Pending => false,
            Active => true,
            Inactive => matches!(self, Active | Pending),
            Suspended => matches!(self, Active | Inactive),
        }
    }

    fn is_terminal(&self) -> bool {
        false
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub kind: UserKind,
    /// Recruiters only.
    pub company: Option<String>,
    pub location: String,
    pub status: UserStatus,
    pub joined: NaiveDate,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub applied_jobs: u32,
    #[serde(default)]
    pub posted_jobs: u32,
    #[serde(default)]
    pub hires: u32,
}

impl Record for User {
    type Status = UserStatus;

    const BOARD: &'static str = "users";
    const FIELDS: &'static [&'static str] = &[
        "id", "name", "email", "kind", "company", "location", "status", "joined",
    ];
    const SEARCHABLE: &'static [&'static str] = &["name", "email", "location", "company"];

    fn id(&self) -> &str {
        &self.id
    }

    fn field(&self, name: &str) -> Option<Cow<'_, str>> {
        match name {
            "id" => Some(Cow::Borrowed(&self.id)),
            "name" => Some(Cow::Borrowed(&self.name)),
            "email" => Some(Cow::Borrowed(&self.email)),
            "kind" => Some(Cow::Borrowed(self.kind.as_str())),
            "company" => self.company.as_deref().map(Cow::Borrowed),
            "location" => Some(Cow::Borrowed(&self.location)),
            "status" => Some(Cow::Borrowed(self.status.as_str())),
            "joined" => Some(Cow::Owned(self.joined.to_string())),
            _ => None,
        }
    }

    fn status(&self) -> &UserStatus {
        &self.status
    }

    fn with_status(&self, status: UserStatus) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use UserStatus::*;

    #[test]
    fn test_user_lifecycle() {
        assert!(Pending.can_transition_to(&Active));
        assert!(Active.can_transition_to(&Inactive));
        assert!(Inactive.can_transition_to(&Active));
        assert!(Active.can_transition_to(&Suspended));
        assert!(Suspended.can_transition_to(&Active));
        assert!(!Suspended.can_transition_to(&Inactive));
        assert!(!Active.can_transition_to(&Pending));
        assert!(!Suspended.is_terminal());
    }

    #[test]
    fn test_toggle_target_is_always_allowed() {
        for status in [Active, Inactive, Pending, Suspended] {
            assert!(status.can_transition_to(&status.toggled()), "{status}");
        }
        assert_eq!(Active.toggled(), Inactive);
        assert_eq!(Pending.toggled(), Active);
    }

    #[test]
    fn test_company_only_for_recruiters() {
        let mut user = User {
            id: "JS-1".to_string(),
            name: "Alice Johnson".to_string(),
            email: "alice.johnson@example.com".to_string(),
            kind: UserKind::JobSeeker,
            company: None,
            location: "New York, USA".to_string(),
            status: Active,
            joined: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            skills: vec![],
            applied_jobs: 12,
            posted_jobs: 0,
            hires: 0,
        };
        assert_eq!(user.field("company"), None);
        assert_eq!(user.field("kind").as_deref(), Some("job_seeker"));

        user.kind = UserKind::Recruiter;
        user.company = Some("Tech Innovations Inc.".to_string());
        assert_eq!(user.field("company").as_deref(), Some("Tech Innovations Inc."));
    }
}
