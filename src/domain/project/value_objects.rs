use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Workflow status of a project
///
/// # Workflow
/// ```text
/// Pending -> InProgress -> Review -> Approved -> Completed
///                            |
///                            +----> Pending   (client sends work back)
/// ```
///
/// The store accepts any status value from an admin; the only
/// transitions a client may trigger are handled by
/// [`client_may_set`](ProjectStatus::client_may_set).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    /// Waiting for the agency to pick the work up
    Pending,
    /// Agency is actively working
    InProgress,
    /// Delivered for client approval
    Review,
    /// Client signed the work off
    Approved,
    /// Project closed out
    Completed,
}

impl ProjectStatus {
    /// Checks whether a client-initiated transition to `next` is allowed
    ///
    /// Clients only ever act on work under review: they approve it or
    /// send it back to pending. Every other pair is reserved for admins.
    pub fn client_may_set(self, next: ProjectStatus) -> bool {
        use ProjectStatus::*;
        matches!((self, next), (Review, Approved) | (Review, Pending))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ProjectStatus::Pending => "pending",
            ProjectStatus::InProgress => "in_progress",
            ProjectStatus::Review => "review",
            ProjectStatus::Approved => "approved",
            ProjectStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ProjectStatus::Pending),
            "in_progress" => Ok(ProjectStatus::InProgress),
            "review" => Ok(ProjectStatus::Review),
            "approved" => Ok(ProjectStatus::Approved),
            "completed" => Ok(ProjectStatus::Completed),
            other => Err(format!("Unknown project status: {}", other)),
        }
    }
}
