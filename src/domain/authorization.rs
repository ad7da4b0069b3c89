//! Authorization gate for project operations
//!
//! A pure decision function, not a stateful component. Every service
//! operation that reads or mutates a project asks the gate first; the
//! repositories themselves perform no authorization. Role checks live
//! here and nowhere else, so call sites never branch on role strings.

use super::project::{Project, ProjectStatus};
use super::user::User;

/// An action an actor wants to perform against one project
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectAction {
    /// Read the project and its comment thread
    View,
    /// Append a comment
    Comment,
    /// Change any field other than status
    EditDetails,
    /// Move the workflow status from one value to another
    SetStatus {
        from: ProjectStatus,
        to: ProjectStatus,
    },
}

/// Decides whether `actor` may perform `action` on `target`
///
/// # Rules
/// - Admins may do anything to any project.
/// - Clients are scoped to projects they own: view and comment freely,
///   and move status only from `review` to `approved` or back to
///   `pending`. Nothing else.
pub fn can(actor: &User, action: ProjectAction, target: &Project) -> bool {
    if actor.role.is_admin() {
        return true;
    }

    if !actor.owns_client_id(target.client_id()) {
        return false;
    }

    match action {
        ProjectAction::View | ProjectAction::Comment => true,
        ProjectAction::SetStatus { from, to } => from.client_may_set(to),
        ProjectAction::EditDetails => false,
    }
}

/// Only admins open new projects; there is no target to check yet.
pub fn may_create_projects(actor: &User) -> bool {
    actor.role.is_admin()
}
