//! Session → current-user projection.

use stw_core::identity::CurrentUser;

use crate::session::SessionUser;

/// Project the session's user into a [`CurrentUser`].
///
/// The organization resolves as: explicit override, then the session's own
/// organization, then unset. An override that is `Some` wins even when the
/// string is empty; callers that treat empty input as "no override" must
/// normalize it first (the config layer does).
///
/// No session user means no current user. This is a normal state, not an error.
#[must_use]
pub fn project_current_user(
    user: Option<&SessionUser>,
    override_organization: Option<&str>,
) -> Option<CurrentUser> {
    let user = user?;
    Some(CurrentUser {
        id: user.id.clone(),
        organization: override_organization
            .or_else(|| user.organization())
            .map(String::from),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::tests::make_user;
    use pretty_assertions::assert_eq;

    #[test]
    fn no_user_projects_to_none() {
        assert_eq!(project_current_user(None, None), None);
        assert_eq!(project_current_user(None, Some("acme")), None);
    }

    #[test]
    fn session_organization_used_without_override() {
        let user = make_user("u1", Some("acme"));
        assert_eq!(
            project_current_user(Some(&user), None),
            Some(CurrentUser {
                id: "u1".into(),
                organization: Some("acme".into()),
            })
        );
    }

    #[test]
    fn override_wins_over_session_organization() {
        let user = make_user("u1", Some("acme"));
        let projected = project_current_user(Some(&user), Some("globex")).unwrap();
        assert_eq!(projected.organization.as_deref(), Some("globex"));
    }

    #[test]
    fn override_applies_when_session_has_none() {
        let user = make_user("u1", None);
        let projected = project_current_user(Some(&user), Some("globex")).unwrap();
        assert_eq!(projected.organization.as_deref(), Some("globex"));
    }

    #[test]
    fn unset_everywhere_stays_unset() {
        let user = make_user("u1", None);
        let projected = project_current_user(Some(&user), None).unwrap();
        assert_eq!(projected.id, "u1");
        assert!(projected.organization.is_none());
    }
}
