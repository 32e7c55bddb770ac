//! Route Guard
//!
//! Route admission needs a session; under [`GuardPolicy::RoleScoped`] it also
//! needs the view's role allow-list. The navigation menu always filters by
//! that allow-list.

use crate::identity::{Identity, Role};
use crate::session::SessionStore;
use crm_core::GuardPolicy;
use serde::Serialize;
use tracing::debug;

/// Views of the navigation surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    Login,
    ResetPassword,
    Root,
    Dashboard,
    Finance,
    Inventory,
    Settings,
    NotFound,
}

impl View {
    /// Views that require an authenticated session, in menu order
    pub const PROTECTED: [View; 4] = [
        View::Dashboard,
        View::Finance,
        View::Inventory,
        View::Settings,
    ];

    /// Route path; the catch-all view has none
    pub fn path(&self) -> Option<&'static str> {
        match self {
            View::Login => Some("/login"),
            View::ResetPassword => Some("/reset-password"),
            View::Root => Some("/"),
            View::Dashboard => Some("/dashboard"),
            View::Finance => Some("/finance"),
            View::Inventory => Some("/inventory"),
            View::Settings => Some("/settings"),
            View::NotFound => None,
        }
    }

    /// Map a request path to its view; unknown paths hit the catch-all
    pub fn from_path(path: &str) -> View {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');

        match trimmed {
            "" => View::Root,
            "/login" => View::Login,
            "/reset-password" => View::ResetPassword,
            "/dashboard" => View::Dashboard,
            "/finance" => View::Finance,
            "/inventory" => View::Inventory,
            "/settings" => View::Settings,
            _ => View::NotFound,
        }
    }

    pub fn is_protected(&self) -> bool {
        Self::PROTECTED.contains(self)
    }

    /// Menu label / page title
    pub fn title(&self) -> &'static str {
        match self {
            View::Login => "Login",
            View::ResetPassword => "Recuperar senha",
            View::Root => "CRM",
            View::Dashboard => "Dashboard",
            View::Finance => "Financeiro",
            View::Inventory => "Estoque",
            View::Settings => "Configurações",
            View::NotFound => "Página não encontrada",
        }
    }

    /// Roles allowed to see this view in the menu
    pub fn allowed_roles(&self) -> &'static [Role] {
        match self {
            View::Dashboard => &[Role::Admin, Role::Finance, Role::Inventory],
            View::Finance => &[Role::Admin, Role::Finance],
            View::Inventory => &[Role::Admin, Role::Inventory],
            View::Settings => &[Role::Admin],
            View::Login | View::ResetPassword | View::Root | View::NotFound => &Role::ALL,
        }
    }

    pub fn allows(&self, role: Role) -> bool {
        self.allowed_roles().contains(&role)
    }
}

impl std::fmt::Display for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path().unwrap_or("*"))
    }
}

/// Outcome of a route admission check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Redirect(View),
    /// Authenticated, but the role is outside the view's allow-list
    Forbidden,
}

/// Navigation menu entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub view: View,
    pub label: &'static str,
    pub path: &'static str,
    pub allowed_roles: Vec<Role>,
    /// Whether this entry points at the current location
    pub active: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RouteGuard {
    policy: GuardPolicy,
}

impl RouteGuard {
    pub fn new(policy: GuardPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> GuardPolicy {
        self.policy
    }

    /// Decide whether `view` may render for `identity`
    pub fn admit(&self, identity: Option<&Identity>, view: View) -> Decision {
        if view == View::Root {
            return Decision::Redirect(View::Dashboard);
        }

        if !view.is_protected() {
            return Decision::Allow;
        }

        let decision = match identity {
            None => Decision::Redirect(View::Login),
            Some(identity) => match self.policy {
                GuardPolicy::SessionOnly => Decision::Allow,
                GuardPolicy::RoleScoped if view.allows(identity.role) => Decision::Allow,
                GuardPolicy::RoleScoped => Decision::Forbidden,
            },
        };

        debug!(
            view = %view,
            role = ?identity.map(|i| i.role),
            decision = ?decision,
            "Route admission"
        );
        decision
    }

    /// Admission against the session store's current identity
    pub async fn check(&self, session: &SessionStore, view: View) -> Decision {
        let identity = session.current().await;
        self.admit(identity.as_ref(), view)
    }

    /// Menu entries visible to `identity`, marking the one at `current_path`
    pub fn navigation(&self, identity: Option<&Identity>, current_path: &str) -> Vec<NavItem> {
        let Some(identity) = identity else {
            return Vec::new();
        };
        let current = View::from_path(current_path);

        View::PROTECTED
            .iter()
            .filter(|view| view.allows(identity.role))
            .filter_map(|view| {
                Some(NavItem {
                    view: *view,
                    label: view.title(),
                    path: view.path()?,
                    allowed_roles: view.allowed_roles().to_vec(),
                    active: *view == current,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(role: Role) -> Identity {
        Identity::new("x", "Someone", "someone@example.com", role)
    }

    fn labels(items: &[NavItem]) -> Vec<&'static str> {
        items.iter().map(|item| item.label).collect()
    }

    #[test]
    fn test_from_path() {
        assert_eq!(View::from_path("/"), View::Root);
        assert_eq!(View::from_path(""), View::Root);
        assert_eq!(View::from_path("/dashboard"), View::Dashboard);
        assert_eq!(View::from_path("/finance/"), View::Finance);
        assert_eq!(View::from_path("/inventory?tab=movements"), View::Inventory);
        assert_eq!(View::from_path("/reset-password"), View::ResetPassword);
        assert_eq!(View::from_path("/settings/extra"), View::NotFound);
        assert_eq!(View::from_path("/nowhere"), View::NotFound);
    }

    #[test]
    fn test_root_always_redirects_to_dashboard() {
        let guard = RouteGuard::default();
        let admin = identity(Role::Admin);

        assert_eq!(
            guard.admit(None, View::Root),
            Decision::Redirect(View::Dashboard)
        );
        assert_eq!(
            guard.admit(Some(&admin), View::Root),
            Decision::Redirect(View::Dashboard)
        );
    }

    #[test]
    fn test_public_views_always_allowed() {
        let guard = RouteGuard::new(GuardPolicy::RoleScoped);
        for view in [View::Login, View::ResetPassword, View::NotFound] {
            assert_eq!(guard.admit(None, view), Decision::Allow);
        }
    }

    #[test]
    fn test_protected_views_need_a_session_irrespective_of_role() {
        let guard = RouteGuard::default();

        for view in View::PROTECTED {
            assert_eq!(guard.admit(None, view), Decision::Redirect(View::Login));
            for role in Role::ALL {
                assert_eq!(guard.admit(Some(&identity(role)), view), Decision::Allow);
            }
        }
    }

    #[test]
    fn test_role_scoped_policy_enforces_allow_list() {
        let guard = RouteGuard::new(GuardPolicy::RoleScoped);
        let finance = identity(Role::Finance);

        for (view, expected) in [
            (View::Dashboard, Decision::Allow),
            (View::Finance, Decision::Allow),
            (View::Inventory, Decision::Forbidden),
            (View::Settings, Decision::Forbidden),
        ] {
            assert_eq!(guard.admit(Some(&finance), view), expected, "{}", view);
        }
        assert_eq!(
            guard.admit(None, View::Settings),
            Decision::Redirect(View::Login)
        );
    }

    #[test]
    fn test_navigation_per_role() {
        let guard = RouteGuard::default();

        assert_eq!(
            labels(&guard.navigation(Some(&identity(Role::Admin)), "/dashboard")),
            vec!["Dashboard", "Financeiro", "Estoque", "Configurações"]
        );
        assert_eq!(
            labels(&guard.navigation(Some(&identity(Role::Finance)), "/dashboard")),
            vec!["Dashboard", "Financeiro"]
        );
        assert_eq!(
            labels(&guard.navigation(Some(&identity(Role::Inventory)), "/dashboard")),
            vec!["Dashboard", "Estoque"]
        );
        assert!(guard.navigation(None, "/dashboard").is_empty());
    }

    #[test]
    fn test_navigation_includes_iff_role_allowed() {
        let guard = RouteGuard::default();
        for role in Role::ALL {
            let items = guard.navigation(Some(&identity(role)), "/");
            for view in View::PROTECTED {
                let shown = items.iter().any(|item| item.view == view);
                assert_eq!(shown, view.allows(role), "{:?} / {:?}", role, view);
            }
        }
    }

    #[test]
    fn test_navigation_marks_active_entry() {
        let guard = RouteGuard::default();
        let items = guard.navigation(Some(&identity(Role::Admin)), "/finance");

        let active: Vec<_> = items.iter().filter(|item| item.active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].path, "/finance");
    }

    #[tokio::test]
    async fn test_check_consults_session_store() {
        use crate::registry::StaticRegistry;
        use crate::storage::MemoryKeyValueStore;
        use std::sync::Arc;
        use std::time::Duration;

        let session = SessionStore::new(
            Arc::new(StaticRegistry::instant()),
            Arc::new(MemoryKeyValueStore::new()),
            Duration::ZERO,
        );
        let guard = RouteGuard::default();

        assert_eq!(
            guard.check(&session, View::Finance).await,
            Decision::Redirect(View::Login)
        );

        session
            .login("inventory@example.com", "inventory123", false)
            .await
            .unwrap();
        assert_eq!(guard.check(&session, View::Finance).await, Decision::Allow);

        session.logout().await;
        assert_eq!(
            guard.check(&session, View::Finance).await,
            Decision::Redirect(View::Login)
        );
    }
}
