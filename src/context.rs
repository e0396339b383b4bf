use std::collections::HashSet;

use serde::Deserialize;

use crate::document::Document;
use crate::error::{PageError, PageResult};
use crate::header::NavLink;

pub type UserId = i32;
pub type RepositoryId = i32;

/// How the deployment authenticates users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMode {
    /// Built-in accounts; sign in/out links are rendered by the header.
    Builtin,
    /// Authentication handled by the host (reverse proxy, SSO, ...).
    Host,
}

/// Where sessions are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionType {
    Cookie,
    Httpauth,
}

/// Immutable deployment configuration, passed explicitly into the composer
/// instead of being read from ambient global state.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub is_development: bool,
    pub auth_mode: AuthMode,
    pub session_type: SessionType,
    pub extensions_enabled: bool,
    pub hostname: String,
    /// Prefix applied to static resource URLs (cache busting), if any.
    pub static_prefix: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            is_development: false,
            auth_mode: AuthMode::Builtin,
            session_type: SessionType::Cookie,
            extensions_enabled: false,
            hostname: "localhost".to_string(),
            static_prefix: None,
        }
    }
}

impl Config {
    pub fn from_yaml(source: &str) -> PageResult<Config> {
        serde_yaml::from_str(source).map_err(|err| PageError::Config(err.to_string()))
    }
}

/// The authenticated (or anonymous) user behind the current request.
pub trait Session {
    fn is_anonymous(&self) -> bool;
    fn has_role(&self, role: &str) -> bool;
    fn preference(&self, name: &str) -> Option<String>;
    fn name(&self) -> &str;
    fn id(&self) -> UserId;
}

/// One selectable repository row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    pub id: RepositoryId,
    pub name: String,
    pub path: String,
}

/// Read-only lookups this core needs from storage. Exact-match equality only;
/// malformed data is the collaborator's contract to uphold.
pub trait Query {
    fn unread_news_count(&self, user: UserId) -> u64;
    /// All repositories, ordered by name.
    fn repositories(&self) -> Vec<Repository>;
    /// Repositories associated with the user: the union of the user's filter
    /// repositories and the repositories of reviews the user participates in.
    fn highlighted_repositories(&self, user: UserId) -> HashSet<RepositoryId>;
}

/// An installed extension with a pending update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatedExtension {
    pub author: String,
    pub name: String,
}

/// Resources contributed by the extension injection hook.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Injected {
    pub stylesheets: Vec<String>,
    pub scripts: Vec<String>,
}

/// The extension subsystem, when one is enabled.
pub trait Extensions {
    fn updated_extensions(&self, session: &dyn Session) -> Vec<UpdatedExtension>;

    /// Give extensions a chance to amend the page: they may mutate the
    /// document, rewrite the navigation link list, and contribute resources
    /// through `injected`.
    fn inject(
        &self,
        path: &[String],
        query: &str,
        session: &dyn Session,
        document: &mut Document,
        links: &mut Vec<NavLink>,
        injected: &mut Injected,
    ) -> PageResult<()>;
}

/// The slice of the incoming request this core reads.
#[derive(Debug, Clone, Default)]
pub struct RequestInfo {
    pub path: String,
    /// The path as originally requested, before any internal rewriting.
    pub original_path: String,
    pub query: String,
    /// Name of the acting identity, when the request carries one.
    pub acting_user: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_loads_from_yaml() {
        let config = Config::from_yaml(
            "isDevelopment: true\nauthMode: builtin\nsessionType: cookie\n\
             extensionsEnabled: false\nhostname: review.example.com\n",
        )
        .unwrap();
        assert!(config.is_development);
        assert_eq!(config.auth_mode, AuthMode::Builtin);
        assert_eq!(config.hostname, "review.example.com");
        assert_eq!(config.static_prefix, None);
    }

    #[test]
    fn config_rejects_unknown_auth_mode() {
        let err = Config::from_yaml("authMode: ldap\n").unwrap_err();
        assert!(matches!(err, PageError::Config(_)));
    }
}
