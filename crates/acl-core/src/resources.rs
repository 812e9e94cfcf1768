//! # Resources
//!
//! Resource names are strings with a type prefix. The prefix decides which
//! action table applies to rules stored on the resource:
//!
//! ```text
//! G                     - the wiki itself (global actions)
//! N.<namespace>         - a namespace, `N.` alone is the root namespace
//! P.<full page name>    - a single page
//! D.<provider>|<path>   - a file storage directory
//! ```

use serde::{Deserialize, Serialize};

use crate::actions::{for_directories, for_globals, for_namespaces, for_pages};
use crate::error::{require_non_empty, AclResult};

/// Name of the global resource.
pub const GLOBALS_RESOURCE: &str = "G";

/// Prefix of namespace resources.
pub const NAMESPACE_PREFIX: &str = "N.";

/// Prefix of page resources.
pub const PAGE_PREFIX: &str = "P.";

/// Prefix of directory resources.
pub const DIRECTORY_PREFIX: &str = "D.";

/// Kind of resource a rule is stored on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// The wiki as a whole.
    Globals,
    /// A namespace.
    Namespace,
    /// A page.
    Page,
    /// A file storage directory.
    Directory,
}

impl ResourceKind {
    /// Get the string representation of the resource kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Globals => "globals",
            ResourceKind::Namespace => "namespace",
            ResourceKind::Page => "page",
            ResourceKind::Directory => "directory",
        }
    }

    /// Classify a resource name by its prefix.
    ///
    /// # Example
    ///
    /// ```
    /// use acl_core::resources::ResourceKind;
    ///
    /// assert_eq!(ResourceKind::of("G"), Some(ResourceKind::Globals));
    /// assert_eq!(ResourceKind::of("N."), Some(ResourceKind::Namespace));
    /// assert_eq!(ResourceKind::of("P.Help.Intro"), Some(ResourceKind::Page));
    /// assert_eq!(ResourceKind::of("Main"), None);
    /// ```
    pub fn of(resource: &str) -> Option<Self> {
        if resource == GLOBALS_RESOURCE {
            Some(ResourceKind::Globals)
        } else if resource.starts_with(NAMESPACE_PREFIX) {
            Some(ResourceKind::Namespace)
        } else if resource.starts_with(PAGE_PREFIX) {
            Some(ResourceKind::Page)
        } else if resource.starts_with(DIRECTORY_PREFIX) {
            Some(ResourceKind::Directory)
        } else {
            None
        }
    }

    /// All actions valid on this kind of resource.
    pub fn actions(&self) -> &'static [&'static str] {
        match self {
            ResourceKind::Globals => for_globals::ALL,
            ResourceKind::Namespace => for_namespaces::ALL,
            ResourceKind::Page => for_pages::ALL,
            ResourceKind::Directory => for_directories::ALL,
        }
    }

    /// Broader actions that imply `action` on this kind of resource.
    pub fn escalation(&self, action: &str) -> &'static [&'static str] {
        match self {
            ResourceKind::Globals => for_globals::escalation(action),
            ResourceKind::Namespace => for_namespaces::escalation(action),
            ResourceKind::Page => for_pages::escalation(action),
            ResourceKind::Directory => for_directories::escalation(action),
        }
    }

    /// Get all resource kinds.
    pub fn all() -> Vec<Self> {
        vec![
            ResourceKind::Globals,
            ResourceKind::Namespace,
            ResourceKind::Page,
            ResourceKind::Directory,
        ]
    }
}

/// Build the resource name of a namespace.
///
/// `None` or an empty name is the root namespace.
pub fn namespace_resource(namespace: Option<&str>) -> String {
    format!("{NAMESPACE_PREFIX}{}", namespace.unwrap_or_default())
}

/// Build the resource name of a page from its full name.
pub fn page_resource(full_name: &str) -> AclResult<String> {
    require_non_empty("page", full_name)?;
    Ok(format!("{PAGE_PREFIX}{full_name}"))
}

/// Build the resource name of a storage directory.
///
/// The path is normalized to start and end with `/`, so `docs`, `/docs`
/// and `/docs/` name the same resource.
///
/// # Example
///
/// ```
/// use acl_core::resources::directory_resource;
///
/// assert_eq!(directory_resource("FilesProv", "docs").unwrap(), "D.FilesProv|/docs/");
/// assert_eq!(directory_resource("FilesProv", "").unwrap(), "D.FilesProv|/");
/// ```
pub fn directory_resource(provider: &str, path: &str) -> AclResult<String> {
    require_non_empty("provider", provider)?;
    let trimmed = path.trim_matches('/');
    let path = if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{trimmed}/")
    };
    Ok(format!("{DIRECTORY_PREFIX}{provider}|{path}"))
}
