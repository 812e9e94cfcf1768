//! # Actions
//!
//! Action codes stored in ACL entries, grouped by the kind of resource they
//! apply to, plus the escalation tables that say which broader actions imply
//! a narrower one.
//!
//! The evaluator never reads the escalation tables. They are configuration
//! for callers that expand a requested action into the set of actions to
//! query before asking for a verdict.

/// Full-control sentinel.
///
/// A rule on this action covers every action on its resource. It can be
/// stored but never queried directly.
pub const FULL_CONTROL: &str = "*";

/// Check whether an action is valid for a resource type.
///
/// # Arguments
///
/// * `action` - The action code to check
/// * `all` - The resource type's action list (e.g. [`for_pages::ALL`])
///
/// # Returns
///
/// `true` if `action` is in `all` or is [`FULL_CONTROL`]
///
/// # Example
///
/// ```
/// use acl_core::actions::{for_pages, is_valid_action, FULL_CONTROL};
///
/// assert!(is_valid_action(for_pages::READ_PAGE, for_pages::ALL));
/// assert!(is_valid_action(FULL_CONTROL, for_pages::ALL));
/// assert!(!is_valid_action("Rd_Pg", for_pages::ALL));
/// ```
pub fn is_valid_action(action: &str, all: &[&str]) -> bool {
    action == FULL_CONTROL || all.contains(&action)
}

/// Actions on the global (wiki-wide) resource.
pub mod for_globals {
    /// Manage user accounts.
    pub const MANAGE_ACCOUNTS: &str = "Man_Acc";
    /// Manage user groups.
    pub const MANAGE_GROUPS: &str = "Man_Groups";
    /// Manage all pages and categories.
    pub const MANAGE_PAGES_AND_CATEGORIES: &str = "Man_Pages";
    /// Manage all page discussions.
    pub const MANAGE_DISCUSSIONS: &str = "Man_Disc";
    /// Create, rename and delete namespaces.
    pub const MANAGE_NAMESPACES: &str = "Man_Ns";
    /// Change wiki configuration.
    pub const MANAGE_CONFIGURATION: &str = "Man_Conf";
    /// Enable, disable and configure providers.
    pub const MANAGE_PROVIDERS: &str = "Man_Prov";
    /// Manage files and directories.
    pub const MANAGE_FILES: &str = "Man_Files";
    /// Manage snippets and content templates.
    pub const MANAGE_SNIPPETS_AND_TEMPLATES: &str = "Man_Snips";
    /// Manage navigation paths.
    pub const MANAGE_NAVIGATION_PATHS: &str = "Man_NavPaths";
    /// Manage meta files (header, footer, sidebar).
    pub const MANAGE_META_FILES: &str = "Man_Meta";

    /// All global actions.
    pub const ALL: &[&str] = &[
        MANAGE_ACCOUNTS,
        MANAGE_GROUPS,
        MANAGE_PAGES_AND_CATEGORIES,
        MANAGE_DISCUSSIONS,
        MANAGE_NAMESPACES,
        MANAGE_CONFIGURATION,
        MANAGE_PROVIDERS,
        MANAGE_FILES,
        MANAGE_SNIPPETS_AND_TEMPLATES,
        MANAGE_NAVIGATION_PATHS,
        MANAGE_META_FILES,
    ];

    /// Broader global actions that imply `action`.
    pub fn escalation(action: &str) -> &'static [&'static str] {
        match action {
            MANAGE_GROUPS => &[MANAGE_ACCOUNTS],
            MANAGE_DISCUSSIONS => &[MANAGE_PAGES_AND_CATEGORIES],
            MANAGE_NAVIGATION_PATHS => &[MANAGE_PAGES_AND_CATEGORIES],
            MANAGE_META_FILES => &[MANAGE_CONFIGURATION],
            _ => &[],
        }
    }
}

/// Actions on a namespace (apply to every page in it).
pub mod for_namespaces {
    /// Read pages.
    pub const READ_PAGES: &str = "Rd_Pg";
    /// Create new pages.
    pub const CREATE_PAGES: &str = "Cr_Pg";
    /// Modify existing pages.
    pub const MODIFY_PAGES: &str = "Mod_Pg";
    /// Delete pages.
    pub const DELETE_PAGES: &str = "Del_Pg";
    /// Manage pages (rename, rollback, permissions).
    pub const MANAGE_PAGES: &str = "Man_Pg";
    /// Read page discussions.
    pub const READ_DISCUSSION: &str = "Rd_Disc";
    /// Post messages in page discussions.
    pub const POST_DISCUSSION: &str = "Pst_Disc";
    /// Edit and delete discussion messages.
    pub const MANAGE_DISCUSSION: &str = "Man_Disc";
    /// Manage categories.
    pub const MANAGE_CATEGORIES: &str = "Man_Cat";
    /// Download page attachments.
    pub const DOWNLOAD_ATTACHMENTS: &str = "Down_Attn";
    /// Upload page attachments.
    pub const UPLOAD_ATTACHMENTS: &str = "Up_Attn";
    /// Delete page attachments.
    pub const DELETE_ATTACHMENTS: &str = "Del_Attn";

    /// All namespace actions.
    pub const ALL: &[&str] = &[
        READ_PAGES,
        CREATE_PAGES,
        MODIFY_PAGES,
        DELETE_PAGES,
        MANAGE_PAGES,
        READ_DISCUSSION,
        POST_DISCUSSION,
        MANAGE_DISCUSSION,
        MANAGE_CATEGORIES,
        DOWNLOAD_ATTACHMENTS,
        UPLOAD_ATTACHMENTS,
        DELETE_ATTACHMENTS,
    ];

    /// Broader namespace actions that imply `action`.
    ///
    /// # Example
    ///
    /// ```
    /// use acl_core::actions::for_namespaces::*;
    ///
    /// assert_eq!(
    ///     escalation(READ_PAGES),
    ///     &[CREATE_PAGES, MODIFY_PAGES, DELETE_PAGES, MANAGE_PAGES]
    /// );
    /// assert!(escalation(MANAGE_PAGES).is_empty());
    /// ```
    pub fn escalation(action: &str) -> &'static [&'static str] {
        match action {
            READ_PAGES => &[CREATE_PAGES, MODIFY_PAGES, DELETE_PAGES, MANAGE_PAGES],
            CREATE_PAGES | MODIFY_PAGES | DELETE_PAGES => &[MANAGE_PAGES],
            MANAGE_CATEGORIES => &[MANAGE_PAGES],
            READ_DISCUSSION => &[POST_DISCUSSION, MANAGE_DISCUSSION],
            POST_DISCUSSION => &[MANAGE_DISCUSSION],
            DOWNLOAD_ATTACHMENTS => &[UPLOAD_ATTACHMENTS, DELETE_ATTACHMENTS],
            UPLOAD_ATTACHMENTS => &[DELETE_ATTACHMENTS],
            _ => &[],
        }
    }
}

/// Actions on a single page.
pub mod for_pages {
    /// Read the page.
    pub const READ_PAGE: &str = "Rd_1Pg";
    /// Modify the page.
    pub const MODIFY_PAGE: &str = "Mod_1Pg";
    /// Manage the page (rename, rollback, permissions).
    pub const MANAGE_PAGE: &str = "Man_1Pg";
    /// Read the page discussion.
    pub const READ_DISCUSSION: &str = "Rd_1Disc";
    /// Post in the page discussion.
    pub const POST_DISCUSSION: &str = "Pst_1Disc";
    /// Edit and delete messages in the page discussion.
    pub const MANAGE_DISCUSSION: &str = "Man_1Disc";
    /// Change the page's categories.
    pub const MANAGE_CATEGORIES: &str = "Man_1Cat";
    /// Download the page's attachments.
    pub const DOWNLOAD_ATTACHMENTS: &str = "Down_1Attn";
    /// Upload attachments to the page.
    pub const UPLOAD_ATTACHMENTS: &str = "Up_1Attn";
    /// Delete the page's attachments.
    pub const DELETE_ATTACHMENTS: &str = "Del_1Attn";

    /// All page actions.
    pub const ALL: &[&str] = &[
        READ_PAGE,
        MODIFY_PAGE,
        MANAGE_PAGE,
        READ_DISCUSSION,
        POST_DISCUSSION,
        MANAGE_DISCUSSION,
        MANAGE_CATEGORIES,
        DOWNLOAD_ATTACHMENTS,
        UPLOAD_ATTACHMENTS,
        DELETE_ATTACHMENTS,
    ];

    /// Broader page actions that imply `action`.
    pub fn escalation(action: &str) -> &'static [&'static str] {
        match action {
            READ_PAGE => &[MODIFY_PAGE, MANAGE_PAGE],
            MODIFY_PAGE | MANAGE_CATEGORIES => &[MANAGE_PAGE],
            READ_DISCUSSION => &[POST_DISCUSSION, MANAGE_DISCUSSION],
            POST_DISCUSSION => &[MANAGE_DISCUSSION],
            DOWNLOAD_ATTACHMENTS => &[UPLOAD_ATTACHMENTS, DELETE_ATTACHMENTS],
            UPLOAD_ATTACHMENTS => &[DELETE_ATTACHMENTS],
            _ => &[],
        }
    }
}

/// Actions on a file storage directory.
pub mod for_directories {
    /// List directory content.
    pub const LIST: &str = "List";
    /// Download files.
    pub const DOWNLOAD_FILES: &str = "Down_Files";
    /// Upload files.
    pub const UPLOAD_FILES: &str = "Up_Files";
    /// Delete files.
    pub const DELETE_FILES: &str = "Del_Files";
    /// Create sub-directories.
    pub const CREATE_DIRECTORIES: &str = "Cr_Dirs";
    /// Delete sub-directories.
    pub const DELETE_DIRECTORIES: &str = "Del_Dirs";

    /// All directory actions.
    pub const ALL: &[&str] = &[
        LIST,
        DOWNLOAD_FILES,
        UPLOAD_FILES,
        DELETE_FILES,
        CREATE_DIRECTORIES,
        DELETE_DIRECTORIES,
    ];

    /// Broader directory actions that imply `action`.
    pub fn escalation(action: &str) -> &'static [&'static str] {
        match action {
            LIST => &[
                DOWNLOAD_FILES,
                UPLOAD_FILES,
                DELETE_FILES,
                CREATE_DIRECTORIES,
                DELETE_DIRECTORIES,
            ],
            DOWNLOAD_FILES => &[UPLOAD_FILES, DELETE_FILES],
            UPLOAD_FILES => &[DELETE_FILES],
            CREATE_DIRECTORIES => &[DELETE_DIRECTORIES],
            _ => &[],
        }
    }
}
