//! Navigation menu trees and permission filtering
//!
//! Menus are declared statically (in code or a JSON file) and filtered per
//! session. Filtering builds a fresh tree; payload fields are copied as-is.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use recruit_rbac::{parse_permission_strict, AccessError, AccessResult, Role};

/// A navigation entry, possibly with nested entries.
///
/// # Examples
///
/// ```
/// use recruit_access::MenuNode;
///
/// let jobs = MenuNode::new("jobs", "Jobs", "/jobs")
///     .with_permission("job.read")
///     .with_children(vec![
///         MenuNode::new("create-job", "Create Job", "/jobs/new").with_permission("job.create"),
///     ]);
/// assert_eq!(jobs.children.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuNode {
    /// Stable identifier
    pub id: String,

    /// Display label
    pub label: String,

    /// Route the entry links to
    pub href: String,

    /// Icon name, passed through to the UI untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    /// Required permission (`"subject.action"`); `None` means always visible
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permission: Option<String>,

    /// Nested entries
    #[serde(default)]
    pub children: Vec<MenuNode>,
}

impl MenuNode {
    /// Creates a leaf entry with no permission requirement.
    pub fn new(id: impl Into<String>, label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            href: href.into(),
            icon: None,
            permission: None,
            children: Vec::new(),
        }
    }

    /// Sets the required permission.
    pub fn with_permission(mut self, permission: impl Into<String>) -> Self {
        self.permission = Some(permission.into());
        self
    }

    /// Sets the icon name.
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Replaces the nested entries.
    pub fn with_children(mut self, children: Vec<MenuNode>) -> Self {
        self.children = children;
        self
    }

    /// Copy of this node's payload with a different child list.
    fn with_filtered_children(&self, children: Vec<MenuNode>) -> Self {
        Self {
            id: self.id.clone(),
            label: self.label.clone(),
            href: self.href.clone(),
            icon: self.icon.clone(),
            permission: self.permission.clone(),
            children,
        }
    }
}

/// Field names used by a JSON menu source.
///
/// Menu files written for other front-ends may call the permission or
/// children fields something else; the shape maps them onto [`MenuNode`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuShape {
    /// Key holding the route (maps to `href`)
    pub path: String,

    /// Key holding the permission string
    pub permission: String,

    /// Key holding nested entries
    pub children: String,
}

impl Default for MenuShape {
    fn default() -> Self {
        Self {
            path: "href".to_string(),
            permission: "permission".to_string(),
            children: "children".to_string(),
        }
    }
}

impl MenuShape {
    fn rename_keys(&self, value: Value) -> Value {
        match value {
            Value::Array(items) => Value::Array(items.into_iter().map(|v| self.rename_keys(v)).collect()),
            Value::Object(fields) => {
                let mut out = Map::with_capacity(fields.len());
                for (key, field) in fields {
                    if key == self.children {
                        // Anything that is not a list of entries means no children.
                        let children = match field {
                            Value::Array(_) => self.rename_keys(field),
                            _ => Value::Array(Vec::new()),
                        };
                        out.insert("children".to_string(), children);
                    } else if key == self.permission {
                        out.insert("permission".to_string(), field);
                    } else if key == self.path {
                        out.insert("href".to_string(), field);
                    } else if !out.contains_key(&key) {
                        out.insert(key, field);
                    }
                }
                Value::Object(out)
            }
            other => other,
        }
    }
}

/// Convert a JSON menu array into typed nodes using the given field names.
///
/// # Errors
///
/// Returns the `serde_json` error when the value is not an array of menu
/// objects once keys are mapped.
///
/// # Examples
///
/// ```
/// use recruit_access::menu::{menu_from_json, MenuShape};
///
/// let shape = MenuShape {
///     path: "path".into(),
///     permission: "perm".into(),
///     children: "items".into(),
/// };
/// let raw = serde_json::json!([
///     { "id": "jobs", "label": "Jobs", "path": "/jobs", "perm": "job.read", "items": [] }
/// ]);
/// let menu = menu_from_json(raw, &shape).unwrap();
/// assert_eq!(menu[0].href, "/jobs");
/// assert_eq!(menu[0].permission.as_deref(), Some("job.read"));
/// ```
pub fn menu_from_json(value: Value, shape: &MenuShape) -> Result<Vec<MenuNode>, serde_json::Error> {
    serde_json::from_value(shape.rename_keys(value))
}

/// Filter a menu tree with a permission checker.
///
/// Children are filtered first. A node is kept if the checker allows its own
/// permission or if at least one child survived; its children are replaced by
/// the surviving ones. Sibling order is preserved and the result is stable
/// under re-filtering with the same checker.
///
/// # Examples
///
/// ```
/// use recruit_access::{filter_menu, MenuNode};
///
/// let menu = vec![
///     MenuNode::new("a", "A", "/a")
///         .with_permission("job.delete")
///         .with_children(vec![MenuNode::new("b", "B", "/b").with_permission("job.create")]),
/// ];
///
/// let only_create = |p: Option<&str>| p.map_or(true, |p| p == "job.create");
/// let filtered = filter_menu(&menu, only_create);
/// assert_eq!(filtered[0].id, "a");
/// assert_eq!(filtered[0].children[0].id, "b");
///
/// assert!(filter_menu(&menu, |_| false).is_empty());
/// ```
pub fn filter_menu<F>(nodes: &[MenuNode], checker: F) -> Vec<MenuNode>
where
    F: Fn(Option<&str>) -> bool,
{
    let filtered = filter_nodes(nodes, &checker);
    debug!(source = count_nodes(nodes), kept = count_nodes(&filtered), "Filtered menu tree");
    filtered
}

fn filter_nodes<F>(nodes: &[MenuNode], checker: &F) -> Vec<MenuNode>
where
    F: Fn(Option<&str>) -> bool,
{
    let mut out = Vec::with_capacity(nodes.len());
    for node in nodes {
        let children = filter_nodes(&node.children, checker);
        let allowed = checker(node.permission.as_deref());
        if allowed || !children.is_empty() {
            out.push(node.with_filtered_children(children));
        }
    }
    out
}

/// Count every node in a tree.
pub fn count_nodes(nodes: &[MenuNode]) -> usize {
    nodes.iter().map(|n| 1 + count_nodes(&n.children)).sum()
}

/// Find the first node (depth-first, in order) whose `href` equals `href`.
pub fn find_by_href<'a>(nodes: &'a [MenuNode], href: &str) -> Option<&'a MenuNode> {
    for node in nodes {
        if node.href == href {
            return Some(node);
        }
        if let Some(found) = find_by_href(&node.children, href) {
            return Some(found);
        }
    }
    None
}

/// Check every permission string in a tree with the strict parser.
///
/// # Errors
///
/// [`AccessError::InvalidMenu`] naming the first offending node, in
/// depth-first order.
///
/// # Examples
///
/// ```
/// use recruit_access::{menu::validate_menu, MenuNode};
///
/// let ok = vec![MenuNode::new("users", "Users", "/users").with_permission("user.read")];
/// assert!(validate_menu(&ok).is_ok());
///
/// let bad = vec![MenuNode::new("users", "Users", "/users").with_permission("users")];
/// assert!(validate_menu(&bad).is_err());
/// ```
pub fn validate_menu(nodes: &[MenuNode]) -> AccessResult<()> {
    for node in nodes {
        parse_permission_strict(node.permission.as_deref()).map_err(|err| AccessError::InvalidMenu {
            node_id: node.id.clone(),
            source: Box::new(err),
        })?;
        validate_menu(&node.children)?;
    }
    Ok(())
}

/// The portal's stock navigation for a role.
///
/// Entries a role could never open are left out up front; the evaluator
/// still filters the list.
pub fn default_menus_for(role: Role) -> Vec<MenuNode> {
    let mut menus = vec![
        MenuNode::new("dashboard", "Dashboard", "/dashboard").with_permission("dashboard.read"),
        MenuNode::new("jobs", "Jobs", "/jobs").with_permission("job.read"),
    ];

    if matches!(role, Role::Recruiter | Role::Admin) {
        menus.push(MenuNode::new("create-job", "Create Job", "/jobs/new").with_permission("job.create"));
        menus.push(
            MenuNode::new("applications", "Applications", "/applications")
                .with_permission("application.read"),
        );
    }

    if role.is_admin() {
        menus.push(MenuNode::new("users", "Users", "/users").with_permission("user.read"));
    }

    menus
}
