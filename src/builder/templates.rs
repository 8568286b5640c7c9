// SPDX-License-Identifier: MIT
//! Built-in app templates.
//!
//! Each template names a feature set the model builder folds into its
//! request prompt. Templates are intentionally minimal — just enough to
//! seed a useful model — leaving room for the caller's own description to
//! add real requirements.

use serde::{Deserialize, Serialize};

use crate::appmodel::{Target, ALL_TARGETS};

/// A named starter template.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppTemplate {
    /// Machine-readable key (e.g. `"todo"`).
    pub id: String,
    /// Human-readable name shown in the picker.
    pub name: String,
    /// One-line description.
    pub description: String,
    /// Features folded into the synthesized request prompt.
    pub features: Vec<String>,
    /// Targets the template is known to work well on.
    pub targets: Vec<Target>,
}

/// Return all built-in templates.
pub fn all() -> Vec<AppTemplate> {
    vec![todo(), notes(), chat(), shop()]
}

/// Find a template by its machine-readable `id`.
pub fn find(id: &str) -> Option<AppTemplate> {
    all().into_iter().find(|t| t.id == id)
}

fn todo() -> AppTemplate {
    AppTemplate {
        id: "todo".into(),
        name: "Todo List".into(),
        description: "a task manager with lists, due dates, and reminders".into(),
        features: vec![
            "task list with completion toggles".into(),
            "due dates and reminders".into(),
            "tags and filtering".into(),
            "local persistence".into(),
        ],
        targets: ALL_TARGETS.to_vec(),
    }
}

fn notes() -> AppTemplate {
    AppTemplate {
        id: "notes".into(),
        name: "Notes".into(),
        description: "a freeform note-taking app with search".into(),
        features: vec![
            "rich text notes".into(),
            "full-text search".into(),
            "folders and pinning".into(),
        ],
        targets: ALL_TARGETS.to_vec(),
    }
}

fn chat() -> AppTemplate {
    AppTemplate {
        id: "chat".into(),
        name: "Chat".into(),
        description: "a realtime messaging app with channels".into(),
        features: vec![
            "direct messages and channels".into(),
            "presence indicators".into(),
            "push notifications".into(),
            "image attachments".into(),
        ],
        targets: vec![Target::Ios, Target::Android, Target::Flutter],
    }
}

fn shop() -> AppTemplate {
    AppTemplate {
        id: "shop".into(),
        name: "Storefront".into(),
        description: "a small e-commerce storefront with a cart".into(),
        features: vec![
            "product catalog with categories".into(),
            "cart and checkout flow".into(),
            "order history".into(),
        ],
        targets: ALL_TARGETS.to_vec(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_known_template() {
        let t = find("todo").expect("todo exists");
        assert_eq!(t.name, "Todo List");
        assert!(!t.features.is_empty());
    }

    #[test]
    fn unknown_id_is_none() {
        assert!(find("does-not-exist").is_none());
    }

    #[test]
    fn template_ids_are_unique() {
        let templates = all();
        let mut ids: Vec<&str> = templates.iter().map(|t| t.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), templates.len());
    }
}
