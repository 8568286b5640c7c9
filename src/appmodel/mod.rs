// SPDX-License-Identifier: MIT
//! Canonical application model — the backend-independent structural
//! description of one generated application.
//!
//! An `AppModel` is produced once per generation request (by the model
//! builder, or as `AppModel::minimal` when the backend response does not
//! parse) and is read-only from then on: emitters and the orchestrator
//! receive `&AppModel` and never mutate it.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ─── Targets ─────────────────────────────────────────────────────────────────

/// A deployment surface the daemon can emit source text for.
///
/// The wire form is the lowercase target id (`"ios"`, `"android"`,
/// `"flutter"`, `"web"`); anything else fails request deserialization.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    Ios,
    Android,
    Flutter,
    Web,
}

impl Target {
    pub fn as_str(&self) -> &'static str {
        match self {
            Target::Ios => "ios",
            Target::Android => "android",
            Target::Flutter => "flutter",
            Target::Web => "web",
        }
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// All supported targets, in canonical reporting order.
pub const ALL_TARGETS: [Target; 4] = [Target::Ios, Target::Android, Target::Flutter, Target::Web];

// ─── Navigation ──────────────────────────────────────────────────────────────

/// Top-level navigation container shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavigationType {
    Stack,
    Tab,
    Split,
    Drawer,
}

/// One entry in the navigation tree.
///
/// An item either names a screen (`screen`) or carries a nested item list
/// (`children`) — never neither.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationItem {
    pub id: String,
    pub label: String,
    /// Screen id this item navigates to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screen: Option<String>,
    /// Nested items (e.g. a drawer section).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<NavigationItem>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationConfig {
    #[serde(rename = "type")]
    pub kind: NavigationType,
    #[serde(default)]
    pub items: Vec<NavigationItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_route: Option<String>,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            kind: NavigationType::Stack,
            items: Vec::new(),
            initial_route: None,
        }
    }
}

// ─── Theme ───────────────────────────────────────────────────────────────────

/// Color palette. The six named keys are always present; additional named
/// colors land in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorPalette {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub background: String,
    pub surface: String,
    pub text: String,
    #[serde(flatten)]
    pub extra: HashMap<String, String>,
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self {
            primary: "#6366F1".into(),
            secondary: "#8B5CF6".into(),
            accent: "#F59E0B".into(),
            background: "#FFFFFF".into(),
            surface: "#F3F4F6".into(),
            text: "#111827".into(),
            extra: HashMap::new(),
        }
    }
}

/// Typography sizes in logical pixels.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Typography {
    pub heading: u32,
    pub body: u32,
    pub caption: u32,
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            heading: 24,
            body: 16,
            caption: 12,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Theme {
    pub colors: ColorPalette,
    pub typography: Typography,
    /// Spacing scale in logical pixels, smallest first.
    pub spacing: Vec<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corner_radius: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadows: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dark_mode: Option<bool>,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            colors: ColorPalette::default(),
            typography: Typography::default(),
            spacing: vec![4, 8, 16, 24, 32],
            corner_radius: None,
            shadows: None,
            dark_mode: None,
        }
    }
}

// ─── Components & screens ────────────────────────────────────────────────────

/// How a component property is bound to data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BindingKind {
    State,
    Constant,
    Computed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Binding {
    #[serde(rename = "type")]
    pub kind: BindingKind,
    /// State variable name, literal value, or computed expression,
    /// depending on `kind`.
    pub value: serde_json::Value,
}

/// A UI component. `kind` is an open vocabulary string tag ("text",
/// "button", "list", …), not a closed enum — unknown tags pass through to
/// the emitters untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub properties: serde_json::Map<String, serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Component>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bindings: Option<HashMap<String, Binding>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Screen {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub components: Vec<Component>,
    /// Screen id to navigate to on the screen's primary action.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub navigate_to: Option<String>,
    /// Screen-scoped state declarations.
    #[serde(default)]
    pub state: Vec<StateVariable>,
}

// ─── Data models & state ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Number,
    Boolean,
    Date,
    Datetime,
    Array,
    Object,
    Image,
    File,
    Reference,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FieldType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RelationKind {
    OneToOne,
    OneToMany,
    ManyToMany,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    /// Name of the related data model.
    pub to: String,
    #[serde(rename = "type")]
    pub kind: RelationKind,
}

/// A named record schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataModel {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StateScope {
    Global,
    Screen,
    Component,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateVariable {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FieldType,
    pub scope: StateScope,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
}

// ─── Features & permissions ──────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureFlag {
    pub id: String,
    pub enabled: bool,
    /// Restrict the feature to one target; `None` = all targets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<Target>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Permission {
    pub id: String,
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<Target>,
}

// ─── AppModel ────────────────────────────────────────────────────────────────

/// The single source of truth for one generation session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppModel {
    #[serde(default = "new_model_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub targets: Vec<Target>,
    #[serde(default)]
    pub screens: Vec<Screen>,
    #[serde(default)]
    pub navigation: NavigationConfig,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default)]
    pub data_models: Vec<DataModel>,
    /// Global-scoped state variables. Screen/component state lives on the
    /// screens themselves.
    #[serde(default)]
    pub state: Vec<StateVariable>,
    #[serde(default)]
    pub features: Vec<FeatureFlag>,
    #[serde(default)]
    pub permissions: Vec<Permission>,
}

fn new_model_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

impl AppModel {
    /// The documented parse-failure fallback: empty screens, stack
    /// navigation, default palette, the caller's literal prompt as the
    /// description, targets copied from the request.
    ///
    /// This shape is load-bearing — the builder substitutes it instead of
    /// failing when the backend response does not parse, so it must always
    /// satisfy the model invariants.
    pub fn minimal(prompt: &str, targets: &[Target]) -> Self {
        Self {
            id: new_model_id(),
            name: "Untitled App".into(),
            description: prompt.to_string(),
            targets: targets.to_vec(),
            screens: Vec::new(),
            navigation: NavigationConfig::default(),
            theme: Theme::default(),
            data_models: Vec::new(),
            state: Vec::new(),
            features: Vec::new(),
            permissions: Vec::new(),
        }
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_model_satisfies_invariants() {
        let m = AppModel::minimal("todo app", &[Target::Ios, Target::Web]);
        assert_eq!(m.description, "todo app");
        assert_eq!(m.targets, vec![Target::Ios, Target::Web]);
        assert!(m.screens.is_empty());
        assert_eq!(m.navigation.kind, NavigationType::Stack);
        // Six required palette keys are non-empty.
        let c = &m.theme.colors;
        for key in [
            &c.primary,
            &c.secondary,
            &c.accent,
            &c.background,
            &c.surface,
            &c.text,
        ] {
            assert!(key.starts_with('#'), "palette key should be a hex color");
        }
    }

    #[test]
    fn parses_sparse_backend_json() {
        let json = r#"{
            "name": "Todo",
            "description": "A todo app",
            "screens": [{
                "id": "s1",
                "name": "Home",
                "components": [{
                    "id": "c1",
                    "type": "list",
                    "properties": { "itemsPerPage": 20 },
                    "bindings": { "items": { "type": "state", "value": "todos" } }
                }]
            }],
            "navigation": { "type": "tab", "items": [
                { "id": "n1", "label": "Home", "screen": "s1" }
            ]},
            "dataModels": [{
                "name": "Todo",
                "fields": [
                    { "name": "title", "type": "string" },
                    { "name": "done", "type": "boolean" }
                ],
                "relationships": [{ "to": "User", "type": "one-to-many" }]
            }]
        }"#;
        let m: AppModel = serde_json::from_str(json).expect("sparse model should parse");
        assert_eq!(m.name, "Todo");
        assert_eq!(m.screens.len(), 1);
        assert_eq!(m.screens[0].components[0].kind, "list");
        assert_eq!(m.navigation.kind, NavigationType::Tab);
        assert_eq!(m.data_models[0].relationships[0].kind, RelationKind::OneToMany);
        // id is synthesized when the backend omits it
        assert!(!m.id.is_empty());
    }

    #[test]
    fn unknown_target_id_is_rejected() {
        let err = serde_json::from_str::<Target>("\"desktop\"");
        assert!(err.is_err(), "unrecognized target id must fail to parse");
    }
}
