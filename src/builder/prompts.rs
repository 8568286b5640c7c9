// SPDX-License-Identifier: MIT
//! System prompts for the model builder.

use super::templates::AppTemplate;

/// System prompt declaring the exact JSON shape of an `AppModel`.
///
/// The shape mirrors `crate::appmodel` field for field; keep the two in
/// sync when the model grows.
pub const APP_MODEL_SYSTEM: &str = r##"You convert an app description into a structural application model.

Respond with a single JSON object of this exact shape and nothing else — no prose, no markdown fences:

{
  "name": "<app name>",
  "description": "<one-sentence description>",
  "screens": [{
    "id": "<screen id>",
    "name": "<screen name>",
    "components": [{
      "id": "<component id>",
      "type": "<component type: text | button | list | image | input | form | card | ...>",
      "properties": { "<key>": <value> },
      "children": [ ...nested components... ],
      "bindings": { "<property>": { "type": "state" | "constant" | "computed", "value": <binding value> } }
    }],
    "navigateTo": "<screen id or omit>",
    "state": [{ "id": "...", "name": "...", "type": "string", "scope": "screen" }]
  }],
  "navigation": {
    "type": "stack" | "tab" | "split" | "drawer",
    "items": [{ "id": "...", "label": "...", "screen": "<screen id>" }],
    "initialRoute": "<screen id or omit>"
  },
  "theme": {
    "colors": { "primary": "#RRGGBB", "secondary": "#RRGGBB", "accent": "#RRGGBB", "background": "#RRGGBB", "surface": "#RRGGBB", "text": "#RRGGBB" },
    "typography": { "heading": 24, "body": 16, "caption": 12 },
    "spacing": [4, 8, 16, 24, 32]
  },
  "dataModels": [{
    "name": "...",
    "fields": [{ "name": "...", "type": "string" | "number" | "boolean" | "date" | "datetime" | "array" | "object" | "image" | "file" | "reference" }],
    "relationships": [{ "to": "<model name>", "type": "one-to-one" | "one-to-many" | "many-to-many" }]
  }],
  "state": [{ "id": "...", "name": "...", "type": "string", "scope": "global" }],
  "features": [{ "id": "...", "enabled": true }],
  "permissions": [{ "id": "...", "required": false }]
}

Every navigation item must either name a screen or carry nested items. The six color keys are mandatory. Respond with the structure only, no prose."##;

/// Synthesize the request prompt for a catalog template, folding in the
/// caller's own description.
pub fn template_prompt(template: &AppTemplate, extra: &str) -> String {
    let mut prompt = format!(
        "Build {}: {}. Include these features: {}.",
        template.name,
        template.description,
        template.features.join(", ")
    );
    if !extra.trim().is_empty() {
        prompt.push_str(" Additional requirements: ");
        prompt.push_str(extra.trim());
    }
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::templates;

    #[test]
    fn system_prompt_declares_required_palette_keys() {
        for key in ["primary", "secondary", "accent", "background", "surface", "text"] {
            assert!(APP_MODEL_SYSTEM.contains(key), "missing palette key {key}");
        }
        assert!(APP_MODEL_SYSTEM.contains("no prose"));
    }

    #[test]
    fn template_prompt_lists_features() {
        let t = templates::find("todo").expect("todo template exists");
        let p = template_prompt(&t, "dark mode please");
        for feature in &t.features {
            assert!(p.contains(feature));
        }
        assert!(p.contains("dark mode please"));
    }
}
