// SPDX-License-Identifier: MIT
//! Model review — a downstream consumer of the application model, offered
//! as a library surface. The orchestrator never calls this; callers may
//! wire it in after receiving a generation result.

use serde::{Deserialize, Serialize};

use crate::appmodel::{AppModel, Target};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Fails validity.
    Issue,
    /// Never fails validity, but caps the score.
    Warning,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewIssue {
    pub category: String,
    pub severity: Severity,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewVerdict {
    pub passed: bool,
    pub score: u32,
    pub issues: Vec<ReviewIssue>,
}

/// Score rule: 100 with zero issues and zero warnings, otherwise
/// `round(100 × warnings / (issues + warnings))`.
pub fn score(issues: u32, warnings: u32) -> u32 {
    if issues == 0 && warnings == 0 {
        return 100;
    }
    let total = issues + warnings;
    ((100.0 * f64::from(warnings)) / f64::from(total)).round() as u32
}

/// Review `app` for emission on `target`.
pub fn review(app: &AppModel, target: Target) -> ReviewVerdict {
    let mut findings = Vec::new();

    check_theme(app, &mut findings);
    check_screens(app, &mut findings);
    check_navigation(app, &mut findings);
    check_data_models(app, &mut findings);
    check_affinity(app, target, &mut findings);

    let issues = findings
        .iter()
        .filter(|f| f.severity == Severity::Issue)
        .count() as u32;
    let warnings = findings.len() as u32 - issues;

    ReviewVerdict {
        passed: issues == 0,
        score: score(issues, warnings),
        issues: findings,
    }
}

fn check_theme(app: &AppModel, findings: &mut Vec<ReviewIssue>) {
    let c = &app.theme.colors;
    for (name, value) in [
        ("primary", &c.primary),
        ("secondary", &c.secondary),
        ("accent", &c.accent),
        ("background", &c.background),
        ("surface", &c.surface),
        ("text", &c.text),
    ] {
        if value.trim().is_empty() {
            findings.push(ReviewIssue {
                category: "theme".into(),
                severity: Severity::Issue,
                message: format!("required palette key '{name}' is empty"),
            });
        }
    }
}

fn check_screens(app: &AppModel, findings: &mut Vec<ReviewIssue>) {
    if app.screens.is_empty() {
        findings.push(ReviewIssue {
            category: "screens".into(),
            severity: Severity::Warning,
            message: "model has no screens".into(),
        });
    }
    for screen in &app.screens {
        if screen.name.trim().is_empty() {
            findings.push(ReviewIssue {
                category: "screens".into(),
                severity: Severity::Issue,
                message: format!("screen '{}' has an empty name", screen.id),
            });
        }
    }
}

fn check_navigation(app: &AppModel, findings: &mut Vec<ReviewIssue>) {
    let screen_ids: Vec<&str> = app.screens.iter().map(|s| s.id.as_str()).collect();
    check_nav_items(&app.navigation.items, &screen_ids, findings);
}

fn check_nav_items(
    items: &[crate::appmodel::NavigationItem],
    screen_ids: &[&str],
    findings: &mut Vec<ReviewIssue>,
) {
    for item in items {
        let has_children = item.children.as_ref().is_some_and(|c| !c.is_empty());
        match &item.screen {
            None if !has_children => findings.push(ReviewIssue {
                category: "navigation".into(),
                severity: Severity::Issue,
                message: format!(
                    "navigation item '{}' names no screen and has no children",
                    item.id
                ),
            }),
            Some(screen) if !screen_ids.contains(&screen.as_str()) => {
                findings.push(ReviewIssue {
                    category: "navigation".into(),
                    severity: Severity::Warning,
                    message: format!(
                        "navigation item '{}' references unknown screen '{screen}'",
                        item.id
                    ),
                });
            }
            _ => {}
        }
        if let Some(children) = &item.children {
            check_nav_items(children, screen_ids, findings);
        }
    }
}

fn check_data_models(app: &AppModel, findings: &mut Vec<ReviewIssue>) {
    let names: Vec<&str> = app.data_models.iter().map(|m| m.name.as_str()).collect();
    for model in &app.data_models {
        for rel in &model.relationships {
            if !names.contains(&rel.to.as_str()) {
                findings.push(ReviewIssue {
                    category: "data".into(),
                    severity: Severity::Warning,
                    message: format!(
                        "model '{}' relates to unknown model '{}'",
                        model.name, rel.to
                    ),
                });
            }
        }
    }
}

fn check_affinity(app: &AppModel, target: Target, findings: &mut Vec<ReviewIssue>) {
    for feature in &app.features {
        if feature.enabled && feature.target.is_some_and(|t| t != target) {
            findings.push(ReviewIssue {
                category: "features".into(),
                severity: Severity::Warning,
                message: format!(
                    "feature '{}' is pinned to a different target",
                    feature.id
                ),
            });
        }
    }
    for permission in &app.permissions {
        if permission.required && permission.target.is_some_and(|t| t != target) {
            findings.push(ReviewIssue {
                category: "permissions".into(),
                severity: Severity::Warning,
                message: format!(
                    "required permission '{}' is pinned to a different target",
                    permission.id
                ),
            });
        }
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appmodel::{NavigationItem, Screen};

    #[test]
    fn score_rule() {
        assert_eq!(score(0, 0), 100);
        assert_eq!(score(1, 0), 0);
        assert_eq!(score(1, 1), 50);
        assert_eq!(score(2, 1), 33);
        assert_eq!(score(1, 2), 67);
    }

    #[test]
    fn clean_model_passes_with_warning_for_no_screens() {
        let app = AppModel::minimal("x", &[Target::Ios]);
        let verdict = review(&app, Target::Ios);
        // No screens is a warning, not an issue — still valid.
        assert!(verdict.passed);
        assert!(verdict.score <= 100);
        assert_eq!(verdict.issues.len(), 1);
        assert_eq!(verdict.issues[0].severity, Severity::Warning);
    }

    #[test]
    fn dangling_navigation_reference_warns() {
        let mut app = AppModel::minimal("x", &[Target::Ios]);
        app.screens.push(Screen {
            id: "s1".into(),
            name: "Home".into(),
            components: Vec::new(),
            navigate_to: None,
            state: Vec::new(),
        });
        app.navigation.items.push(NavigationItem {
            id: "n1".into(),
            label: "Ghost".into(),
            screen: Some("missing".into()),
            children: None,
        });
        let verdict = review(&app, Target::Ios);
        assert!(verdict.passed, "warnings alone never fail validity");
        assert!(verdict
            .issues
            .iter()
            .any(|i| i.category == "navigation" && i.severity == Severity::Warning));
    }

    #[test]
    fn empty_navigation_item_is_an_issue() {
        let mut app = AppModel::minimal("x", &[Target::Web]);
        app.navigation.items.push(NavigationItem {
            id: "n1".into(),
            label: "Dead".into(),
            screen: None,
            children: None,
        });
        let verdict = review(&app, Target::Web);
        assert!(!verdict.passed);
    }
}
