// SPDX-License-Identifier: MIT
//! Flutter (cross-platform) target instruction block.

/// Fixed instruction block appended to the serialized model for Flutter.
pub const INSTRUCTIONS: &str = "\
Generate a complete Flutter application implementing the application model above.

Conventions:
- Dart 3 with Flutter 3.22, Material 3 widgets
- Riverpod for state management, one provider per state variable scope
- go_router for navigation, routes mirroring the navigation config
- freezed data classes for the data models
- ThemeData built from the model's theme colors and typography

Respond with the Dart source files only, each preceded by a \
`// FILE: <path>` comment line. No explanations.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_target_idioms() {
        assert!(INSTRUCTIONS.contains("Riverpod"));
        assert!(INSTRUCTIONS.contains("go_router"));
    }
}
