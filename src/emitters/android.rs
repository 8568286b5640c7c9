// SPDX-License-Identifier: MIT
//! Android target instruction block.

/// Fixed instruction block appended to the serialized model for Android.
pub const INSTRUCTIONS: &str = "\
Generate a complete Android application implementing the application model above.

Conventions:
- Kotlin 2.0 with Jetpack Compose, Material 3
- Navigation Compose for the navigation graph
- One ViewModel per screen (androidx.lifecycle), StateFlow for state
- Kotlinx.serialization data classes for the data models
- Colors and typography from the model's theme, defined in ui/theme/
- Minimum SDK 26

Respond with the Kotlin source files only, each preceded by a \
`// FILE: <path>` comment line. No explanations.";
