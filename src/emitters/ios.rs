// SPDX-License-Identifier: MIT
//! iOS target instruction block.

/// Fixed instruction block appended to the serialized model for iOS.
pub const INSTRUCTIONS: &str = "\
Generate a complete iOS application implementing the application model above.

Conventions:
- SwiftUI with Swift 5.10, iOS 17 minimum deployment target
- NavigationStack for stack navigation, TabView for tab navigation
- @Observable view models, one per screen
- Codable structs for the data models, matching field names exactly
- Colors and typography from the model's theme, defined in a Theme.swift
- SF Symbols for icons

Respond with the Swift source files only, each preceded by a \
`// FILE: <path>` comment line. No explanations.";
