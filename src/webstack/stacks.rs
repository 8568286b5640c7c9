// SPDX-License-Identifier: MIT
//! Fixed conventions table for the supported web stacks.
//!
//! A stack id selects a framework, language, styling approach, persistence
//! layer, auth story, and deployment target. Phase 1 embeds these in its
//! system prompt; phase 2 dispatches on them to render the scaffold.

/// Declared conventions for one web stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackConventions {
    pub id: &'static str,
    pub framework: &'static str,
    pub language: &'static str,
    pub styling: &'static str,
    pub persistence: &'static str,
    pub auth: &'static str,
    pub deploy_target: &'static str,
    /// Fixed config files every scaffold on this stack contains. Their
    /// count feeds the file-manifest length invariant.
    pub config_files: &'static [&'static str],
}

/// Stack used when a web generation request names none.
pub const DEFAULT_STACK: &str = "react-vite";

static STACKS: [StackConventions; 3] = [
    StackConventions {
        id: "react-vite",
        framework: "React 18 + Vite 5",
        language: "TypeScript",
        styling: "CSS modules",
        persistence: "localStorage",
        auth: "none",
        deploy_target: "static hosting",
        config_files: &["package.json", "vite.config.ts", "tsconfig.json", "index.html"],
    },
    StackConventions {
        id: "nextjs-tailwind",
        framework: "Next.js 14 (App Router)",
        language: "TypeScript",
        styling: "Tailwind CSS",
        persistence: "server actions + SQLite",
        auth: "next-auth",
        deploy_target: "Vercel",
        config_files: &[
            "package.json",
            "next.config.mjs",
            "tailwind.config.ts",
            "tsconfig.json",
        ],
    },
    StackConventions {
        id: "express-prisma",
        framework: "Express 4",
        language: "TypeScript",
        styling: "none (API only)",
        persistence: "Prisma + PostgreSQL",
        auth: "JWT bearer tokens",
        deploy_target: "Docker",
        config_files: &[
            "package.json",
            "tsconfig.json",
            "prisma/schema.prisma",
            ".env.example",
        ],
    },
];

/// All supported stacks.
pub fn all() -> &'static [StackConventions] {
    &STACKS
}

/// Look up a stack by id.
pub fn find(id: &str) -> Option<&'static StackConventions> {
    STACKS.iter().find(|s| s.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_stack_is_registered() {
        assert!(find(DEFAULT_STACK).is_some());
    }

    #[test]
    fn unknown_stack_is_none() {
        assert!(find("rails-hotwire").is_none());
    }

    #[test]
    fn every_stack_carries_config_files() {
        for stack in all() {
            assert!(
                !stack.config_files.is_empty(),
                "{} has no config files",
                stack.id
            );
        }
    }
}
