//! Canonical capability catalog
//!
//! The single source of truth for the deployment's routable
//! capabilities and their capability→handler mapping. The generation
//! and validation collaborators are pure read-only consumers of this
//! catalog; the list is never duplicated anywhere else.

/// Handler used when a capability has no explicit mapping
pub const DEFAULT_HANDLER: &str = "orchestrator";

/// Tool identifiers granted to every generated entry
pub const DEFAULT_CAPABILITIES: &[&str] = &["read", "grep", "shell"];

/// All routable capability names, in manifest declaration order
pub const CAPABILITIES: &[&str] = &[
    "allpagelogic",
    "api-patterns",
    "app-builder",
    "architecture",
    "bash-linux",
    "behavioral-modes",
    "brainstorming",
    "clean-code",
    "code-review-checklist",
    "competitor-analysis",
    "database-design",
    "deployment-procedures",
    "documentation-templates",
    "docx",
    "flutter",
    "frontend-design",
    "game-development",
    "geo-fundamentals",
    "i18n-localization",
    "intelligent-routing",
    "lint-and-validate",
    "mcp-builder",
    "mobile-design",
    "nextjs-react-expert",
    "nodejs-best-practices",
    "parallel-agents",
    "pdf",
    "performance-profiling",
    "plan-writing",
    "powershell-windows",
    "python-patterns",
    "red-team-tactics",
    "seo-fundamentals",
    "server-management",
    "skill-creator",
    "systematic-debugging",
    "tailwind-patterns",
    "tdd-workflow",
    "testing-patterns",
    "ui-ux-pro-max",
    "vulnerability-scanner",
    "web-design-guidelines",
    "webapp-testing",
    "xlsx",
];

/// Specialist handler for a capability
///
/// Unmapped capabilities route to the orchestrator itself.
pub fn handler_for(capability: &str) -> &'static str {
    match capability {
        "allpagelogic" => "frontend-specialist",
        "database-design" => "database-architect",
        "flutter" => "mobile-developer",
        "frontend-design" => "frontend-specialist",
        "ui-ux-pro-max" => "frontend-specialist",
        "nextjs-react-expert" => "frontend-specialist",
        "tailwind-patterns" => "frontend-specialist",
        "api-patterns" => "backend-specialist",
        "nodejs-best-practices" => "backend-specialist",
        "python-patterns" => "backend-specialist",
        "mcp-builder" => "backend-specialist",
        "systematic-debugging" => "debugger",
        "deployment-procedures" => "devops-engineer",
        "bash-linux" => "devops-engineer",
        "powershell-windows" => "devops-engineer",
        "server-management" => "devops-engineer",
        "red-team-tactics" => "penetration-tester",
        "vulnerability-scanner" => "security-auditor",
        "seo-fundamentals" => "seo-specialist",
        "geo-fundamentals" => "seo-specialist",
        "testing-patterns" => "test-engineer",
        "tdd-workflow" => "test-engineer",
        "webapp-testing" => "qa-automation-engineer",
        "lint-and-validate" => "qa-automation-engineer",
        "architecture" => "project-planner",
        "plan-writing" => "project-planner",
        "brainstorming" => "project-planner",
        "game-development" => "game-developer",
        "mobile-design" => "mobile-developer",
        _ => DEFAULT_HANDLER,
    }
}

/// Leading keyword of a capability name (text before the first hyphen)
pub fn keyword(capability: &str) -> &str {
    capability.split('-').next().unwrap_or(capability)
}
