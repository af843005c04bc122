//! Built-in starter templates

/// A starter template hosted in a remote repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    /// Human readable label shown in the picker
    pub label: &'static str,
    /// Repository reference relative to the git host, e.g. `owner/repo`
    pub source: &'static str,
}

impl Template {
    /// Full clone URL for this template on the given host
    pub fn remote_url(&self, host: &str) -> String {
        format!("{}/{}", host.trim_end_matches('/'), self.source)
    }
}

const BUILTIN_TEMPLATES: [Template; 2] = [
    Template {
        label: "React + Vite + Electron",
        source: "kimkanu/react-vite-electron",
    },
    Template {
        label: "Ultrajs Starter",
        source: "kimkanu/ultrajs-starter",
    },
];

/// Get all built-in templates, in display order
pub fn get_builtin_templates() -> &'static [Template] {
    &BUILTIN_TEMPLATES
}
