//! Static registry of the available site templates.

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct TemplateInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

const TEMPLATES: &[TemplateInfo] = &[
    TemplateInfo {
        id: "professional",
        name: "Professional",
        description: "Clean corporate layout with hero, services grid, and contact form",
    },
    TemplateInfo {
        id: "basic-ac-service",
        name: "Basic Service Business",
        description: "Single-page layout for local service businesses",
    },
];

pub fn all() -> &'static [TemplateInfo] {
    TEMPLATES
}

pub fn exists(id: &str) -> bool {
    TEMPLATES.iter().any(|t| t.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_knows_its_templates() {
        assert!(exists("professional"));
        assert!(exists("basic-ac-service"));
        assert!(!exists("missing"));
        assert_eq!(all().len(), 2);
    }
}
