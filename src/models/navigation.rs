// src/models/navigation.rs

use serde::Serialize;
use utoipa::ToSchema;

/// Regra de casamento de caminho. `{region}` é trocado pela chave da região.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavPattern {
    Exact(&'static str),
    Prefix(&'static str),
}

impl NavPattern {
    fn template(&self) -> &'static str {
        match self {
            NavPattern::Exact(t) | NavPattern::Prefix(t) => t,
        }
    }

    pub fn expand(&self, region_key: &str) -> String {
        self.template().replace("{region}", region_key)
    }

    /// Especificidade do casamento, ou `None` se não casa.
    ///
    /// Exato vence prefixo; entre iguais, o padrão mais longo vence.
    /// O desempate final (ordem de declaração) é de quem chama.
    pub fn specificity(&self, path: &str, region_key: &str) -> Option<(u8, usize)> {
        let pattern = self.expand(region_key);
        let path = normalize(path);
        let pattern = normalize(&pattern);

        match self {
            NavPattern::Exact(_) => (path == pattern).then_some((2, pattern.len())),
            NavPattern::Prefix(_) => {
                // casa por segmento inteiro: "/a/bed" não casa "/a/beds"
                let hit = path == pattern
                    || path
                        .strip_prefix(pattern)
                        .is_some_and(|rest| rest.starts_with('/') || pattern == "/");
                hit.then_some((1, pattern.len()))
            }
        }
    }
}

fn normalize(path: &str) -> &str {
    match path.trim_end_matches('/') {
        "" => "/",
        p => p,
    }
}

#[derive(Debug, Clone)]
pub struct SubNavItem {
    pub name: &'static str,
    pub href: &'static str,
    pub pattern: NavPattern,
    pub required_permission: Option<&'static str>,
}

#[derive(Debug, Clone)]
pub struct NavItem {
    pub name: &'static str,
    pub href: &'static str,
    pub icon: Option<&'static str>,
    pub pattern: NavPattern,
    pub required_permission: Option<&'static str>,
    pub required_feature: Option<&'static str>,
    pub sub_items: Vec<SubNavItem>,
}

// --- O que vai para o cliente ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubNavEntry {
    pub name: String,
    pub href: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NavEntry {
    pub name: String,
    pub href: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub active: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sub_items: Vec<SubNavEntry>,
}
