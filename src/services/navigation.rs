// src/services/navigation.rs

use crate::models::{
    navigation::{NavEntry, NavItem, NavPattern, SubNavEntry, SubNavItem},
    tenancy::TenantContext,
};

/// Menu principal, na ordem em que aparece. A ordem também desempata
/// casamentos de mesma especificidade.
pub fn menu() -> Vec<NavItem> {
    vec![
        NavItem {
            name: "Dashboard",
            href: "/{region}/dashboard",
            icon: Some("home"),
            pattern: NavPattern::Exact("/{region}/dashboard"),
            required_permission: None,
            required_feature: None,
            sub_items: Vec::new(),
        },
        NavItem {
            name: "Residents",
            href: "/{region}/residents",
            icon: Some("users"),
            pattern: NavPattern::Prefix("/{region}/residents"),
            required_permission: Some("residents:read"),
            required_feature: None,
            sub_items: Vec::new(),
        },
        NavItem {
            name: "Staff",
            href: "/{region}/staff",
            icon: Some("id-card"),
            pattern: NavPattern::Prefix("/{region}/staff"),
            required_permission: Some("staff:read"),
            required_feature: None,
            sub_items: vec![
                SubNavItem {
                    name: "Rota",
                    href: "/{region}/staff/scheduling",
                    pattern: NavPattern::Prefix("/{region}/staff/scheduling"),
                    required_permission: Some("scheduling:read"),
                },
                SubNavItem {
                    name: "Training",
                    href: "/{region}/staff/training",
                    pattern: NavPattern::Prefix("/{region}/staff/training"),
                    required_permission: None,
                },
            ],
        },
        NavItem {
            name: "Compliance",
            href: "/{region}/compliance",
            icon: Some("shield"),
            pattern: NavPattern::Prefix("/{region}/compliance"),
            required_permission: Some("compliance:read"),
            required_feature: Some("compliance"),
            sub_items: Vec::new(),
        },
        NavItem {
            name: "Billing",
            href: "/{region}/billing",
            icon: Some("receipt"),
            pattern: NavPattern::Prefix("/{region}/billing"),
            required_permission: Some("billing:read"),
            required_feature: Some("accounting"),
            sub_items: vec![SubNavItem {
                name: "Bank import",
                href: "/{region}/billing/bank-import",
                pattern: NavPattern::Exact("/{region}/billing/bank-import"),
                required_permission: Some("billing:write"),
            }],
        },
        NavItem {
            name: "Bed management",
            href: "/{region}/bed-management",
            icon: Some("bed"),
            pattern: NavPattern::Prefix("/{region}/bed-management"),
            required_permission: Some("beds:read"),
            required_feature: Some("bed-management"),
            sub_items: vec![
                SubNavItem {
                    name: "Overview",
                    href: "/{region}/bed-management",
                    pattern: NavPattern::Exact("/{region}/bed-management"),
                    required_permission: None,
                },
                SubNavItem {
                    name: "Status",
                    href: "/{region}/bed-management/status",
                    pattern: NavPattern::Prefix("/{region}/bed-management/status"),
                    required_permission: None,
                },
                SubNavItem {
                    name: "Maintenance",
                    href: "/{region}/bed-management/maintenance",
                    pattern: NavPattern::Prefix("/{region}/bed-management/maintenance"),
                    required_permission: Some("beds:maintain"),
                },
            ],
        },
    ]
}

fn allowed(ctx: &TenantContext, permission: Option<&str>, feature: Option<&str>) -> bool {
    permission.is_none_or(|p| ctx.has_permission(p)) && feature.is_none_or(|f| ctx.has_feature(f))
}

/// Índice do item mais específico que casa com `path`; empate fica com o primeiro.
fn best_match<'a>(
    patterns: impl Iterator<Item = &'a NavPattern>,
    path: &str,
    region_key: &str,
) -> Option<usize> {
    let mut best: Option<(usize, (u8, usize))> = None;
    for (index, pattern) in patterns.enumerate() {
        if let Some(score) = pattern.specificity(path, region_key) {
            // `>` estrito: em empate o anterior permanece
            if best.is_none_or(|(_, current)| score > current) {
                best = Some((index, score));
            }
        }
    }
    best.map(|(index, _)| index)
}

/// Menu visível para o contexto, com o item ativo marcado.
pub fn resolve(ctx: &TenantContext, items: &[NavItem], path: &str) -> Vec<NavEntry> {
    let region_key = ctx.region().key();

    let visible: Vec<&NavItem> = items
        .iter()
        .filter(|item| allowed(ctx, item.required_permission, item.required_feature))
        .collect();
    let active = best_match(visible.iter().map(|item| &item.pattern), path, region_key);

    visible
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let subs: Vec<&SubNavItem> = item
                .sub_items
                .iter()
                .filter(|sub| allowed(ctx, sub.required_permission, None))
                .collect();
            let item_active = active == Some(index);
            let active_sub = if item_active {
                best_match(subs.iter().map(|sub| &sub.pattern), path, region_key)
            } else {
                None
            };

            NavEntry {
                name: item.name.to_string(),
                href: item.href.replace("{region}", region_key),
                icon: item.icon.map(str::to_string),
                active: item_active,
                sub_items: subs
                    .iter()
                    .enumerate()
                    .map(|(sub_index, sub)| SubNavEntry {
                        name: sub.name.to_string(),
                        href: sub.href.replace("{region}", region_key),
                        active: active_sub == Some(sub_index),
                    })
                    .collect(),
            }
        })
        .collect()
}
