// src/ui/header.rs

use leptos::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub label: String,
    pub href: String,
}

impl NavLink {
    pub fn new(label: &str, href: &str) -> Self {
        Self { label: label.to_string(), href: href.to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderConfig {
    pub brand: String,
    pub links: Vec<NavLink>,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            brand: "Painel Administrativo".to_string(),
            links: vec![
                NavLink::new("Dashboard", "/admin"),
                NavLink::new("Agendamentos", "/admin#agendamentos"),
                NavLink::new("API", "/api/admin/metrics"),
            ],
        }
    }
}

/// Cabeçalho do painel: um `banner` com a marca e um `navigation` com os links.
#[component]
pub fn Header(#[prop(optional)] config: HeaderConfig) -> impl IntoView {
    let HeaderConfig { brand, links } = config;

    view! {
        <header role="banner" class="app-header">
            <a class="brand" href="/admin">{brand}</a>
            <nav role="navigation" aria-label="Menu principal">
                <ul>
                    {links
                        .into_iter()
                        .map(|link| view! { <li><a href=link.href>{link.label}</a></li> })
                        .collect_view()}
                </ul>
            </nav>
        </header>
    }
}
