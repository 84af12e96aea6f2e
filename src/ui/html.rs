// src/ui/html.rs

//! Documento completo do painel, renderizado no servidor.

use leptos::*;

use super::{
    admin_panel::{AdminPanelView, PanelView},
    header::Header,
};
use crate::middleware::i18n::Locale;

const STYLES: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; background: #f5f6fa; color: #222; }
.app-header { display: flex; align-items: center; justify-content: space-between; padding: 0 24px; background: #1f2a44; color: #fff; }
.app-header a { color: inherit; text-decoration: none; }
.app-header nav ul { display: flex; gap: 16px; list-style: none; }
main { padding: 24px; }
.cards { display: flex; flex-wrap: wrap; gap: 16px; }
.card { background: #fff; border-radius: 8px; padding: 16px; min-width: 160px; }
.card-label { font-size: 0.85em; color: #666; }
.card-value { font-size: 1.5em; font-weight: 600; }
table { width: 100%; border-collapse: collapse; margin-top: 24px; background: #fff; }
th, td { padding: 8px 12px; text-align: left; border-bottom: 1px solid #eee; }
.badge { padding: 2px 8px; border-radius: 12px; font-size: 0.8em; }
.badge-pending { background: #fff3cd; color: #856404; }
.badge-confirmed { background: #cce5ff; color: #004085; }
.badge-completed { background: #d4edda; color: #155724; }
.badge-cancelled { background: #f8d7da; color: #721c24; }
.badge-unknown { background: #e2e3e5; color: #383d41; }
.loading, .empty-state { padding: 24px; color: #666; }
"#;

#[component]
pub fn Page(title: &'static str, panel: PanelView, locale: Locale, refresh_secs: Option<u64>) -> impl IntoView {
    view! {
        <html lang="pt-BR">
            <head>
                <meta charset="utf-8"/>
                {refresh_secs.map(|secs| view! { <meta http-equiv="refresh" content=secs.to_string()/> })}
                <title>{title}</title>
                <style inner_html=STYLES></style>
            </head>
            <body>
                <Header/>
                <main>
                    <AdminPanelView panel=panel locale=locale/>
                </main>
            </body>
        </html>
    }
}

/// Renderiza a página inteira como string, pronta para `Html`.
pub fn render_page(title: &'static str, panel: PanelView, locale: Locale, refresh_secs: Option<u64>) -> String {
    let document = leptos::ssr::render_to_string(move || {
        view! { <Page title=title panel=panel locale=locale refresh_secs=refresh_secs/> }
    });
    format!("<!DOCTYPE html>{document}")
}
