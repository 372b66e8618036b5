//! HTML dashboard page using Tera

use chrono::Local;
use rust_embed::Embed;
use tera::Tera;
use thiserror::Error;

use crate::core::dashboard::{FleetStats, ViewQuery};
use crate::core::vehicle::Vehicle;
use crate::render::CardView;

#[derive(Embed)]
#[folder = "templates/"]
struct EmbeddedTemplates;

const DASHBOARD_TEMPLATE: &str = "dashboard.html";

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Template not found: {0}")]
    NotFound(String),

    #[error("Template rendering error: {0}")]
    RenderError(String),
}

/// Renders the dashboard page from embedded templates
///
/// Templates are registered under their `.html` file names, so Tera
/// auto-escapes every interpolated value.
pub struct HtmlRenderer {
    tera: Tera,
}

impl HtmlRenderer {
    pub fn new() -> Result<Self, RenderError> {
        let mut tera = Tera::default();

        let mut templates = Vec::new();
        for file in EmbeddedTemplates::iter() {
            let filename = file.as_ref().to_string();
            if let Some(content) = EmbeddedTemplates::get(&filename) {
                if let Ok(template_str) = std::str::from_utf8(&content.data) {
                    templates.push((filename, template_str.to_string()));
                }
            }
        }
        tera.add_raw_templates(templates)
            .map_err(|e| RenderError::RenderError(e.to_string()))?;

        Ok(Self { tera })
    }

    /// Render the full page: stats panel plus one card per vehicle in `view`
    pub fn render_dashboard(
        &self,
        title: &str,
        stats: &FleetStats,
        query: &ViewQuery,
        view: &[&Vehicle],
    ) -> Result<String, RenderError> {
        if !self
            .tera
            .get_template_names()
            .any(|n| n == DASHBOARD_TEMPLATE)
        {
            return Err(RenderError::NotFound(DASHBOARD_TEMPLATE.to_string()));
        }

        let cards: Vec<CardView> = view.iter().map(|v| CardView::from_vehicle(v)).collect();

        let mut context = tera::Context::new();
        context.insert("title", title);
        context.insert("stats", stats);
        context.insert("query", &describe_query(query));
        context.insert("cards", &cards);
        context.insert(
            "generated_at",
            &Local::now().format("%Y-%m-%d %H:%M").to_string(),
        );

        self.tera
            .render(DASHBOARD_TEMPLATE, &context)
            .map_err(|e| RenderError::RenderError(e.to_string()))
    }
}

/// One-line summary of the active search/filter/sort, empty when there is none
pub fn describe_query(query: &ViewQuery) -> String {
    let mut parts = Vec::new();
    let term = query.search.trim();
    if !term.is_empty() {
        parts.push(format!("search \"{}\"", term));
    }
    if let Some(status) = query.status.status() {
        parts.push(format!("status {}", status));
    }
    if query.sort != crate::core::dashboard::SortKey::None {
        parts.push(format!("sorted by {}", query.sort));
    }
    parts.join(", ")
}
