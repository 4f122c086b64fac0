//! Template subcommand handlers for newsforge.

use std::path::Path;

use crate::app::App;
use crate::cli::TemplateAction;

/// Handle template subcommands.
pub(crate) async fn handle_template_command(
    app: &App,
    action: TemplateAction,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        TemplateAction::List { active } => template_list(app, active).await,
        TemplateAction::Deactivate { id } => template_deactivate(app, &id).await,
    }
}

async fn template_list(app: &App, active_only: bool) -> Result<(), Box<dyn std::error::Error>> {
    let templates = app.service().list(active_only).await?;

    if templates.is_empty() {
        println!("No templates found.");
        return Ok(());
    }

    println!(
        "{:<36}  {:<24}  {:<8}  {:<8}  {}",
        "ID", "NAME", "ACTIVE", "COLUMNS", "SOURCE"
    );
    for template in &templates {
        println!(
            "{:<36}  {:<24}  {:<8}  {:<8}  {}",
            template.id,
            truncate(&template.name, 24),
            if template.is_active { "yes" } else { "no" },
            template.layout_metadata.columns,
            template.source_url
        );
    }
    println!("\nTotal: {} template(s)", templates.len());
    Ok(())
}

async fn template_deactivate(app: &App, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let template = app.service().deactivate(id).await?;
    println!("Deactivated template {} ({})", template.id, template.name);
    Ok(())
}

/// Print an HTML page rendering `body` through a stored template.
pub(crate) async fn render(
    app: &App,
    template_id: &str,
    title: &str,
    body: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let template = app
        .service()
        .get(template_id)
        .await?
        .ok_or_else(|| format!("Template not found: {}", template_id))?;

    let body_html = tokio::fs::read_to_string(body).await?;
    print!("{}", template.render_page(title, &body_html));
    Ok(())
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let mut out: String = value.chars().take(width.saturating_sub(3)).collect();
    out.push_str("...");
    out
}
