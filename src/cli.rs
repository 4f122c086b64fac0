//! CLI definitions for newsforge.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// newsforge CLI.
#[derive(Parser)]
#[command(name = "newsforge")]
#[command(about = "Layout fingerprint extraction and article template synthesis")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Extract a page's layout and store it as a new template
    Extract {
        /// Article page URL
        url: String,

        /// Template name
        #[arg(short, long)]
        name: String,

        /// Brand the template belongs to
        #[arg(short, long)]
        brand: Option<String>,
    },

    /// Print a page's raw layout fingerprint without storing it
    Fingerprint {
        /// Article page URL
        url: String,

        /// Include the base64 preview screenshot
        #[arg(long)]
        with_preview: bool,
    },

    /// Generate template CSS from a layout metadata JSON file
    Synthesize {
        /// Path to a layoutMetadata JSON document
        metadata: PathBuf,
    },

    /// Template management commands
    Templates {
        #[command(subcommand)]
        action: TemplateAction,
    },

    /// Render an article through a stored template as a standalone HTML page
    Render {
        /// Template ID
        template_id: String,

        /// Article title
        #[arg(long)]
        title: String,

        /// File holding the article body HTML
        #[arg(long)]
        body: PathBuf,
    },
}

#[derive(Subcommand)]
pub(crate) enum TemplateAction {
    /// List stored templates
    List {
        /// Only show active templates
        #[arg(long)]
        active: bool,
    },

    /// Deactivate a template
    Deactivate {
        /// Template ID
        id: String,
    },
}
