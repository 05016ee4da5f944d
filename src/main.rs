//! relsite CLI entrypoint
//! Parses command-line arguments and dispatches to the library.
#![deny(unsafe_code)]

// Internal imports (std, crate)
use relsite::{
    core::{
        SiteConfig,
        templates::{RepositoryExporter, TemplateExporter, TemplateSource},
    },
    generation::scaffold,
    pages::{self, SetPagesArgs},
    release::release_site,
};
use std::path::{Path, PathBuf};

// External imports (alphabetized)
use anyhow::Context;
use clap::Parser;
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "relsite")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Defaults to `scaffold` in the current directory
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Write the bilingual site, release workflow and deployment helpers
    Scaffold {
        /// Directory to write into
        #[arg(long, default_value = ".")]
        output_dir: PathBuf,
        /// Site configuration (defaults to relsite.toml in the output directory)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Custom template directory
        #[arg(long)]
        template_dir: Option<PathBuf>,
    },
    /// Snapshot the site into a version directory and rebuild the root index
    Release {
        /// Release tag, with or without a leading `v`
        #[arg(long)]
        tag: String,
        /// Site root containing the locale directories
        #[arg(long, default_value = ".")]
        root: PathBuf,
        /// Site configuration (defaults to relsite.toml in the site root)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Custom template directory
        #[arg(long)]
        template_dir: Option<PathBuf>,
    },
    /// Point the repository's GitHub Pages source at the published branch
    SetPages(SetPagesArgs),
    /// Inspect or export the built-in templates
    Templates {
        #[command(subcommand)]
        action: TemplateCommands,
    },
}

#[derive(clap::Subcommand, Debug)]
pub enum TemplateCommands {
    /// List available template bundles
    List,
    /// Export the built-in templates for customization
    Export {
        /// Directory to export into
        output_dir: PathBuf,
    },
    /// Show a bundle's files and where they are written
    Info {
        /// Bundle name, as printed by `templates list`
        name: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Console output goes to stdout; diagnostics stay on stderr
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Scaffold {
        output_dir: PathBuf::from("."),
        config: None,
        template_dir: None,
    });

    match command {
        Commands::Scaffold {
            output_dir,
            config,
            template_dir,
        } => run_scaffold(&output_dir, config.as_deref(), template_dir).await?,
        Commands::Release {
            tag,
            root,
            config,
            template_dir,
        } => run_release(&root, &tag, config.as_deref(), template_dir).await?,
        Commands::SetPages(args) => run_set_pages(&args).await?,
        Commands::Templates { action } => match action {
            TemplateCommands::List => list_templates()?,
            TemplateCommands::Export { output_dir } => export_templates(&output_dir)?,
            TemplateCommands::Info { name } => template_info(&name)?,
        },
    }
    Ok(())
}

/// Emit the site scaffold and print what was created
async fn run_scaffold(
    output_dir: &Path,
    config_path: Option<&Path>,
    template_dir: Option<PathBuf>,
) -> anyhow::Result<()> {
    let config = SiteConfig::resolve(config_path, output_dir)
        .context("Failed to load site configuration")?;
    let source = TemplateSource::from_option(template_dir);

    info!(output_dir = %output_dir.display(), "Scaffolding site");
    let artifacts = scaffold(output_dir, &config, &source)
        .await
        .context("Failed to scaffold site")?;

    for artifact in &artifacts {
        println!("Created: {}", artifact.display_path(output_dir));
    }

    println!();
    println!("Next steps:");
    println!("  1. Commit the generated files and push them to GitHub.");
    println!(
        "  2. Publish a release (for example tag v{}); the workflow deploys it to the {} branch.",
        config.site.initial_version, config.pages.branch
    );
    println!(
        "  3. Point GitHub Pages at {} with `python3 set_github_pages.py <GITHUB_TOKEN> <owner> <repo>`",
        config.pages.branch
    );
    println!("     or `relsite set-pages <GITHUB_TOKEN> <owner> <repo>`.");
    println!("  See README_DEPLOY.md for details.");
    Ok(())
}

/// Apply a release locally and print a summary
async fn run_release(
    root: &Path,
    tag: &str,
    config_path: Option<&Path>,
    template_dir: Option<PathBuf>,
) -> anyhow::Result<()> {
    let config =
        SiteConfig::resolve(config_path, root).context("Failed to load site configuration")?;
    let source = TemplateSource::from_option(template_dir);

    let summary = release_site(root, tag, &config, &source)
        .await
        .with_context(|| format!("Failed to release {tag}"))?;

    println!(
        "Released {} ({} files written)",
        summary.version_dir.display(),
        summary.written.len()
    );
    println!("All versions:");
    for entry in &summary.versions {
        if entry.latest {
            println!("  {} (LATEST)", entry.dir);
        } else {
            println!("  {}", entry.dir);
        }
    }
    Ok(())
}

async fn run_set_pages(args: &SetPagesArgs) -> anyhow::Result<()> {
    let outcome = pages::run(args)
        .await
        .context("Failed to configure GitHub Pages")?;
    println!("{}", outcome.report("relsite set-pages", &args.source()));
    Ok(())
}

fn list_templates() -> anyhow::Result<()> {
    let repository = TemplateSource::Embedded.repository()?;
    for template in repository.list_templates() {
        match template.description {
            Some(description) => println!("{:<10} {}", template.name, description),
            None => println!("{}", template.name),
        }
    }
    Ok(())
}

fn export_templates(output_dir: &Path) -> anyhow::Result<()> {
    let repository = TemplateSource::Embedded.repository()?;
    let count = RepositoryExporter::new(repository.as_ref())
        .export_all_templates(output_dir)
        .with_context(|| format!("Failed to export templates to {}", output_dir.display()))?;
    println!(
        "Exported {} template bundle(s) to {}",
        count,
        output_dir.display()
    );
    Ok(())
}

fn template_info(name: &str) -> anyhow::Result<()> {
    let repository = TemplateSource::Embedded.repository()?;
    let manifest = repository.manifest(name)?;

    println!("Template: {}", manifest.name);
    if let Some(description) = &manifest.description {
        println!("Description: {description}");
    }
    println!("Template files:");
    for file in &manifest.files {
        let mode = if file.executable { " (executable)" } else { "" };
        println!("  - {} -> {}{}", file.source, file.destination, mode);
    }
    Ok(())
}
