//! cvpress CLI - résumé PDF export and content inspection

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;

use cvpress::{Audience, Manifest, MetaValue, PageSize, RenderOptions, ResumeDocument};

#[derive(Parser)]
#[command(name = "cvpress")]
#[command(version)]
#[command(about = "Export résumé PDFs and inspect portfolio content", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a résumé profile (JSON) to a paginated PDF
    Render {
        /// Input profile JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (derived from the profile name if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Page geometry
        #[arg(long, value_enum, default_value = "a4")]
        page_size: PageSizeArg,

        /// Audience the experience bullets are selected for
        #[arg(long, value_enum, default_value = "all")]
        audience: AudienceArg,

        /// Compress content streams
        #[arg(long)]
        compress: bool,
    },

    /// Parse a Markdown document's front matter
    #[command(alias = "fm")]
    Frontmatter {
        /// Input Markdown file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print metadata as JSON
        #[arg(long)]
        json: bool,

        /// Also print the document body
        #[arg(long)]
        body: bool,
    },

    /// Validate and list a portfolio manifest
    Manifest {
        /// Input manifest JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum PageSizeArg {
    /// A4 (210 x 297 mm)
    A4,
    /// US Letter (8.5 x 11 inches)
    Letter,
}

impl From<PageSizeArg> for PageSize {
    fn from(size: PageSizeArg) -> Self {
        match size {
            PageSizeArg::A4 => PageSize::A4,
            PageSizeArg::Letter => PageSize::Letter,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum AudienceArg {
    /// Every bullet
    All,
    /// Technical readers
    Tech,
    /// Managers and HR
    Mgr,
}

impl From<AudienceArg> for Audience {
    fn from(audience: AudienceArg) -> Self {
        match audience {
            AudienceArg::All => Audience::All,
            AudienceArg::Tech => Audience::Technical,
            AudienceArg::Mgr => Audience::Management,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Render {
            input,
            output,
            page_size,
            audience,
            compress,
        } => cmd_render(&input, output.as_deref(), page_size, audience, compress),
        Commands::Frontmatter { input, json, body } => cmd_frontmatter(&input, json, body),
        Commands::Manifest { input } => cmd_manifest(&input),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_render(
    input: &Path,
    output: Option<&Path>,
    page_size: PageSizeArg,
    audience: AudienceArg,
    compress: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let json = fs::read_to_string(input)?;
    let doc = ResumeDocument::from_json(&json)?;

    let options = RenderOptions::new()
        .with_page_size(page_size.into())
        .with_audience(audience.into())
        .with_compression(compress);

    let pdf = cvpress::render_resume_with_options(&doc, &options)?;

    let path = match output {
        Some(path) => {
            pdf.save(path)?;
            path.to_path_buf()
        }
        None => pdf.save_to_dir(".")?,
    };

    println!(
        "{} {} ({} page{})",
        "Saved".green().bold(),
        path.display(),
        pdf.page_count(),
        if pdf.page_count() == 1 { "" } else { "s" }
    );

    Ok(())
}

fn cmd_frontmatter(input: &Path, json: bool, body: bool) -> Result<(), Box<dyn std::error::Error>> {
    let raw = fs::read_to_string(input)?;
    let doc = cvpress::parse_document(&raw);

    if json {
        println!("{}", serde_json::to_string_pretty(&doc.meta)?);
    } else if doc.meta.is_empty() {
        println!("{}", "No front matter found".yellow());
    } else {
        for (key, value) in doc.meta.iter() {
            match value {
                MetaValue::Scalar(s) => println!("{}: {}", key.cyan(), s),
                MetaValue::List(items) => println!("{}: [{}]", key.cyan(), items.join(", ")),
                MetaValue::Map(map) => {
                    println!("{}:", key.cyan());
                    for (sub_key, sub_value) in map {
                        println!("  {}: {}", sub_key.cyan(), sub_value);
                    }
                }
            }
        }
    }

    if body {
        println!();
        println!("{}", doc.body);
    }

    Ok(())
}

fn cmd_manifest(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let json = fs::read_to_string(input)?;
    let manifest = Manifest::from_json(&json)?;

    for entry in &manifest {
        let mut line = format!("{}  {}", entry.slug.cyan(), entry.title);
        if !entry.tags.is_empty() {
            line.push_str(&format!("  [{}]", entry.tags.join(", ")).dimmed().to_string());
        }
        if let Some(year) = entry.year {
            line.push_str(&format!(" ({year})").dimmed().to_string());
        }
        println!("{line}");
    }

    println!(
        "\n{} {} entr{}",
        "Valid:".green().bold(),
        manifest.len(),
        if manifest.len() == 1 { "y" } else { "ies" }
    );

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "cvpress".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Résumé PDF export and portfolio content tool");
    println!("License: MIT");
}
