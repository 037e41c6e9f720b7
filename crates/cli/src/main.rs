//! CLI tool for matching draft slide content to presentation templates.

use anyhow::{Context, Result};
use clap::Parser;
use slide_match_core::{
    extract_templates_from_json, Content, EditAction, MatchResult, Scorer, ScoringConfig,
    SourceFormat, TemplateMatcher, TemplateSet,
};
use slide_match_pptx::PptxLayoutParser;
use std::fs::File;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

/// Pick the best slide template for a piece of draft content.
#[derive(Parser, Debug)]
#[command(name = "slide-match")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Templates source: a JSON presentation description or a .pptx file
    #[arg(short, long)]
    templates: PathBuf,

    /// Content JSON file (title, body, imageUrl, bullets, ...)
    #[arg(short, long)]
    content: Option<PathBuf>,

    /// JSON file overriding scoring weights and base scores
    #[arg(short, long)]
    weights: Option<PathBuf>,

    /// Only list the extracted templates
    #[arg(short, long)]
    list: bool,

    /// Emit the match result as JSON
    #[arg(short, long)]
    json: bool,

    /// Write output to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let templates = load_templates(&args.templates)?;
    log::info!(
        "Loaded {} templates from {}",
        templates.len(),
        args.templates.display()
    );

    let output = match (&args.content, args.list) {
        (Some(content_path), false) => {
            let content = load_content(content_path)?;
            let matcher = build_matcher(args.weights.as_deref())?;
            let result = matcher.find_best(&content, &templates).with_context(|| {
                format!(
                    "No templates could be extracted from {}",
                    args.templates.display()
                )
            })?;

            if args.json {
                format!("{}\n", serde_json::to_string_pretty(&result)?)
            } else {
                render_match(&result)
            }
        }
        _ => {
            if args.json {
                format!("{}\n", serde_json::to_string_pretty(&templates)?)
            } else {
                render_templates(&templates)
            }
        }
    };

    match &args.output {
        Some(path) => {
            write_output(path, &output)?;
            if args.verbose {
                eprintln!("Written to: {}", path.display());
            }
        }
        None => print!("{}", output),
    }

    Ok(())
}

/// Extract templates from a JSON description or a PPTX file.
fn load_templates(path: &Path) -> Result<TemplateSet> {
    let data = std::fs::read(path).with_context(|| format!("Failed to open {}", path.display()))?;

    let format = SourceFormat::from_magic(&data)
        .or_else(|| {
            path.extension()
                .and_then(|e| e.to_str())
                .and_then(SourceFormat::from_extension)
        })
        .ok_or_else(|| anyhow::anyhow!("Could not detect templates format of {}", path.display()))?;

    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown");

    let templates = match format {
        SourceFormat::Json => {
            log::debug!("Reading templates as JSON");
            let text = String::from_utf8_lossy(&data);
            extract_templates_from_json(&text)
        }
        SourceFormat::Pptx => {
            log::debug!("Reading templates from PPTX layouts");
            PptxLayoutParser::new()
                .extract(Cursor::new(data), filename)
                .map_err(|e| anyhow::anyhow!("{}", e))?
        }
    };

    Ok(templates)
}

/// Read content from a JSON file.
fn load_content(path: &Path) -> Result<Content> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Content::from_json(&text).with_context(|| format!("Invalid content in {}", path.display()))
}

/// Build a matcher, applying scoring overrides if given.
fn build_matcher(weights: Option<&Path>) -> Result<TemplateMatcher> {
    let config = match weights {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            serde_json::from_str::<ScoringConfig>(&text)
                .with_context(|| format!("Invalid scoring config in {}", path.display()))?
        }
        None => ScoringConfig::default(),
    };

    Ok(TemplateMatcher::new().with_scorer(Scorer::with_config(config)))
}

/// Human-readable listing of extracted templates.
fn render_templates(templates: &TemplateSet) -> String {
    let mut out = format!("{} templates in '{}'\n", templates.len(), templates.source);

    for (idx, template) in templates.iter().enumerate() {
        let roles: Vec<&str> = template
            .placeholders()
            .iter()
            .map(|p| p.role.as_str())
            .collect();
        out.push_str(&format!(
            "{:>3}. {} [{}] {} ({})\n",
            idx + 1,
            template.display_name(),
            template.id(),
            template.category(),
            if roles.is_empty() {
                "no placeholders".to_string()
            } else {
                roles.join(", ")
            }
        ));
    }

    out
}

/// Human-readable match report.
fn render_match(result: &MatchResult) -> String {
    let best = &result.best;
    let mut out = format!(
        "Best: {} [{}] {} score {}\n",
        best.template.display_name(),
        best.template.id(),
        best.template.category(),
        best.score
    );

    if !result.alternatives.is_empty() {
        out.push_str("Alternatives:\n");
        for alt in &result.alternatives {
            out.push_str(&format!(
                "  {} [{}] {} score {}\n",
                alt.template.display_name(),
                alt.template.id(),
                alt.template.category(),
                alt.score
            ));
        }
    }

    out.push_str(&format!(
        "Content: {} ({:?} body, {} bullets, {} images)\n",
        result.profile.tag,
        result.profile.length,
        result.profile.bullet_count,
        result.profile.image_count
    ));
    out.push_str(&format!("Reasoning: {}\n", result.reasoning));

    let plan = &result.edit_plan;
    if !plan.edits.is_empty() {
        out.push_str("Edits:\n");
        for edit in &plan.edits {
            let action = match &edit.action {
                EditAction::InsertText { text } => format!("insert text {:?}", text),
                EditAction::InsertBullets { items } => format!("insert {} bullets", items.len()),
                EditAction::AppendBullets { items } => format!("append {} bullets", items.len()),
                EditAction::ReplaceImage { url } => format!("replace image with {}", url),
            };
            out.push_str(&format!("  {} -> {}: {}\n", edit.field, edit.placeholder_id, action));
        }
    }
    if !plan.unplaced.is_empty() {
        out.push_str("Unplaced:\n");
        for item in &plan.unplaced {
            out.push_str(&format!("  {}: {}\n", item.field, item.reason));
        }
    }

    out
}

/// Write output to a file.
fn write_output(path: &Path, content: &str) -> Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;

    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write to {}", path.display()))?;

    Ok(())
}
