/// Template Linter: validates template coverage and variety.
///
/// Usage: template_linter <templates.ron|dir> [--with-builtin]

use clap::Parser;
use community_content::builtin_templates;
use community_content::core::template::{HighlightStyle, TemplateSet};
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(name = "template_linter")]
#[command(about = "Check neighborhood template files", long_about = None)]
struct Cli {
    /// Template file or directory of .ron files
    path: PathBuf,

    /// Lint the files as overrides merged over the built-in templates
    #[arg(long)]
    with_builtin: bool,
}

fn main() {
    let cli = Cli::parse();

    let mut templates = if cli.with_builtin {
        match builtin_templates::austin_metro() {
            Ok(set) => set,
            Err(e) => {
                eprintln!("ERROR: Built-in templates failed to parse: {}", e);
                process::exit(1);
            }
        }
    } else {
        TemplateSet::default()
    };

    let mut errors = Vec::new();
    if cli.path.is_file() {
        match TemplateSet::load_from_ron(&cli.path) {
            Ok(set) => templates.merge(set),
            Err(e) => errors.push(format!("{}: {}", cli.path.display(), e)),
        }
    } else if cli.path.is_dir() {
        load_templates_recursive(&cli.path, &mut templates, &mut errors);
    } else {
        eprintln!("ERROR: Path '{}' does not exist", cli.path.display());
        process::exit(1);
    }

    println!("Loaded {} template definitions", templates.definitions.len());

    let (lint_errors, warnings) = lint_templates(&templates);
    errors.extend(lint_errors);

    println!("\n=== Template Lint Report ===\n");

    if errors.is_empty() && warnings.is_empty() {
        println!("All checks passed!");
    }

    for warning in &warnings {
        println!("WARNING: {}", warning);
    }

    for error in &errors {
        println!("ERROR: {}", error);
    }

    println!(
        "\nSummary: {} errors, {} warnings",
        errors.len(),
        warnings.len()
    );

    if !errors.is_empty() {
        process::exit(1);
    }
}

fn load_templates_recursive(dir: &Path, templates: &mut TemplateSet, errors: &mut Vec<String>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        errors.push(format!("{}: unreadable directory", dir.display()));
        return;
    };
    let mut paths: Vec<PathBuf> = entries.flatten().map(|e| e.path()).collect();
    paths.sort();
    for path in paths {
        if path.is_dir() {
            load_templates_recursive(&path, templates, errors);
        } else if path.extension().and_then(|s| s.to_str()) == Some("ron") {
            match TemplateSet::load_from_ron(&path) {
                Ok(set) => {
                    println!("  Loaded: {}", path.display());
                    templates.merge(set);
                }
                Err(e) => errors.push(format!("{}: {}", path.display(), e)),
            }
        }
    }
}

fn lint_templates(templates: &TemplateSet) -> (Vec<String>, Vec<String>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    // Coverage: every kind the selector can pick needs a definition
    for kind in templates.missing_kinds() {
        errors.push(format!("No template defined for '{}'", kind.id()));
    }

    let mut kinds: Vec<_> = templates.definitions.keys().copied().collect();
    kinds.sort();
    for kind in kinds {
        let Some(definition) = templates.get(kind) else {
            continue;
        };
        let id = definition.id();

        for (index, paragraph) in definition.paragraphs.iter().enumerate() {
            if paragraph.alternatives.len() < 2 {
                warnings.push(format!(
                    "Template '{}' paragraph {} has a single alternative",
                    id, index
                ));
            }
        }

        let n = definition.default_best_for.len();
        if n != 0 && !(3..=4).contains(&n) {
            errors.push(format!(
                "Template '{}' default_best_for has {} entries (3-4 required)",
                id, n
            ));
        } else if n == 0 {
            warnings.push(format!(
                "Template '{}' has no default_best_for; records without persona tags will fail",
                id
            ));
        }

        if let HighlightStyle::ConvenienceAccess { prefix } = &definition.highlights {
            if !prefix.ends_with(' ') {
                warnings.push(format!(
                    "Template '{}' highlight prefix '{}' does not end with a space",
                    id, prefix
                ));
            }
        }
    }

    (errors, warnings)
}
