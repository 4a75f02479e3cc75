//! Foldertag CLI
//!
//! Inspect and exercise folder/tag mapping rules from the terminal.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use foldertag::config::{export_rules, merge_imported_rules};
use foldertag::transform::{
    CaseTransform, EmojiHandling, NumberPrefixHandling, apply_transform_pipeline,
    is_transform_reversible,
};
use foldertag::{Config, MatchContext, MatchType, RuleEngine, TransformConfig, TransformOptions};

#[derive(Parser, Debug)]
#[command(name = "foldertag")]
#[command(author, version, about = "Rule-based mapping between folder paths and tags")]
struct Cli {
    /// Path to config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// List all rules
    List {
        /// Only enabled rules that map folders to tags
        #[arg(long, conflicts_with = "tag")]
        folder: bool,

        /// Only enabled rules that map tags to folders
        #[arg(long)]
        tag: bool,
    },

    /// Validate config file and every rule in it
    Check,

    /// Show which rule matches an input
    Match {
        /// Folder path, or tag with --tag
        input: String,

        /// Treat input as a tag
        #[arg(long)]
        tag: bool,

        /// Show every matching rule, not just the winner
        #[arg(long)]
        all: bool,

        /// Consider disabled rules too
        #[arg(long)]
        include_disabled: bool,
    },

    /// Convert a folder path to a tag, or a tag to a folder path with --tag
    Convert {
        input: String,

        #[arg(long)]
        tag: bool,
    },

    /// Run the transform pipeline on some text without any rule
    Transform {
        text: String,

        /// Produce a folder name instead of a tag
        #[arg(long)]
        to_folder: bool,

        /// Case style (none, snake_case, kebab-case, camelCase, PascalCase, "Title Case", lowercase, UPPERCASE)
        #[arg(long)]
        case: Option<CaseTransform>,

        #[arg(long)]
        strip_emoji: bool,

        /// Number prefix handling (keep, strip, extract)
        #[arg(long)]
        number: Option<NumberPrefixHandling>,
    },

    /// Export rules as JSON
    Export {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Import rules from a JSON export
    Import {
        file: PathBuf,

        /// Replace existing rules instead of appending
        #[arg(long)]
        replace: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::read(cli.config.as_deref())?;

    // Initialize logging
    let log_filter = config
        .general
        .log_filter(std::env::var("FOLDERTAG_LOG").ok(), cli.verbose);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(log_filter))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // `check` prints its own report
    if !matches!(cli.command, Commands::Check) {
        config.warn_invalid_rules();
    }

    match cli.command {
        Commands::List { folder, tag } => {
            let engine = RuleEngine::new(config.rules);
            let rules: Vec<_> = if folder {
                engine.folder_to_tag_rules()
            } else if tag {
                engine.tag_to_folder_rules()
            } else {
                engine.rules().iter().collect()
            };
            println!("Rules:");
            for (i, rule) in rules.iter().enumerate() {
                let status = if rule.enabled { "✓" } else { "✗" };
                println!(
                    "  {} [{}] {} (priority {}, {})",
                    status,
                    i + 1,
                    rule.name,
                    rule.priority,
                    rule.direction.label()
                );
            }
        }
        Commands::Check => {
            let invalid = config.invalid_rules();
            if invalid.is_empty() {
                println!("✓ Config is valid");
                println!("  {} rules", config.rules.len());
            } else {
                for (id, result) in &invalid {
                    eprintln!("✗ Rule '{}':", id);
                    for error in &result.errors {
                        eprintln!("    {}", error);
                    }
                }
                std::process::exit(1);
            }
        }
        Commands::Match {
            input,
            tag,
            all,
            include_disabled,
        } => {
            let match_type = if tag { MatchType::Tag } else { MatchType::Folder };
            let input = if tag {
                input.trim_start_matches('#').to_string()
            } else {
                input
            };
            let context = MatchContext {
                include_disabled,
                ..MatchContext::new(match_type)
            };
            let engine = RuleEngine::new(config.rules);

            if all {
                for m in engine.find_matching_rules(&input, &context) {
                    println!(
                        "  {} (priority {}, confidence {:.3}, pattern {})",
                        m.rule.name, m.rule.priority, m.confidence, m.matched_pattern
                    );
                }
            } else {
                match engine.find_best_match(&input, &context) {
                    Some(m) => println!(
                        "✓ {} (priority {}, confidence {:.3})",
                        m.rule.name, m.rule.priority, m.confidence
                    ),
                    None => println!("✗ No rule matches {}", input),
                }
            }

            for group in engine.find_conflicts(&input, &context) {
                let names: Vec<_> = group.iter().map(|m| m.rule.name.as_str()).collect();
                println!(
                    "  ⚠ Priority {} is shared by: {}",
                    group[0].rule.priority,
                    names.join(", ")
                );
            }
        }
        Commands::Convert { input, tag } => {
            let engine = RuleEngine::new(config.rules);
            let mapping = if tag {
                engine.map_tag(&input)
            } else {
                engine.map_folder(&input)
            };
            match mapping {
                Some(m) if tag => println!("{} -> {} ({})", input, m.target, m.rule.name),
                Some(m) => println!("{} -> #{} ({})", input, m.target, m.rule.name),
                None => {
                    eprintln!("✗ No rule maps {}", input);
                    std::process::exit(1);
                }
            }
        }
        Commands::Transform {
            text,
            to_folder,
            case,
            strip_emoji,
            number,
        } => {
            let transform = TransformConfig {
                case_transform: case,
                emoji_handling: strip_emoji.then_some(EmojiHandling::Strip),
                number_prefix_handling: number,
                ..Default::default()
            };
            let options = TransformOptions {
                is_tag_transform: !to_folder,
                ..Default::default()
            };
            println!("{}", apply_transform_pipeline(&text, &transform, options));

            let reversibility = is_transform_reversible(&transform);
            for warning in &reversibility.warnings {
                eprintln!("  ⚠ {}", warning);
            }
        }
        Commands::Export { output } => {
            let json = export_rules(&config.rules)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    println!("✓ Exported {} rules to {}", config.rules.len(), path.display());
                }
                None => println!("{}", json),
            }
        }
        Commands::Import { file, replace } => {
            let content = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let mut config = config;
            let count = merge_imported_rules(&mut config, &content, replace)?;
            config.save(cli.config.as_deref())?;
            println!("✓ Imported {} rules", count);
        }
    }

    Ok(())
}
