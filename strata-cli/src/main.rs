use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use colored::Colorize;
use similar::{ChangeTag, TextDiff};

use strata_aws::Stack;
use strata_aws::schemas;
use strata_core::loader::load_template;
use strata_core::render::{RenderConfig, render};
use strata_core::template::Template;
use strata_core::validate::{ValidationError, validate_template};

#[derive(Parser)]
#[command(name = "strata")]
#[command(about = "Generate CloudFormation templates for EC2 stacks", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a stack as a CloudFormation JSON template
    Render {
        /// Stack to render (see `strata list`)
        stack: Stack,

        /// Write the template to a file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Emit the template on a single line
        #[arg(long)]
        compact: bool,

        /// Spaces per indentation level
        #[arg(long, default_value_t = 4)]
        indent: usize,

        /// Indent with tabs
        #[arg(long, conflicts_with = "indent")]
        tabs: bool,

        /// Render even if the template fails validation
        #[arg(long)]
        skip_validation: bool,
    },
    /// Validate a JSON template file
    Validate {
        /// Path to template file
        file: PathBuf,
    },
    /// Check that a file matches the freshly rendered stack
    Check {
        /// Stack to compare against
        stack: Stack,

        /// Path to template file
        file: PathBuf,

        /// Show diff of the differences
        #[arg(long)]
        diff: bool,
    },
    /// List the available stacks
    List,
    /// Generate shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let result = match cli.command {
        Commands::Render {
            stack,
            output,
            compact,
            indent,
            tabs,
            skip_validation,
        } => {
            let config = RenderConfig {
                indent_size: indent,
                use_tabs: tabs,
                compact,
            };
            run_render(stack, output.as_deref(), &config, skip_validation)
        }
        Commands::Validate { file } => run_validate(&file),
        Commands::Check { stack, file, diff } => run_check(stack, &file, diff),
        Commands::List => {
            run_list();
            Ok(())
        }
        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "strata", &mut io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

/// Logs go to stderr; RUST_LOG takes precedence over -v
fn init_logger(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, level),
    )
    .init();
}

fn print_validation_errors(errors: &[ValidationError]) {
    for error in errors {
        eprintln!("  {} {}", "•".red(), error);
    }
}

/// Build a stack, validating it unless told not to
fn build_stack(stack: Stack, skip_validation: bool) -> Result<Template> {
    let template = stack
        .build()
        .with_context(|| format!("Failed to build stack {}", stack))?;

    if skip_validation {
        log::warn!("Skipping validation of stack {}", stack);
    } else {
        check_template(&template).with_context(|| format!("Stack {} is invalid", stack))?;
    }
    Ok(template)
}

fn render_stack(stack: Stack, config: &RenderConfig, skip_validation: bool) -> Result<String> {
    let template = build_stack(stack, skip_validation)?;
    let mut text = render(&template, config)?;
    text.push('\n');
    Ok(text)
}

fn check_template(template: &Template) -> Result<()> {
    let registry = schemas::registry();
    if let Err(errors) = validate_template(template, &registry) {
        print_validation_errors(&errors);
        bail!("{} validation error(s)", errors.len());
    }
    Ok(())
}

fn run_render(
    stack: Stack,
    output: Option<&Path>,
    config: &RenderConfig,
    skip_validation: bool,
) -> Result<()> {
    let text = render_stack(stack, config, skip_validation)?;

    match output {
        Some(path) => {
            fs::write(path, &text)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!(
                "{} {} to {}",
                "Rendered:".green(),
                stack,
                path.display()
            );
        }
        None => print!("{}", text),
    }
    Ok(())
}

fn run_validate(file: &Path) -> Result<()> {
    let content = fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let template = load_template(&content)
        .with_context(|| format!("Failed to load {}", file.display()))?;

    println!("{}", "Validating...".cyan());
    check_template(&template)?;

    println!(
        "{}",
        format!(
            "✓ {} resources validated successfully.",
            template.resources().len()
        )
        .green()
        .bold()
    );
    for (name, resource) in template.resources() {
        println!("  • {}.{}", resource.resource_type, name);
    }
    Ok(())
}

/// Compares templates rather than text, so any indentation or `--compact`
/// rendering of the stack passes
fn run_check(stack: Stack, file: &Path, show_diff: bool) -> Result<()> {
    let content = fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let current = load_template(&content)
        .with_context(|| format!("Failed to load {}", file.display()))?;
    let expected = build_stack(stack, false)?;

    if current == expected {
        println!(
            "{}",
            format!("{} is up to date with stack {}.", file.display(), stack).green()
        );
        return Ok(());
    }

    if show_diff {
        let config = RenderConfig::default();
        print_diff(file, &render(&current, &config)?, &render(&expected, &config)?);
    }
    bail!("{} is out of date, re-run `strata render {}`", file.display(), stack)
}

fn run_list() {
    for stack in Stack::all() {
        println!("{:<12} {}", stack.name().bold(), stack.description());
    }
}

fn print_diff(file: &Path, current: &str, expected: &str) {
    println!("\n{} {}:", "Diff for".cyan().bold(), file.display());

    let diff = TextDiff::from_lines(current, expected);
    for change in diff.iter_all_changes() {
        let sign = match change.tag() {
            ChangeTag::Delete => "-".red(),
            ChangeTag::Insert => "+".green(),
            ChangeTag::Equal => " ".normal(),
        };
        print!("{}{}", sign, change);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn render_to(dir: &TempDir, stack: Stack) -> PathBuf {
        let path = dir.path().join(format!("{}.json", stack));
        run_render(stack, Some(&path), &RenderConfig::default(), false).unwrap();
        path
    }

    #[test]
    fn cli_parses_stack_names() {
        let cli = Cli::try_parse_from(["strata", "-vv", "render", "vpc", "--compact"]).unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Render { stack, compact, .. } => {
                assert_eq!(stack, Stack::Vpc);
                assert!(compact);
            }
            _ => panic!("expected render"),
        }
        assert!(Cli::try_parse_from(["strata", "render", "classic"]).is_err());
    }

    #[test]
    fn rendered_files_validate() {
        let dir = TempDir::new().unwrap();
        for stack in Stack::all() {
            let path = render_to(&dir, *stack);
            run_validate(&path).unwrap();
        }
    }

    #[test]
    fn check_accepts_fresh_render() {
        let dir = TempDir::new().unwrap();
        let path = render_to(&dir, Stack::DefaultVpc);
        run_check(Stack::DefaultVpc, &path, false).unwrap();
        assert!(run_check(Stack::Vpc, &path, true).is_err());
    }

    #[test]
    fn check_ignores_render_formatting() {
        let dir = TempDir::new().unwrap();
        let configs = [
            RenderConfig {
                compact: true,
                ..RenderConfig::default()
            },
            RenderConfig {
                indent_size: 2,
                ..RenderConfig::default()
            },
            RenderConfig {
                use_tabs: true,
                ..RenderConfig::default()
            },
        ];
        for (i, config) in configs.iter().enumerate() {
            let path = dir.path().join(format!("vpc-{}.json", i));
            run_render(Stack::Vpc, Some(&path), config, false).unwrap();
            run_check(Stack::Vpc, &path, false).unwrap();
        }
    }

    #[test]
    fn check_rejects_edited_file() {
        let dir = TempDir::new().unwrap();
        let path = render_to(&dir, Stack::Vpc);
        let content = fs::read_to_string(&path).unwrap();
        fs::write(&path, content.replace("10.0.0.0/24", "10.0.1.0/24")).unwrap();
        assert!(run_check(Stack::Vpc, &path, false).is_err());
    }

    #[test]
    fn validate_reports_dangling_refs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(
            &path,
            r#"{
                "Resources": {
                    "Attachment": {
                        "Type": "AWS::EC2::VPCGatewayAttachment",
                        "Properties": {"VpcId": {"Ref": "MissingVpc"}}
                    }
                }
            }"#,
        )
        .unwrap();
        let err = run_validate(&path).unwrap_err();
        assert_eq!(err.to_string(), "1 validation error(s)");
    }

    #[test]
    fn validate_reports_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = run_validate(&dir.path().join("nope.json")).unwrap_err();
        assert!(err.to_string().starts_with("Failed to read"));
    }

    #[test]
    fn compact_render_is_one_line() {
        let config = RenderConfig {
            compact: true,
            ..RenderConfig::default()
        };
        let text = render_stack(Stack::Vpc, &config, false).unwrap();
        assert_eq!(text.lines().count(), 1);
        let doc: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(doc["AWSTemplateFormatVersion"], "2010-09-09");
    }
}
