use std::collections::HashMap;
use std::path::Path;

use aliasync_aliases::{AliasDocument, OWNERS_ALIASES_FILENAME};
use aliasync_diff::{compare_document, diff_aliases, diff_content, AliasChange, AliasDiff, Comparison};
use aliasync_select::{plan_writeback, Reconciler, WriteMode, WritebackPlan};
use aliasync_types::{Repository, RepositoryTask, Roster, SyncPolicy};
use anyhow::{bail, Context};
use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::Serialize;
use tracing::info;

use crate::cli::*;
use crate::config::Config;
use crate::input::{load_inventory, load_roster};

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Plan(args) => cmd_plan(args, &cli.format),
        Command::Check(args) => cmd_check(args, &cli.format),
        Command::Render(args) => cmd_render(args),
    }
}

/// Tasks plus the write-back steps derived from them.
#[derive(Debug, Serialize)]
pub struct PlanReport {
    pub tasks: Vec<RepositoryTask>,
    pub writeback: Vec<WritebackPlan>,
}

/// Run selection over the inventory and derive the write-back plan.
pub fn build_plan(
    reconciler: &Reconciler,
    repos: &[Repository],
    roster: &Roster,
    now: DateTime<Utc>,
    mode: WriteMode,
) -> PlanReport {
    let tasks = reconciler.reconcile(repos, roster, now);
    let writeback = plan_writeback(&tasks, mode);
    PlanReport { tasks, writeback }
}

fn cmd_plan(args: PlanArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let config = Config::for_args(&args.sync)?;
    let policy = config.policy(&args.sync, &args.branches, args.max_age_days)?;

    let mut ignored_users = config.ignored_users.clone();
    ignored_users.extend(args.ignored_users.iter().cloned());

    let reconciler = Reconciler::new(policy)?.with_ignored_users(ignored_users);

    info!("Listing teams…");
    let roster = load_roster(&args.sync.roster)?;
    info!("Listing repositories and branches…");
    let repos = load_inventory(&args.inventory)?;
    info!("Found {} repositories.", repos.len());

    let mode = if args.update || config.update_directly {
        WriteMode::Direct
    } else {
        WriteMode::PullRequest
    };

    let report = build_plan(&reconciler, &repos, &roster, Utc::now(), mode);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => print_plan(&report, &repos, args.show_diff),
    }

    info!("Synchronization plan completed.");
    Ok(())
}

fn print_plan(report: &PlanReport, repos: &[Repository], show_diff: bool) {
    if report.tasks.is_empty() {
        println!("{} All aliases files are up to date.", "✓".green().bold());
        return;
    }

    let originals: HashMap<(&str, &str), &str> = repos
        .iter()
        .flat_map(|r| {
            r.branches
                .iter()
                .filter_map(move |b| b.alias_content().map(|c| ((r.name.as_str(), b.name.as_str()), c)))
        })
        .collect();

    for task in &report.tasks {
        println!("{}", task.name.bold());
        for plan in report.writeback.iter().filter(|p| p.repository == task.name) {
            match &plan.pull_request {
                Some(_) => println!(
                    "  {} {} via {}",
                    "~".yellow(),
                    plan.base_branch.yellow(),
                    plan.push_branch.cyan()
                ),
                None => println!("  {} {} (direct)", "~".yellow(), plan.base_branch.yellow()),
            }
            println!("    Commit: {}", plan.commit_message);

            if show_diff {
                let old = originals
                    .get(&(task.name.as_str(), plan.base_branch.as_str()))
                    .copied()
                    .unwrap_or_default();
                print_unified(old, &plan.new_content);
            }
        }
    }

    let branches: usize = report.tasks.iter().map(RepositoryTask::len).sum();
    println!(
        "\n{} branch(es) in {} repositor(ies) need an update.",
        branches.to_string().bold(),
        report.tasks.len().to_string().bold()
    );
}

fn print_unified(old: &str, new: &str) {
    let text = diff_content(old, new).to_unified(OWNERS_ALIASES_FILENAME);
    for line in text.lines() {
        let styled = if line.starts_with("+++") || line.starts_with("---") {
            line.bold()
        } else if line.starts_with('+') {
            line.green()
        } else if line.starts_with('-') {
            line.red()
        } else if line.starts_with("@@") {
            line.cyan()
        } else {
            line.normal()
        };
        println!("    {styled}");
    }
}

/// Parse and compare a local aliases file.
fn compare_file(path: &Path, sync: &SyncArgs, policy: &SyncPolicy) -> anyhow::Result<(String, AliasDocument, Comparison)> {
    let roster = load_roster(&sync.roster)?;
    let original = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let old = AliasDocument::parse(&original)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    let comparison = compare_document(&original, &old, &roster, policy)?;
    Ok((original, old, comparison))
}

fn cmd_check(args: CheckArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let config = Config::for_args(&args.sync)?;
    let policy = config.policy(&args.sync, &[], None)?;

    let (original, old, comparison) = compare_file(&args.file, &args.sync, &policy)?;
    let new = AliasDocument::parse(&comparison.new_content)?;
    let changes = diff_aliases(&old, &new);

    match format {
        OutputFormat::Json => {
            let report = serde_json::json!({
                "file": args.file.display().to_string(),
                "equal": comparison.equal,
                "changes": changes.changes.iter().map(change_json).collect::<Vec<_>>(),
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => {
            if comparison.equal {
                println!("{} {} is up to date", "✓".green().bold(), args.file.display());
            } else {
                println!("{} {} is out of date", "✗".red().bold(), args.file.display());
                print_changes(&changes);
                print_unified(&original, &comparison.new_content);
            }
        }
    }

    if comparison.is_changed() {
        bail!("{} does not match the team roster", args.file.display());
    }
    Ok(())
}

fn print_changes(diff: &AliasDiff) {
    for change in &diff.changes {
        match change {
            AliasChange::Added { alias, .. } => println!("  {} {}", "+".green(), alias),
            AliasChange::Removed { alias, .. } => println!("  {} {} (no matching team)", "-".red(), alias),
            AliasChange::Modified { alias, added, removed } => {
                println!("  {} {}", "~".yellow(), alias);
                for m in added {
                    println!("      {} {}", "+".green(), m);
                }
                for m in removed {
                    println!("      {} {}", "-".red(), m);
                }
            }
        }
    }
}

fn change_json(change: &AliasChange) -> serde_json::Value {
    match change {
        AliasChange::Added { alias, members } => {
            serde_json::json!({ "alias": alias, "kind": "added", "members": members })
        }
        AliasChange::Removed { alias, members } => {
            serde_json::json!({ "alias": alias, "kind": "removed", "members": members })
        }
        AliasChange::Modified { alias, added, removed } => {
            serde_json::json!({ "alias": alias, "kind": "modified", "added": added, "removed": removed })
        }
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let config = Config::for_args(&args.sync)?;
    let policy = config.policy(&args.sync, &[], None)?;

    let (_, _, comparison) = compare_file(&args.file, &args.sync, &policy)?;

    if !args.write {
        print!("{}", comparison.new_content);
        return Ok(());
    }

    if comparison.equal {
        println!("{} {} is already up to date", "✓".green().bold(), args.file.display());
        return Ok(());
    }

    std::fs::write(&args.file, &comparison.new_content)
        .with_context(|| format!("failed to write {}", args.file.display()))?;
    println!("{} Updated {}", "✓".green().bold(), args.file.display());
    Ok(())
}
