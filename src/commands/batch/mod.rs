//! Implementation of the `sspc batch` command.
//!
//! Compiles every template in a directory whose file name matches a glob.
//! Each template's file stem is its product name, and each one is a separate
//! translation: a failure aborts that template only, and the command reports
//! all failures at the end.
//!
//! Matches that are themselves a generated module of the run are skipped, and
//! templates that would generate the same module are reported as failures
//! without compiling either of them.

#[cfg(test)]
mod tests;

use super::compile::{compile_to_file, report_compiled};
use super::{build_emitter, event_log_path, record_outcome};
use crate::cli::BatchArgs;
use crate::config::Config;
use crate::context::{BuildContext, same_file};
use crate::error::{Result, SspError};
use globset::{Glob, GlobMatcher};
use std::path::{Path, PathBuf};

/// Execute the `sspc batch` command.
pub fn cmd_batch(args: BatchArgs) -> Result<()> {
    let dir = &args.common.dir;
    let config = Config::discover(args.common.config.as_deref(), dir)?;
    let emitter = build_emitter(&config, args.output.skeleton.as_deref())?;
    let log = event_log_path(&config, &args.output);

    let pattern = args
        .pattern
        .clone()
        .unwrap_or_else(|| format!("*.{}", config.template_extension));
    let matcher = build_matcher(&pattern)?;
    let templates = find_templates(dir, &matcher)?;

    if templates.is_empty() {
        if !args.output.quiet {
            eprintln!(
                "No templates matching '{}' in {}",
                pattern,
                dir.display()
            );
        }
        return Ok(());
    }

    let mut failures = Vec::new();
    let planned = plan_contexts(
        &templates,
        dir,
        args.output.out_dir.as_deref(),
        &config,
        &mut failures,
    );

    // A match that is some template's generated module is output, not input.
    let destinations: Vec<PathBuf> = planned
        .iter()
        .map(|ctx| ctx.dest_path.clone())
        .collect();
    let (skipped, planned): (Vec<_>, Vec<_>) = planned.into_iter().partition(|ctx| {
        destinations
            .iter()
            .any(|dest| same_file(&ctx.source_path, dest))
    });
    if !args.output.quiet {
        for ctx in &skipped {
            eprintln!("Skipping generated module {}", ctx.source_path.display());
        }
    }

    for ctx in &planned {
        let rivals: Vec<String> = planned
            .iter()
            .filter(|other| {
                other.source_path != ctx.source_path && same_file(&other.dest_path, &ctx.dest_path)
            })
            .map(|other| other.source_path.display().to_string())
            .collect();
        if !rivals.is_empty() {
            failures.push(format!(
                "{}: '{}' is also generated from {}",
                ctx.source_path.display(),
                ctx.dest_path.display(),
                rivals.join(", ")
            ));
            continue;
        }

        let outcome = compile_to_file(ctx, &emitter);
        record_outcome(log.as_deref(), ctx, &outcome);
        match outcome {
            Ok(translation) => {
                if !args.output.quiet {
                    report_compiled(ctx, &translation);
                }
            }
            Err(e) => {
                eprintln!("Failed {}: {}", ctx.source_path.display(), e);
                failures.push(format!("{}: {}", ctx.source_path.display(), e));
            }
        }
    }

    let total = templates.len() - skipped.len();
    if !args.output.quiet {
        eprintln!("{} of {} templates compiled", total - failures.len(), total);
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(SspError::BatchFailed {
            failed: failures.len(),
            total,
            details: failures.join("\n  "),
        })
    }
}

/// One context per template, named by its file stem.
///
/// Templates whose context cannot be built are recorded in `failures`.
fn plan_contexts(
    templates: &[PathBuf],
    dir: &Path,
    out_dir: Option<&Path>,
    config: &Config,
    failures: &mut Vec<String>,
) -> Vec<BuildContext> {
    let mut planned = Vec::new();
    for template in templates {
        let Some(product) = template.file_stem().and_then(|s| s.to_str()) else {
            failures.push(format!("{}: file name is not valid UTF-8", template.display()));
            continue;
        };

        match BuildContext::new(product, dir, out_dir, config) {
            // The glob may select files with another extension.
            Ok(ctx) => planned.push(BuildContext {
                source_path: template.clone(),
                ..ctx
            }),
            Err(e) => failures.push(format!("{}: {}", template.display(), e)),
        }
    }
    planned
}

fn build_matcher(pattern: &str) -> Result<GlobMatcher> {
    Glob::new(pattern)
        .map(|glob| glob.compile_matcher())
        .map_err(|e| {
            SspError::ConfigError(format!("invalid template pattern '{}': {}", pattern, e))
        })
}

/// Files directly inside `dir` whose names match, sorted by name.
fn find_templates(dir: &Path, matcher: &GlobMatcher) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|e| {
        SspError::IoError(format!(
            "failed to read template directory '{}': {}",
            dir.display(),
            e
        ))
    })?;

    let mut templates = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| {
            SspError::IoError(format!(
                "failed to read template directory '{}': {}",
                dir.display(),
                e
            ))
        })?;
        let path = entry.path();
        if path.is_file() && matcher.is_match(entry.file_name()) {
            templates.push(path);
        }
    }

    templates.sort();
    Ok(templates)
}
