//! Implementation of the `sspc inspect` command.
//!
//! Prints what a template translates to (the tags found, the hoisted
//! imports and declarations, and the segment sequence) without rendering or
//! writing a module.

use crate::cli::InspectArgs;
use crate::config::Config;
use crate::context::BuildContext;
use crate::error::{Result, SspError};
use crate::translate::classify::{Category, classify};
use crate::translate::scanner::{Token, line_and_column, scan};
use crate::translate::segments::assemble;
use crate::translate::{Segment, Translation};
use serde::Serialize;
use std::fmt::Write;

/// A tag as reported by `inspect`.
#[derive(Debug, Serialize)]
struct TagReport {
    order: usize,
    line: usize,
    column: usize,
    category: &'static str,
    hoisted: bool,
    content: String,
}

#[derive(Debug, Serialize)]
struct InspectReport {
    template: String,
    tags: Vec<TagReport>,
    translation: Translation,
}

/// Execute the `sspc inspect` command.
pub fn cmd_inspect(args: InspectArgs) -> Result<()> {
    let product = BuildContext::resolve_product(args.product.as_deref())?;
    let config = Config::discover(args.common.config.as_deref(), &args.common.dir)?;
    let ctx = BuildContext::new(product, &args.common.dir, None, &config)?;

    let template = ctx.read_template()?;
    let report = inspect(&ctx, &template)?;

    if args.json {
        let json = serde_json::to_string_pretty(&report).map_err(|e| {
            SspError::IoError(format!("failed to serialize translation to JSON: {}", e))
        })?;
        println!("{}", json);
    } else {
        print!("{}", describe(&report));
    }
    Ok(())
}

fn inspect(ctx: &BuildContext, template: &str) -> Result<InspectReport> {
    let tokens = scan(template)?;

    let tags = tokens
        .iter()
        .filter_map(|token| match token {
            Token::Tag(tag) => Some(tag),
            Token::Literal(_) => None,
        })
        .map(|tag| {
            let category = classify(tag);
            let (line, column) = line_and_column(template, tag.span.start);
            TagReport {
                order: tag.source_order,
                line,
                column,
                category: category_name(category),
                hoisted: category.is_directive(),
                content: tag.content.to_string(),
            }
        })
        .collect();

    Ok(InspectReport {
        template: ctx.source_path.display().to_string(),
        tags,
        translation: assemble(&tokens)?,
    })
}

fn category_name(category: Category) -> &'static str {
    match category {
        Category::Import => "import",
        Category::Declaration => "declaration",
        Category::Expression => "expression",
        Category::Statement => "statement",
    }
}

/// Human-readable listing of an inspection.
fn describe(report: &InspectReport) -> String {
    let mut out = String::new();
    let translation = &report.translation;

    let _ = writeln!(out, "Template: {}", report.template);
    let _ = writeln!(out, "Tags ({}):", report.tags.len());
    for tag in &report.tags {
        let _ = writeln!(
            out,
            "  {:>3}  {:>4}:{:<3}  {:<11}  {:?}{}",
            tag.order,
            tag.line,
            tag.column,
            tag.category,
            tag.content,
            if tag.hoisted { "  (hoisted)" } else { "" }
        );
    }
    let _ = writeln!(out, "Imports:      {:?}", translation.imports);
    let _ = writeln!(out, "Declarations: {:?}", translation.declarations);
    let _ = writeln!(out, "Segments ({}):", translation.segments.len());
    for (i, segment) in translation.segments.iter().enumerate() {
        let (kind, text) = match segment {
            Segment::Literal(text) => ("literal", text),
            Segment::Expression(code) => ("expression", code),
            Segment::Statement(code) => ("statement", code),
        };
        let _ = writeln!(out, "  {:>3}  {:<10}  {:?}", i, kind, text);
    }
    out
}
