//! Implementation of the `sspc compile` command.
//!
//! # What `sspc compile` does
//!
//! 1. Resolves the product name (`--product` or `PRODUCT_NAME`); nothing is
//!    read or written if it is missing
//! 2. Loads the config and the module skeleton
//! 3. Reads `<product>.<template_extension>` and translates it
//! 4. Atomically writes `<product>.<generated_extension>`, or prints it with
//!    `--stdout`
//!
//! A failed translation leaves any existing generated module untouched.


use super::{build_emitter, event_log_path, record_outcome};
use crate::cli::CompileArgs;
use crate::config::Config;
use crate::context::BuildContext;
use crate::error::Result;
use crate::fs::atomic_write_file;
use crate::translate::{Emitter, Translation, compile_template};

/// Execute the `sspc compile` command.
pub fn cmd_compile(args: CompileArgs) -> Result<()> {
    let product = BuildContext::resolve_product(args.product.as_deref())?;

    let config = Config::discover(args.common.config.as_deref(), &args.common.dir)?;
    let emitter = build_emitter(&config, args.output.skeleton.as_deref())?;
    let ctx = BuildContext::new(
        product,
        &args.common.dir,
        args.output.out_dir.as_deref(),
        &config,
    )?;

    if args.stdout {
        let template = ctx.read_template()?;
        let (_, module) = compile_template(&template, &emitter, &ctx.product, &ctx.source_name())?;
        print!("{}", module);
        return Ok(());
    }

    let outcome = compile_to_file(&ctx, &emitter);
    record_outcome(event_log_path(&config, &args.output).as_deref(), &ctx, &outcome);
    let translation = outcome?;

    if !args.output.quiet {
        report_compiled(&ctx, &translation);
    }
    Ok(())
}

/// Translate `ctx`'s template and write the generated module.
///
/// The destination is only replaced once the whole module has been rendered.
pub(crate) fn compile_to_file(ctx: &BuildContext, emitter: &Emitter) -> Result<Translation> {
    let template = ctx.read_template()?;
    let (translation, module) =
        compile_template(&template, emitter, &ctx.product, &ctx.source_name())?;
    atomic_write_file(&ctx.dest_path, &module)?;
    Ok(translation)
}

pub(crate) fn report_compiled(ctx: &BuildContext, translation: &Translation) {
    eprintln!(
        "Compiled {} -> {} ({} segments, {} from code tags)",
        ctx.source_path.display(),
        ctx.dest_path.display(),
        translation.segments.len(),
        translation.code_segment_count()
    );
}
