mod build;
mod common;
mod html;
mod patterns;

use build::BuildOptions;
use common::args::{self, Args};
use common::colors::{GREEN, NC, RED, YELLOW};
use common::logging;
use html::Context;
use std::path::PathBuf;
use std::process;

/// CLI entry point that dispatches to the requested command.
/// Kept minimal so each module owns its logic.
///
fn main() {
    let args = args::parse();
    logging::init(args.verbose);

    match args.command.as_str() {
        "build" => run_build(&args),
        "html" => run_html(&args),
        _ => {
            eprintln!("{}Unknown command: {}{}", RED, args.command, NC);
            eprintln!("Usage: markup build <input> <output> [key=value ...]");
            eprintln!("       markup html <template> [--context CTX]");
            process::exit(1);
        }
    }
}

/// `markup build <input> <output> [key=value ...]`
///
fn run_build(args: &Args) {
    let [input, output, overrides @ ..] = args.positional.as_slice() else {
        eprintln!("{}Usage: markup build <input> <output> [key=value ...]{}", RED, NC);
        process::exit(1);
    };

    let options = BuildOptions {
        input: PathBuf::from(input),
        output: PathBuf::from(output),
        root: args.root.clone(),
        target: args.target,
        overrides: overrides.to_vec(),
        verbose: args.verbose,
    };

    if args.check_only {
        // Return 0 or 1 to process exit if the output is stale.
        process::exit(!build::should_build(&options) as i32)
    }

    if let Err(err) = build::build(&options) {
        eprintln!("{}Build failed for {}: {}{}", RED, input, err, NC);
        process::exit(1);
    }

    if !args.verbose {
        println!("{}Built {}{}", GREEN, output, NC);
    }
}

/// `markup html <template>` prints the compiled expression.
///
fn run_html(args: &Args) {
    let [template] = args.positional.as_slice() else {
        eprintln!("{}Usage: markup html <template> [--context CTX]{}", RED, NC);
        process::exit(1);
    };

    let context = Context::new(args.context.as_str());
    if !context.is_top_level() {
        eprintln!("{}Compiling in context: {}{}", YELLOW, context, NC);
    }

    match build::compile_file(&PathBuf::from(template), &context, args.target) {
        Ok(output) => println!("{}", output),
        Err(err) => {
            eprintln!("{}Compile error in {}: {}{}", RED, template, err, NC);
            process::exit(1);
        }
    }
}
