//! Standalone validator for logo style catalogs.
//!
//! Checks a style catalog JSON file (or the built-in catalog) and shows
//! which template page each command resolves to.

use std::process::ExitCode;

use clap::Parser;

use logo_maker_bot::config::{InputForm, StyleCatalog};

/// Logo style catalog validator.
#[derive(Parser, Debug)]
#[command(name = "logo_styles")]
#[command(about = "Validates logo style catalogs and shows resolved template URLs")]
#[command(version)]
struct Args {
    /// Path to the JSON catalog to validate. Validates the built-in
    /// catalog when omitted.
    #[arg(short, long)]
    file: Option<String>,

    /// Generate an example catalog at the specified path.
    #[arg(long)]
    generate_example: Option<String>,

    /// Show the resolved URL and input form of each style.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Handle example generation
    if let Some(output_path) = args.generate_example {
        return generate_example(&output_path);
    }

    validate_catalog(args.file.as_deref(), args.verbose)
}

fn generate_example(output_path: &str) -> ExitCode {
    let example = StyleCatalog::example();

    match example.save_to_file(output_path) {
        Ok(()) => {
            println!("✓ Example catalog written to: {output_path}");
            println!("\nThe file contains {} example styles.", example.len());
            println!("Point LOGO_STYLES_PATH (or logo_bot --styles) at it to use it.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("✗ Failed to write example file: {e}");
            ExitCode::FAILURE
        }
    }
}

fn validate_catalog(path: Option<&str>, verbose: bool) -> ExitCode {
    let catalog = match path {
        Some(path) => {
            println!("Validating: {path}\n");
            match StyleCatalog::load_from_file(path) {
                Ok(c) => c,
                Err(e) => {
                    eprintln!("✗ Failed to load catalog: {e}");
                    return ExitCode::FAILURE;
                }
            }
        }
        None => {
            println!("Validating: built-in catalog\n");
            StyleCatalog::builtin()
        }
    };

    if catalog.is_empty() {
        println!("✗ Validation failed: no styles configured");
        return ExitCode::FAILURE;
    }

    let results = catalog.validate_all();
    let mut errors = 0;

    for (style, result) in catalog.styles.iter().zip(&results) {
        if verbose {
            println!(
                "[{}] {} ({})",
                style.name,
                style.endpoint(),
                describe_input(&style.input)
            );
        }

        match result {
            Ok(()) => {
                if verbose {
                    println!("  ✓ OK");
                }
            }
            Err(e) => {
                errors += 1;
                println!("  ✗ Error: {e}");
            }
        }
    }

    println!();

    let total = catalog.len();
    if errors == 0 {
        println!("✓ All {total} styles are valid!");
        ExitCode::SUCCESS
    } else {
        println!("✗ Validation failed: {errors} error(s) in {total} styles");
        println!("  Valid: {}/{total}", total - errors);
        ExitCode::FAILURE
    }
}

/// Describes how a style reads its arguments.
fn describe_input(input: &InputForm) -> String {
    match input {
        InputForm::Single { secondary } => format!("one text, second fixed to \"{secondary}\""),
        InputForm::Pair => "text1;text2".to_owned(),
        InputForm::PairOptional { secondary } => {
            format!("text1[;text2], second defaults to \"{secondary}\"")
        }
    }
}
