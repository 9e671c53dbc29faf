//! yp - Structural diff and patch for YAML files.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use yaml_patch::diff::{compare_with_options, DiffOptions, SequenceMode};
use yaml_patch::patch::{
    apply_document_with_options, patch_document, ApplyOptions, PatchOperation,
};
use yaml_patch::value;

#[derive(Parser)]
#[command(name = "yp")]
#[command(version, about = "Structural diff and patch for YAML documents")]
struct Cli {
    /// Output file. Use '-' for stdout
    #[arg(short, long, default_value = "-")]
    output: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compute the patch that turns one YAML file into another
    Diff {
        /// Original file
        a: PathBuf,
        /// Modified file
        b: PathBuf,
        /// Reconcile sequences by content instead of position
        #[arg(long)]
        content_based: bool,
        /// Emit the patch as JSON instead of YAML
        #[arg(long)]
        json: bool,
    },
    /// Apply a patch file to a YAML file
    Apply {
        /// Document to patch
        file: PathBuf,
        /// Patch file holding a list of operations, in YAML or JSON
        patch: PathBuf,
        /// Apply remove operations instead of skipping them
        #[arg(long)]
        allow_remove: bool,
    },
    /// Diff two YAML files and apply the result back to the first
    Patch {
        /// Original file
        a: PathBuf,
        /// Modified file
        b: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut output: Box<dyn Write> = if cli.output == "-" {
        Box::new(io::stdout())
    } else {
        Box::new(
            fs::File::create(&cli.output)
                .map_err(|e| format!("Failed to create output file {}: {}", cli.output, e))?,
        )
    };

    match cli.command {
        Command::Diff {
            a,
            b,
            content_based,
            json,
        } => diff_files(&a, &b, content_based, json, &mut output),
        Command::Apply {
            file,
            patch,
            allow_remove,
        } => apply_files(&file, &patch, allow_remove, &mut output),
        Command::Patch { a, b } => patch_files(&a, &b, &mut output),
    }
}

fn read_file(path: &PathBuf) -> Result<String, Box<dyn std::error::Error>> {
    Ok(fs::read_to_string(path)
        .map_err(|e| format!("Failed to read file {}: {}", path.display(), e))?)
}

fn diff_files(
    a: &PathBuf,
    b: &PathBuf,
    content_based: bool,
    json: bool,
    output: &mut dyn Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let a_text = read_file(a)?;
    let b_text = read_file(b)?;

    let a_value = value::from_yaml(&a_text)
        .map_err(|e| format!("Failed to parse {}: {}", a.display(), e))?;
    let b_value = value::from_yaml(&b_text)
        .map_err(|e| format!("Failed to parse {}: {}", b.display(), e))?;

    let options = DiffOptions {
        sequence_mode: if content_based {
            SequenceMode::ContentBased
        } else {
            SequenceMode::Positional
        },
    };
    let ops = compare_with_options(&a_value, &b_value, "", &options);

    if json {
        writeln!(output, "{}", serde_json::to_string_pretty(&ops)?)?;
    } else {
        write!(output, "{}", serde_yaml::to_string(&ops)?)?;
    }
    Ok(())
}

fn apply_files(
    file: &PathBuf,
    patch: &PathBuf,
    allow_remove: bool,
    output: &mut dyn Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = read_file(file)?;
    let patch_text = read_file(patch)?;

    // JSON patch files parse fine here as well
    let ops: Vec<PatchOperation> = serde_yaml::from_str(&patch_text)
        .map_err(|e| format!("Failed to parse patch {}: {}", patch.display(), e))?;

    let options = ApplyOptions {
        apply_remove: allow_remove,
    };
    let patched = apply_document_with_options(&doc, &ops, &options)?;
    write!(output, "{}", patched)?;
    Ok(())
}

fn patch_files(
    a: &PathBuf,
    b: &PathBuf,
    output: &mut dyn Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let a_text = read_file(a)?;
    let b_text = read_file(b)?;
    let patched = patch_document(&a_text, &b_text)?;
    write!(output, "{}", patched)?;
    Ok(())
}
