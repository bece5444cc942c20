// ABOUTME: Main entry point for the deck-slides program.
// ABOUTME: Provides CLI interface and executes commands from the library.

use clap::{Args, Parser, Subcommand};
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a markdown document into a PPTX presentation
    Compile(CompileArgs),

    /// Print the slide model built from a markdown document as JSON
    DumpModel(DumpModelArgs),
}

#[derive(Args)]
struct CompileArgs {
    /// Path to the markdown file
    #[arg(short, long)]
    input: PathBuf,

    /// Path to output PPTX file
    #[arg(short, long)]
    output: PathBuf,

    /// Presentation title for the document properties
    #[arg(long)]
    title: Option<String>,

    /// Aspect ratio: "16:9" or "4:3"
    #[arg(long)]
    aspect_ratio: Option<String>,

    /// Directory against which relative image paths are resolved
    /// (defaults to the input file's directory)
    #[arg(long)]
    media_dir: Option<PathBuf>,
}

#[derive(Args)]
struct DumpModelArgs {
    /// Path to the markdown file
    #[arg(short, long)]
    input: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let result = match &cli.command {
        Some(Commands::Compile(args)) => compile(args),
        Some(Commands::DumpModel(args)) => dump_model(args),
        None => {
            println!("No command specified. Use --help for usage information.");
            Ok(())
        }
    };

    match result {
        Ok(()) => Ok(()),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn compile(args: &CompileArgs) -> deck::Result<()> {
    println!("Executing compile command...");

    deck::utils::validate_file_exists(&args.input)?;
    let markdown = fs::read_to_string(&args.input).map_err(deck::DeckError::FileReadError)?;

    let tokens = deck::tokenize(&markdown);
    let model = deck::build_slides(&tokens);
    for diagnostic in &model.diagnostics {
        eprintln!("Warning: {}", diagnostic);
    }

    let config = deck::Config::from_env();
    let media_dir = args
        .media_dir
        .clone()
        .or_else(|| args.input.parent().map(PathBuf::from));
    let pptx_config = config.get_pptx_config(
        args.title.clone(),
        args.aspect_ratio.clone(),
        media_dir,
    );
    let layout_config = config.get_layout_config(args.aspect_ratio.as_deref());

    let layouts: Vec<deck::SlideLayout> = model
        .slides
        .iter()
        .map(|slide| deck::layout_slide(slide, &layout_config))
        .collect();

    deck::utils::ensure_parent_directory_exists(&args.output)?;
    deck::generate_pptx(&layouts, &args.output, &pptx_config)?;

    println!(
        "PPTX generated successfully: {:?} ({} slides)",
        args.output,
        layouts.len()
    );
    Ok(())
}

fn dump_model(args: &DumpModelArgs) -> deck::Result<()> {
    deck::utils::validate_file_exists(&args.input)?;
    let markdown = fs::read_to_string(&args.input).map_err(deck::DeckError::FileReadError)?;

    let tokens = deck::tokenize(&markdown);
    let model = deck::build_slides(&tokens);

    let json = serde_json::to_string_pretty(&model)
        .map_err(|e| deck::DeckError::UnknownError(format!("Failed to serialize model: {}", e)))?;
    println!("{}", json);
    Ok(())
}
