use std::path::{Path, PathBuf};

use clap::Parser;
use log::{error, info};
use rand::SeedableRng;
use rand::rngs::StdRng;

use wordshape_core::io::{build_output_path, ensure_plain_text, read_text, write_text};
use wordshape_core::model::analysis::Analysis;
use wordshape_core::model::exclusion_set::ExclusionSet;
use wordshape_core::model::frequency_counter::FrequencyCounter;
use wordshape_core::model::frequency_table::FrequencyTable;
use wordshape_core::model::reconstructor::{ReconstructionInput, Truncation, reconstruct};

/// Count the words of a document and synthesize a text with the same shape.
#[derive(Parser, Debug)]
#[command(name = "wordshape", version)]
struct Cli {
    /// Plain-text document to analyze.
    input: PathBuf,

    /// Newline-delimited list of words to leave out of the counts.
    #[arg(long, default_value = "excluded.txt")]
    exclude: PathBuf,

    /// Folder receiving every written file.
    #[arg(long, default_value = ".")]
    output_dir: String,

    /// Only print the N most frequent words.
    #[arg(long, value_name = "N")]
    top: Option<usize>,

    /// Write the counts to `<name>_word_count.txt`.
    #[arg(long)]
    save_counts: bool,

    /// Synthesize a text from the counts and the document's shape.
    #[arg(long)]
    reconstruct: bool,

    /// Write the synthesized text to `<name>_reconstructed.txt` instead of printing it.
    #[arg(long, requires = "reconstruct")]
    save_reconstructed: bool,

    /// Seed the random source for a reproducible reconstruction.
    #[arg(long)]
    seed: Option<u64>,

    /// Cut the synthesized text between tokens rather than at the exact length.
    #[arg(long)]
    token_boundary: bool,

    /// Reuse or refresh `<name>_analysis.bin` instead of recounting every run.
    #[arg(long)]
    cache: bool,
}

impl Cli {
    fn reconstruction_input(&self) -> ReconstructionInput {
        ReconstructionInput {
            truncation: if self.token_boundary { Truncation::TokenBoundary } else { Truncation::Hard },
        }
    }

    fn output_path(&self, suffix: &str, extension: &str) -> wordshape_core::Result<PathBuf> {
        build_output_path(&self.input, &self.output_dir, suffix, extension)
    }
}

/// Writes the counts, reporting a failure without stopping the run.
///
/// Returns the written path on success.
fn save_counts(cli: &Cli, table: &FrequencyTable) -> Option<PathBuf> {
    let result = cli.output_path("word_count", "txt").and_then(|path| {
        table.save(&path)?;
        Ok(path)
    });

    match result {
        Ok(path) => {
            println!("Word count information has been written to {}", path.display());
            Some(path)
        }
        Err(e) => {
            error!("Error writing to file: {e}");
            None
        }
    }
}

/// Picks the table used for reconstruction.
///
/// A persisted table is read back so the synthesized text reflects what is on disk.
fn reconstruction_table(saved: Option<&Path>, counted: &FrequencyTable) -> wordshape_core::Result<FrequencyTable> {
    match saved {
        Some(path) => FrequencyTable::load(path),
        None => Ok(counted.clone()),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    // The document itself is required, unlike the exclusion list
    ensure_plain_text(&cli.input)?;
    let text = read_text(&cli.input)?;
    info!("Read {} chars from {}", text.chars().count(), cli.input.display());

    let counter = FrequencyCounter::new(ExclusionSet::load_or_empty(&cli.exclude));
    let analysis = if cli.cache {
        Analysis::load_or_compute(&text, &counter, cli.output_path("analysis", "bin")?)
    } else {
        Analysis::new(&text, &counter)
    };

    let ranked = analysis.table().ranked();
    let shown = cli.top.unwrap_or(ranked.len());
    for (word, count) in ranked.iter().take(shown) {
        println!("{word}: {count}");
    }

    let saved = if cli.save_counts { save_counts(&cli, analysis.table()) } else { None };

    if !cli.reconstruct {
        return Ok(());
    }

    let table = match reconstruction_table(saved.as_deref(), analysis.table()) {
        Ok(table) => table,
        Err(e) => {
            error!("Error reading word count file: {e}; skipping reconstruction");
            return Ok(());
        }
    };

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let reconstructed = reconstruct(&table, analysis.shape(), &cli.reconstruction_input(), &mut rng);

    if cli.save_reconstructed {
        let result = cli
            .output_path("reconstructed", "txt")
            .and_then(|path| write_text(&path, &reconstructed).map(|_| path));
        match result {
            Ok(path) => println!("Reconstructed text has been written to {}", path.display()),
            Err(e) => error!("Error writing reconstructed text to file: {e}"),
        }
    } else {
        println!("{reconstructed}");
    }

    Ok(())
}
