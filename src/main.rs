use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use xltools::cli::commands::{self, DocRange, MergeJob};
use xltools::error::XlResult;
use xltools::types::{ColumnRef, OutputTarget, Rgb, RowBounds};

#[derive(Parser)]
#[command(name = "xltools")]
#[command(about = "Match and merge Excel documents by cell contents")]
#[command(long_about = "xltools - merge data between Excel workbooks

Reads a lookup table from a source document (match column → data column),
finds each destination row's key in it, and fills the destination data
column with the source value. Changed cells can be highlighted so the
merge is easy to audit.

COMMANDS:
  match   - Merge using exact key matching
  fuzzy   - Merge using fuzzy string matching with literal fallback

EXAMPLES:
  xltools match inventory.xlsx prices.xlsx
  xltools match inventory.xlsx prices.xlsx -i -c
  xltools fuzzy inventory.xlsx prices.xlsx -t 85 -w -o merged.xlsx")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct MergeArgs {
    /// Destination document
    dest: PathBuf,

    /// Source document
    source: PathBuf,

    /// Output document (bare flag writes a _new-suffixed copy; omitted,
    /// the destination document is overwritten)
    #[arg(short, long, value_name = "FILE", num_args = 0..=1, default_missing_value = "")]
    output: Option<PathBuf>,

    /// Column in the destination document used to match the content
    #[arg(long, value_name = "COL", default_value = "B")]
    dest_match: ColumnRef,

    /// Column in the source document used to match the content
    #[arg(long, value_name = "COL", default_value = "W")]
    source_match: ColumnRef,

    /// Column in the destination document which will be populated
    #[arg(long, value_name = "COL", default_value = "G")]
    dest_column: ColumnRef,

    /// Column in the source document used as the source of data
    #[arg(long, value_name = "COL", default_value = "AE")]
    source_column: ColumnRef,

    /// Min row in the destination document
    #[arg(long, value_name = "ROW", default_value_t = 2)]
    dest_min_row: u32,

    /// Min row in the source document
    #[arg(long, value_name = "ROW", default_value_t = 2)]
    source_min_row: u32,

    /// Max row in the destination document (default: actual max row)
    #[arg(long, value_name = "ROW")]
    dest_max_row: Option<u32>,

    /// Max row in the source document (default: actual max row)
    #[arg(long, value_name = "ROW")]
    source_max_row: Option<u32>,

    /// Worksheet name in the destination document (default: first sheet)
    #[arg(long, value_name = "NAME")]
    dest_sheet: Option<String>,

    /// Worksheet name in the source document (default: first sheet)
    #[arg(long, value_name = "NAME")]
    source_sheet: Option<String>,

    /// Do not backup the destination document
    #[arg(short = 'n', long)]
    no_backup: bool,

    /// Show per-update detail
    #[arg(short, long)]
    verbose: bool,
}

impl MergeArgs {
    fn into_job(self) -> MergeJob {
        MergeJob {
            output: OutputTarget::from_flag(self.output),
            dest_range: DocRange {
                sheet: self.dest_sheet,
                match_column: self.dest_match,
                data_column: self.dest_column,
                rows: RowBounds::new(self.dest_min_row, self.dest_max_row),
            },
            source_range: DocRange {
                sheet: self.source_sheet,
                match_column: self.source_match,
                data_column: self.source_column,
                rows: RowBounds::new(self.source_min_row, self.source_max_row),
            },
            backup: !self.no_backup,
            verbose: self.verbose,
            dest: self.dest,
            source: self.source,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Merge two Excel documents using exact key matching.

Builds a lookup table from the source document's match column, then fills
the destination data column wherever the destination match cell equals a
source key. Only cells whose value actually differs from the source are
rewritten (and highlighted, when -c is given).

When the output overwrites the destination document, a _old-suffixed
backup copy is written first unless -n is given.

EXAMPLES:
  xltools match dest.xlsx source.xlsx
  xltools match dest.xlsx source.xlsx --dest-match A --dest-column C
  xltools match dest.xlsx source.xlsx -i -c 00FF00 -o merged.xlsx")]
    /// Merge using exact key matching
    Match {
        #[command(flatten)]
        merge: MergeArgs,

        /// Ignore case and trailing/preceding spaces when matching
        #[arg(short, long)]
        ignore_case: bool,

        /// Set the background color of changed cells to the specified color
        #[arg(
            short = 'c',
            long,
            value_name = "RGB",
            num_args = 0..=1,
            default_missing_value = "FFFF00"
        )]
        color_highlight: Option<Rgb>,
    },

    #[command(long_about = "Merge two Excel documents using fuzzy string matching.

Tries a literal lookup for each destination key first. On a miss, every
source key is scored against the destination key and the best score wins,
provided it reaches the threshold. Changed cells are highlighted by match
quality: green for literal matches, yellow for fuzzy scores of 99 or 100,
red for lower accepted scores.

When the output overwrites the destination document, a _old-suffixed
backup copy is written first unless -n is given.

EXAMPLES:
  xltools fuzzy dest.xlsx source.xlsx
  xltools fuzzy dest.xlsx source.xlsx -t 85 -w
  xltools fuzzy dest.xlsx source.xlsx --source-match A --source-column B -o merged.xlsx")]
    /// Merge using fuzzy string matching with literal fallback
    Fuzzy {
        #[command(flatten)]
        merge: MergeArgs,

        /// Minimum score that will be considered a match
        #[arg(short, long, value_name = "SCORE", default_value_t = 90)]
        threshold: u8,

        /// Use weighted ratio instead of simple ratio for calculating scores
        #[arg(short, long)]
        weighted: bool,
    },
}

fn main() -> XlResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Match {
            merge,
            ignore_case,
            color_highlight,
        } => commands::exact(merge.into_job(), ignore_case, color_highlight),

        Commands::Fuzzy {
            merge,
            threshold,
            weighted,
        } => commands::fuzzy(merge.into_job(), threshold, weighted),
    }
}
