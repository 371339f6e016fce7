use crate::core::{MergeEngine, MergeMode, MergeOptions, Ratio, SourceTable};
use crate::error::XlResult;
use crate::excel::{read_sheet, HighlightStyle, SheetWriter};
use crate::types::{suffixed_path, ColumnRef, MatchKind, MergeReport, OutputTarget, Rgb, RowBounds};
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

/// Column and row selection for one side of a merge.
#[derive(Debug, Clone)]
pub struct DocRange {
    /// Worksheet name; `None` takes the first sheet.
    pub sheet: Option<String>,
    /// Column holding the match keys.
    pub match_column: ColumnRef,
    /// Data column: read from on the source side, populated on the
    /// destination side.
    pub data_column: ColumnRef,
    pub rows: RowBounds,
}

/// Options shared by both merge commands.
#[derive(Debug, Clone)]
pub struct MergeJob {
    pub dest: PathBuf,
    pub source: PathBuf,
    pub output: OutputTarget,
    pub dest_range: DocRange,
    pub source_range: DocRange,
    /// Copy the destination document aside before overwriting it.
    pub backup: bool,
    pub verbose: bool,
}

/// Execute the exact-match merge command.
pub fn exact(job: MergeJob, ignore_case: bool, highlight: Option<Rgb>) -> XlResult<()> {
    println!("{}", "🔗 xltools - Exact match merge".bold().green());
    print_job_header(&job);

    match highlight {
        Some(color) => println!(
            "   {}",
            format!("Changed cells will be highlighted, color: {}", color).cyan()
        ),
        None => println!("   {}", "Changed cells will not be highlighted".cyan()),
    }
    println!(
        "   {}",
        if ignore_case {
            "Case-insensitive match requested".cyan()
        } else {
            "Case-sensitive match requested".cyan()
        }
    );

    let style = match highlight {
        Some(rgb) => HighlightStyle::Single(rgb),
        None => HighlightStyle::None,
    };
    run_merge(job, MergeMode::Exact { ignore_case }, style)
}

/// Execute the fuzzy-match merge command.
pub fn fuzzy(job: MergeJob, threshold: u8, weighted: bool) -> XlResult<()> {
    println!("{}", "🔍 xltools - Fuzzy match merge".bold().green());
    print_job_header(&job);

    println!(
        "   {}",
        format!("Minimum score that will be considered a match: {}", threshold).cyan()
    );
    println!(
        "   {}",
        if weighted {
            "Using weighted ratio to calculate scores".cyan()
        } else {
            "Using simple ratio to calculate scores".cyan()
        }
    );

    let ratio = if weighted {
        Ratio::Weighted
    } else {
        Ratio::Simple
    };
    run_merge(
        job,
        MergeMode::Fuzzy { threshold, ratio },
        HighlightStyle::Scored,
    )
}

fn print_job_header(job: &MergeJob) {
    println!("   Destination: {}", job.dest.display());
    println!("   Source: {}", job.source.display());
}

fn run_merge(job: MergeJob, mode: MergeMode, style: HighlightStyle) -> XlResult<()> {
    let ignore_case = matches!(mode, MergeMode::Exact { ignore_case: true });

    let source_sheet = read_sheet(&job.source, job.source_range.sheet.as_deref())?;
    let mut dest_sheet = read_sheet(&job.dest, job.dest_range.sheet.as_deref())?;

    let source_rows = job.source_range.rows.resolve(source_sheet.last_row());
    let dest_rows = job.dest_range.rows.resolve(dest_sheet.last_row());
    println!(
        "   Source document: using rows {} to {}",
        source_rows.start(),
        source_rows.end()
    );
    println!(
        "   Destination document: using rows {} to {}",
        dest_rows.start(),
        dest_rows.end()
    );
    println!();

    let table = SourceTable::from_sheet(
        &source_sheet,
        job.source_range.match_column,
        job.source_range.data_column,
        &job.source_range.rows,
        ignore_case,
    );
    if job.verbose {
        println!(
            "   Source document: {} keys read, {} empty rows skipped",
            table.len(),
            table.skipped_rows()
        );
    }

    let engine = MergeEngine::new(MergeOptions {
        match_column: job.dest_range.match_column,
        target_column: job.dest_range.data_column,
        rows: job.dest_range.rows,
        mode,
    });
    let report = engine.run(&mut dest_sheet, &table);

    if job.verbose {
        print_updates(&report, job.dest_range.data_column);
    }
    print_summary(&report);

    let output = job.output.resolve(&job.dest);
    if output == job.dest && job.backup {
        let backup = suffixed_path(&job.dest, "old");
        fs::copy(&job.dest, &backup)?;
        println!(
            "   {}",
            format!("Backup written: {}", backup.display()).cyan()
        );
    }

    let mut writer = SheetWriter::new(&dest_sheet);
    for update in &report.updates {
        if let Some(color) = style.fill(&update.kind) {
            writer.highlight(update.row, job.dest_range.data_column, color);
        }
    }
    writer.save(&output)?;

    println!("{}", format!("✅ Saved: {}", output.display()).bold().green());
    Ok(())
}

fn print_updates(report: &MergeReport, column: ColumnRef) {
    for update in &report.updates {
        match &update.kind {
            MatchKind::Literal => {
                println!("   {}{}: updated (literal match)", column, update.row)
            }
            MatchKind::Fuzzy { matched, score } => println!(
                "   {}{}: updated from '{}' (score {})",
                column, update.row, matched, score
            ),
        }
    }
}

fn print_summary(report: &MergeReport) {
    println!("{}", "✅ Merge complete:".bold().green());
    println!("   Rows scanned: {}", report.rows_scanned);
    println!(
        "   Cells updated: {} ({} literal, {} fuzzy)",
        report.updates.len().to_string().bold(),
        report.literal_updates(),
        report.fuzzy_updates()
    );
    println!("   Already up to date: {}", report.unchanged);
    println!("   No match: {}", report.unmatched);
    if report.skipped_empty > 0 {
        println!("   Empty match cells skipped: {}", report.skipped_empty);
    }
    println!();
}
