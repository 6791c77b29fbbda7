use std::path::Path;

use crate::aggregate::aggregate;
use crate::args::DesignArgs;
use crate::background::BackgroundScreen;
use crate::commands::build_thread_pool;
use crate::common::open_file_or_stdout;
use crate::errors::*;
use crate::reads::read_deduplicated;
use crate::reference;
use crate::table::ResultTable;

fn display_name(path: &str) -> String {
    match Path::new(path).file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => path.to_owned(),
    }
}

/// Selects guides for a single input file; files never share guides or counts.
pub fn design_file(args: &DesignArgs, path: &str) -> Result<ResultTable> {
    let reads = read_deduplicated(&path, &args.filter)?;
    info!(
        "  read {} sequences ({} unique) from {:?}",
        reads.total_reads(),
        reads.len(),
        path
    );

    let selection = aggregate(&reads, args.max_guides, args.alphabet)?;
    info!(
        "  {}% of library targeted by {} guides",
        selection.total_targeted_percent(),
        selection.guides.len()
    );

    for guide in &selection.guides {
        debug!(
            "    {} targets {} reads ({:.4} of library)",
            String::from_utf8_lossy(&guide.spacer),
            guide.weight,
            guide.fraction
        );
    }

    ResultTable::from_selection(&selection, &args.design)
}

pub fn design_tables(args: &DesignArgs) -> Result<ResultTable> {
    let mut tables = Vec::with_capacity(args.inputs.len());
    for path in &args.inputs {
        info!("Analysing {:?}", path);

        match design_file(args, path) {
            Ok(table) => tables.push((display_name(path), table)),
            Err(err) if args.keep_going => {
                use error_chain::ChainedError;
                warn!("Skipping {:?}: {}", path, err.display_chain());
            }
            Err(err) => return Err(err).chain_err(|| format!("failed to process {:?}", path)),
        }
    }

    if tables.is_empty() {
        return Err("none of the input files could be processed".into());
    } else if args.inputs.len() == 1 {
        if let Some((_, table)) = tables.pop() {
            return Ok(table);
        }
    }

    Ok(ResultTable::combine(tables, args.average_mode))
}

pub fn main(args: &DesignArgs) -> Result<()> {
    build_thread_pool(args.threads)?;

    let references = match &args.background {
        Some(path) => {
            info!("Reading background sequences from {:?}", path);
            let references = reference::read_fasta(path)
                .chain_err(|| format!("failed to read background sequences {:?}", path))?;
            info!("  read {} background sequences", references.len());

            Some(references)
        }
        None => None,
    };

    let mut table = design_tables(args)?;

    if let Some(references) = references {
        info!("Counting off-targets for {} oligos", table.oligos().len());
        let mut screen = BackgroundScreen::new(&args.design, args.alphabet, table.oligos());
        screen.screen_all(&references)?;
        info!("  found {} off-target sites", screen.total_hits());

        table.attach_off_targets(&screen);
    }

    info!("Writing {} guides to {:?}", table.len(), args.output.as_deref().unwrap_or("STDOUT"));
    let out = open_file_or_stdout(&args.output)?;
    table.write_csv(out)
}
