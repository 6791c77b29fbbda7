use crate::args::OffTargetsArgs;
use crate::background::BackgroundScreen;
use crate::commands::build_thread_pool;
use crate::common::open_file_or_stdout;
use crate::errors::*;
use crate::reference;
use crate::table;

pub fn main(args: &OffTargetsArgs) -> Result<()> {
    build_thread_pool(args.threads)?;

    info!("Reading guides from {:?}", args.table);
    let mut table = table::read(&args.table)?;
    table.check_design(&args.design)?;
    info!("  read {} guides from table", table.len());

    info!("Reading background sequences from {:?}", args.background);
    let references = reference::read_fasta(&args.background)
        .chain_err(|| format!("failed to read background sequences {:?}", args.background))?;
    info!("  read {} background sequences", references.len());

    let mut screen = BackgroundScreen::new(&args.design, args.alphabet, table.oligos());
    screen.screen_all(&references)?;
    info!("  found {} off-target sites", screen.total_hits());

    table.attach_off_targets(&screen);

    let out = open_file_or_stdout(&args.output)?;
    table.write_csv(out)
}
