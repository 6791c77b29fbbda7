use std::str::FromStr;

use clap::{App, Arg, ArgMatches, SubCommand};

use crate::common::Alphabet;
use crate::constants::*;
use crate::errors::*;
use crate::oligo::OligoDesign;
use crate::reads::ReadFilter;
use crate::table::AverageMode;

#[derive(Debug)]
pub struct DesignArgs {
    pub inputs: Vec<String>,
    pub output: Option<String>,
    pub filter: ReadFilter,
    pub max_guides: usize,
    pub background: Option<String>,
    pub design: OligoDesign,
    pub threads: usize,
    pub alphabet: Alphabet,
    pub keep_going: bool,
    pub average_mode: AverageMode,
}

#[derive(Debug)]
pub struct OffTargetsArgs {
    pub table: String,
    pub background: String,
    pub output: Option<String>,
    pub design: OligoDesign,
    pub threads: usize,
    pub alphabet: Alphabet,
}

pub enum Args {
    Design(DesignArgs),
    OffTargets(OffTargetsArgs),
    None,
}

fn threads_arg<'a, 'b>() -> Arg<'a, 'b> {
    Arg::with_name("threads")
        .long("threads")
        .takes_value(true)
        .allow_hyphen_values(true)
        .number_of_values(1)
        .default_value("0")
        .help("Number of threads used for computation (0 for automatic).")
}

fn output_arg<'a, 'b>() -> Arg<'a, 'b> {
    Arg::with_name("output")
        .short("o")
        .long("output")
        .takes_value(true)
        .allow_hyphen_values(true)
        .required(true)
        .help("Output CSV file; use '-' to write to STDOUT.")
}

fn oligo_args<'a, 'b>() -> Vec<Arg<'a, 'b>> {
    vec![
        Arg::with_name("promoter")
            .long("promoter")
            .takes_value(true)
            .default_value(DEFAULT_PROMOTER)
            .help("Promoter sequence placed 5' of the guide in each oligo."),
        Arg::with_name("overlap")
            .long("overlap")
            .takes_value(true)
            .default_value(DEFAULT_OVERLAP)
            .help("Scaffold overlap placed 3' of the guide in each oligo."),
        Arg::with_name("strict-alphabet")
            .long("strict-alphabet")
            .help("Fail on nucleotides other than A, C, G, T, and N."),
    ]
}

fn design_command<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name("design")
        .about("Find, rank, and synthesize oligos for gRNAs targeting a sequenced library")
        .arg(
            Arg::with_name("input")
                .short("i")
                .long("input")
                .takes_value(true)
                .multiple(true)
                .required(true)
                .help("FASTQ or FASTA file(s), optionally gzip compressed."),
        )
        .arg(output_arg())
        .arg(
            Arg::with_name("max_reads")
                .short("r")
                .long("max_reads")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value(DEFAULT_MAX_READS)
                .help("Max reads to examine per file (0 or negative for no limit)."),
        )
        .arg(
            Arg::with_name("max_guides")
                .short("g")
                .long("max_guides")
                .takes_value(true)
                .default_value(DEFAULT_MAX_GUIDES)
                .help("Number of guides to select per file."),
        )
        .arg(
            Arg::with_name("min_read_length")
                .long("min_read_length")
                .takes_value(true)
                .default_value(DEFAULT_MIN_READ_LENGTH)
                .help("Reads must be longer than this."),
        )
        .arg(
            Arg::with_name("max_read_length")
                .long("max_read_length")
                .takes_value(true)
                .default_value(DEFAULT_MAX_READ_LENGTH)
                .help("Reads must be shorter than this."),
        )
        .arg(
            Arg::with_name("background")
                .short("b")
                .long("background")
                .takes_value(true)
                .help("FASTA file of background sequences used to count off-targets."),
        )
        .args(&oligo_args())
        .arg(threads_arg())
        .arg(
            Arg::with_name("keep-going")
                .long("keep-going")
                .help("Skip input files that cannot be processed instead of aborting."),
        )
        .arg(
            Arg::with_name("average-present")
                .long("average-present")
                .help(
                    "Average fractions over the files in which a guide was selected, \
                     rather than over all input files.",
                ),
        )
}

fn off_targets_command<'a, 'b>() -> App<'a, 'b> {
    SubCommand::with_name("offtargets")
        .about("Count off-targets for the oligos in a table produced by 'design'")
        .arg(
            Arg::with_name("table")
                .long("table")
                .takes_value(true)
                .required(true)
                .help("CSV table produced by the 'design' command."),
        )
        .arg(
            Arg::with_name("background")
                .short("b")
                .long("background")
                .takes_value(true)
                .required(true)
                .help("FASTA file of background sequences."),
        )
        .arg(output_arg())
        .args(&oligo_args())
        .arg(threads_arg())
        .alias("off_targets")
}

fn get_str<'a>(matches: &'a ArgMatches, key: &str) -> Result<&'a str> {
    match matches.value_of(key) {
        Some(value) => Ok(value),
        None => Err(format!("Required option {:?} not set", key).into()),
    }
}

fn get_string(matches: &ArgMatches, key: &str) -> Result<String> {
    get_str(matches, key).map(|v| v.into())
}

fn parse_value<T: FromStr>(matches: &ArgMatches, key: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    let s = get_str(matches, key)?;

    match s.parse() {
        Ok(v) => Ok(v),
        Err(err) => {
            let msg = format!("Invalid --{} ({:?}) value: {}", key, s, err);
            Err(ErrorKind::Configuration(msg).into())
        }
    }
}

fn parse_output(matches: &ArgMatches) -> Result<Option<String>> {
    let output = get_string(matches, "output")?;

    Ok(if output == "-" { None } else { Some(output) })
}

fn parse_sequence(matches: &ArgMatches, key: &str) -> Result<Vec<u8>> {
    let value = get_str(matches, key)?;

    if value.is_empty() {
        let msg = format!("--{} must not be empty", key);
        return Err(ErrorKind::Configuration(msg).into());
    } else if let Some(nuc) = value.bytes().find(|nuc| !b"ACGT".contains(nuc)) {
        let msg = format!("--{} contains invalid nucleotide {:?}", key, nuc as char);
        return Err(ErrorKind::Configuration(msg).into());
    }

    Ok(value.as_bytes().to_owned())
}

fn parse_design(matches: &ArgMatches) -> Result<OligoDesign> {
    let promoter = parse_sequence(matches, "promoter")?;
    let overlap = parse_sequence(matches, "overlap")?;

    Ok(OligoDesign::new(&promoter, &overlap))
}

fn parse_alphabet(matches: &ArgMatches) -> Alphabet {
    if matches.is_present("strict-alphabet") {
        Alphabet::Strict
    } else {
        Alphabet::Lenient
    }
}

fn parse_filter(matches: &ArgMatches) -> Result<ReadFilter> {
    let min_len: usize = parse_value(matches, "min_read_length")?;
    let max_len: usize = parse_value(matches, "max_read_length")?;
    if min_len >= max_len {
        let msg = format!(
            "--min_read_length ({}) must be less than --max_read_length ({})",
            min_len, max_len
        );
        return Err(ErrorKind::Configuration(msg).into());
    }

    let max_reads: i64 = parse_value(matches, "max_reads")?;
    let max_reads = if max_reads > 0 {
        Some(max_reads as usize)
    } else {
        None
    };

    Ok(ReadFilter::new(min_len, max_len, max_reads))
}

fn parse_max_guides(matches: &ArgMatches) -> Result<usize> {
    let max_guides: i64 = parse_value(matches, "max_guides")?;
    if max_guides <= 0 {
        let msg = format!("--max_guides must be at least 1, not {}", max_guides);
        return Err(ErrorKind::Configuration(msg).into());
    }

    Ok(max_guides as usize)
}

fn parse_design_args(matches: &ArgMatches) -> Result<DesignArgs> {
    let inputs: Vec<String> = match matches.values_of("input") {
        Some(values) => values.map(|v| v.to_string()).collect(),
        None => return Err("Required option \"input\" not set".into()),
    };

    Ok(DesignArgs {
        inputs,
        output: parse_output(matches)?,
        filter: parse_filter(matches)?,
        max_guides: parse_max_guides(matches)?,
        background: matches.value_of("background").map(|s| s.to_string()),
        design: parse_design(matches)?,
        threads: parse_value(matches, "threads")?,
        alphabet: parse_alphabet(matches),
        keep_going: matches.is_present("keep-going"),
        average_mode: if matches.is_present("average-present") {
            AverageMode::PresentFiles
        } else {
            AverageMode::AllFiles
        },
    })
}

fn parse_off_targets_args(matches: &ArgMatches) -> Result<OffTargetsArgs> {
    Ok(OffTargetsArgs {
        table: get_string(matches, "table")?,
        background: get_string(matches, "background")?,
        output: parse_output(matches)?,
        design: parse_design(matches)?,
        threads: parse_value(matches, "threads")?,
        alphabet: parse_alphabet(matches),
    })
}

pub fn build_cli<'a, 'b>() -> App<'a, 'b> {
    App::new("guidepool")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Mikkel Schubert")
        .about("Design Cas9 gRNA oligos targeting the most abundant sequences in a library")
        .subcommand(design_command())
        .subcommand(off_targets_command())
}

pub fn parse_matches(matches: &ArgMatches) -> Result<Args> {
    if let Some(matches) = matches.subcommand_matches("design") {
        Ok(Args::Design(parse_design_args(matches)?))
    } else if let Some(matches) = matches.subcommand_matches("offtargets") {
        Ok(Args::OffTargets(parse_off_targets_args(matches)?))
    } else {
        eprintln!("{}", matches.usage());

        Ok(Args::None)
    }
}

pub fn parse_args() -> Result<Args> {
    parse_matches(&build_cli().get_matches())
}
