use std::collections::HashMap;
use std::fmt::Debug;
use std::io::{Read, Write};
use std::path::Path;

use crate::aggregate::GuideSelection;
use crate::background::BackgroundScreen;
use crate::common::open_input;
use crate::errors::*;
use crate::oligo::OligoDesign;

const OLIGO: &str = "oligo";
const TARGET: &str = "target";
const FRACTION: &str = "fraction";
const TOTAL_TARGETED: &str = "total_targeted";
const FILENAME: &str = "filename";
const AVERAGE_FRACTION: &str = "average_fraction";
const OFF_TARGETS: &str = "Off_targets";

/// How `average_fraction` is calculated when combining several input files.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AverageMode {
    /// Sum of fractions divided by the number of input files, including files
    /// in which the oligo was not selected
    AllFiles,
    /// Sum of fractions divided by the number of files in which the oligo was selected
    PresentFiles,
}

impl Default for AverageMode {
    fn default() -> AverageMode {
        AverageMode::AllFiles
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ResultRow {
    pub oligo: String,
    pub target: String,
    pub fraction: f64,
    pub total_targeted: f64,
    pub filename: Option<String>,
    pub average_fraction: Option<f64>,
    pub off_targets: Option<u64>,
}

/// One row per selected guide per input file.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResultTable {
    rows: Vec<ResultRow>,
    per_file: bool,
    off_targets: bool,
}

impl ResultTable {
    pub fn from_selection(selection: &GuideSelection, design: &OligoDesign) -> Result<ResultTable> {
        let total_targeted = selection.total_targeted_percent();

        let mut rows = Vec::with_capacity(selection.guides.len());
        for guide in &selection.guides {
            let oligo = design.synthesize(&guide.spacer)?;

            rows.push(ResultRow {
                oligo: String::from_utf8_lossy(&oligo).into_owned(),
                target: String::from_utf8_lossy(&guide.spacer).into_owned(),
                fraction: guide.fraction,
                total_targeted,
                filename: None,
                average_fraction: None,
                off_targets: None,
            });
        }

        Ok(ResultTable {
            rows,
            per_file: false,
            off_targets: false,
        })
    }

    /// Concatenates per-file tables, tagging rows with their filename and
    /// the average fraction of their oligo across files.
    pub fn combine(tables: Vec<(String, ResultTable)>, mode: AverageMode) -> ResultTable {
        let n_files = tables.len();

        let mut rows = Vec::new();
        for (filename, table) in tables {
            for mut row in table.rows {
                row.filename = Some(filename.clone());
                rows.push(row);
            }
        }

        // oligo -> (sum of fractions, number of rows)
        let mut sums: HashMap<String, (f64, usize)> = HashMap::new();
        for row in &rows {
            let entry = sums.entry(row.oligo.clone()).or_insert((0.0, 0));
            entry.0 += row.fraction;
            entry.1 += 1;
        }

        for row in &mut rows {
            let (sum, count) = sums[&row.oligo];
            let divisor = match mode {
                AverageMode::AllFiles => n_files,
                AverageMode::PresentFiles => count,
            };

            row.average_fraction = Some(sum / divisor as f64);
        }

        ResultTable {
            rows,
            per_file: true,
            off_targets: false,
        }
    }

    pub fn attach_off_targets(&mut self, screen: &BackgroundScreen) {
        for row in &mut self.rows {
            row.off_targets = Some(screen.hits(row.oligo.as_bytes()));
        }

        self.off_targets = true;
    }

    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct oligos in order of first appearance.
    pub fn oligos(&self) -> Vec<&str> {
        let mut oligos: Vec<&str> = Vec::new();
        for row in &self.rows {
            if !oligos.contains(&row.oligo.as_str()) {
                oligos.push(&row.oligo);
            }
        }

        oligos
    }

    pub fn header(&self) -> Vec<&'static str> {
        let mut header = vec![OLIGO, TARGET, FRACTION, TOTAL_TARGETED];
        if self.per_file {
            header.push(FILENAME);
            header.push(AVERAGE_FRACTION);
        }
        if self.off_targets {
            header.push(OFF_TARGETS);
        }

        header
    }

    pub fn write_csv<W: Write>(&self, out: W) -> Result<()> {
        let mut writer = csv::Writer::from_writer(out);
        writer
            .write_record(self.header())
            .chain_err(|| "failed to write output header")?;

        for row in &self.rows {
            let mut record = vec![
                row.oligo.clone(),
                row.target.clone(),
                format!("{:?}", row.fraction),
                format!("{:?}", row.total_targeted),
            ];

            if self.per_file {
                record.push(row.filename.clone().unwrap_or_default());
                record.push(
                    row.average_fraction
                        .map(|v| format!("{:?}", v))
                        .unwrap_or_default(),
                );
            }

            if self.off_targets {
                record.push(row.off_targets.map(|v| v.to_string()).unwrap_or_default());
            }

            writer
                .write_record(&record)
                .chain_err(|| "failed to write output row")?;
        }

        writer.flush().chain_err(|| "failed to flush output")
    }

    /// Reads a table previously written by `write_csv`; `Off_targets` are discarded.
    pub fn read_csv<R: Read>(input: R) -> Result<ResultTable> {
        let mut reader = csv::Reader::from_reader(input);
        let header = reader.headers()?.clone();

        let column = |name: &str| header.iter().position(|v| v == name);
        let required = |name: &str| {
            column(name).ok_or_else(|| {
                Error::from(ErrorKind::MalformedTable(format!("missing column {:?}", name)))
            })
        };

        let oligo = required(OLIGO)?;
        let target = required(TARGET)?;
        let fraction = required(FRACTION)?;
        let total_targeted = required(TOTAL_TARGETED)?;
        let filename = column(FILENAME);
        let average_fraction = column(AVERAGE_FRACTION);

        let mut rows = Vec::new();
        for (idx, record) in reader.records().enumerate() {
            let record = record?;
            let field = |col: usize| {
                record.get(col).ok_or_else(|| {
                    let msg = format!("row {} has too few columns", idx + 1);
                    Error::from(ErrorKind::MalformedTable(msg))
                })
            };

            rows.push(ResultRow {
                oligo: field(oligo)?.to_owned(),
                target: field(target)?.to_owned(),
                fraction: field(fraction)?.parse()?,
                total_targeted: field(total_targeted)?.parse()?,
                filename: match filename {
                    Some(col) => Some(field(col)?.to_owned()),
                    None => None,
                },
                average_fraction: match average_fraction {
                    Some(col) => Some(field(col)?.parse()?),
                    None => None,
                },
                off_targets: None,
            });
        }

        Ok(ResultTable {
            rows,
            per_file: filename.is_some() && average_fraction.is_some(),
            off_targets: false,
        })
    }

    /// Checks that every oligo is the product of its target under `design`.
    pub fn check_design(&self, design: &OligoDesign) -> Result<()> {
        for row in &self.rows {
            let oligo = design.synthesize(row.target.as_bytes())?;
            if oligo != row.oligo.as_bytes() {
                return Err(ErrorKind::MalformedTable(format!(
                    "oligo {:?} does not match target {:?} with the given promoter and overlap",
                    row.oligo, row.target
                ))
                .into());
            }
        }

        Ok(())
    }
}

pub fn read<P: AsRef<Path> + Debug>(path: &P) -> Result<ResultTable> {
    let input = open_input(path)?;

    ResultTable::read_csv(input).chain_err(|| format!("failed to read table {:?}", path))
}
