use std::collections::HashMap;
use std::fmt::Debug;
use std::io::BufRead;
use std::path::Path;

use bio::io::{fasta, fastq};

use crate::common::open_input;
use crate::errors::*;

pub type Sequences = Box<dyn Iterator<Item = Result<Vec<u8>>>>;

/// Length bounds (exclusive) and an optional cap on the number of accepted reads.
#[derive(Clone, Debug, PartialEq)]
pub struct ReadFilter {
    pub min_len: usize,
    pub max_len: usize,
    pub max_reads: Option<usize>,
}

impl ReadFilter {
    pub fn new(min_len: usize, max_len: usize, max_reads: Option<usize>) -> ReadFilter {
        ReadFilter {
            min_len,
            max_len,
            max_reads,
        }
    }

    pub fn accepts(&self, seq: &[u8]) -> bool {
        self.min_len < seq.len() && seq.len() < self.max_len
    }
}

impl Default for ReadFilter {
    fn default() -> ReadFilter {
        ReadFilter::new(0, 1000, None)
    }
}

/// Unique reads with their copy numbers, in order of first occurrence.
#[derive(Debug)]
pub struct DedupedReads {
    source: String,
    reads: Vec<(Vec<u8>, u64)>,
    total: u64,
}

impl DedupedReads {
    pub fn collect<I, S>(source: &str, sequences: I, filter: &ReadFilter) -> Result<DedupedReads>
    where
        I: IntoIterator<Item = Result<S>>,
        S: AsRef<[u8]>,
    {
        // sequence -> (order of first occurrence, copy number)
        let mut counts: HashMap<Vec<u8>, (usize, u64)> = HashMap::new();
        let mut accepted = 0;

        for seq in sequences {
            let seq = seq?;
            let seq = seq.as_ref();

            if filter.accepts(seq) {
                let next_idx = counts.len();
                if let Some(entry) = counts.get_mut(seq) {
                    entry.1 += 1;
                } else {
                    counts.insert(seq.to_vec(), (next_idx, 1));
                }

                accepted += 1;
                if let Some(max_reads) = filter.max_reads {
                    if accepted >= max_reads {
                        debug!("Stopped reading {:?} after {} reads", source, accepted);
                        break;
                    }
                }
            }
        }

        let mut reads: Vec<_> = counts.into_iter().collect();
        reads.sort_unstable_by_key(|(_, (idx, _))| *idx);

        Ok(DedupedReads {
            source: source.to_owned(),
            reads: reads
                .into_iter()
                .map(|(seq, (_, count))| (seq, count))
                .collect(),
            total: accepted as u64,
        })
    }

    pub fn from_sequences<I, S>(sequences: I, filter: &ReadFilter) -> DedupedReads
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        let sequences = sequences.into_iter().map(Ok);

        match Self::collect("<memory>", sequences, filter) {
            Ok(reads) => reads,
            Err(_) => unreachable!("infallible sequence source"),
        }
    }

    /// Name of the file (or other source) that the reads were collected from.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn as_slice(&self) -> &[(Vec<u8>, u64)] {
        &self.reads
    }

    pub fn iter(&self) -> impl Iterator<Item = (&[u8], u64)> {
        self.reads.iter().map(|(seq, count)| (seq.as_slice(), *count))
    }

    /// Number of unique sequences
    pub fn len(&self) -> usize {
        self.reads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reads.is_empty()
    }

    /// Sum of all copy numbers
    pub fn total_reads(&self) -> u64 {
        self.total
    }
}

fn fastq_sequences(reader: Box<dyn BufRead>) -> Sequences {
    Box::new(fastq::Reader::new(reader).records().map(|record| {
        record
            .chain_err(|| "failed to read FASTQ record")
            .map(|record| record.seq().to_vec())
    }))
}

fn fasta_sequences(reader: Box<dyn BufRead>) -> Sequences {
    Box::new(fasta::Reader::new(reader).records().map(|record| {
        record
            .chain_err(|| "failed to read FASTA record")
            .map(|record| record.seq().to_vec())
    }))
}

/// Lazily reads sequences from a FASTQ or FASTA file, optionally gzip compressed.
///
/// The format is determined by the first byte of the (decompressed) file.
pub fn read_sequences<P: AsRef<Path> + Debug>(path: &P) -> Result<Sequences> {
    let mut reader = open_input(path)?;
    let first = reader
        .fill_buf()
        .chain_err(|| format!("failed to read from {:?}", path))?
        .first()
        .copied();

    match first {
        Some(b'@') => Ok(fastq_sequences(reader)),
        Some(b'>') => Ok(fasta_sequences(reader)),
        None => Ok(Box::new(std::iter::empty())),
        Some(other) => Err(format!(
            "{:?} is not a FASTQ or FASTA file; unexpected first character {:?}",
            path, other as char
        )
        .into()),
    }
}

pub fn read_deduplicated<P: AsRef<Path> + Debug>(
    path: &P,
    filter: &ReadFilter,
) -> Result<DedupedReads> {
    let source = path.as_ref().to_string_lossy();
    let sequences = read_sequences(path)?;

    DedupedReads::collect(&source, sequences, filter)
        .chain_err(|| format!("failed to read sequences from {:?}", path))
}
