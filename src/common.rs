use std::fs::File;
use std::io;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use flate2::read::MultiGzDecoder;

use crate::errors::*;

/// How characters outside of `ACGTN` are treated when complementing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Alphabet {
    /// Unknown characters (lowercase, IUPAC codes, ...) are passed through as is
    Lenient,
    /// Unknown characters are reported as `InvalidAlphabet` errors
    Strict,
}

impl Default for Alphabet {
    fn default() -> Alphabet {
        Alphabet::Lenient
    }
}

const COMPLEMENTS: [(u8, u8); 5] = [
    (b'A', b'T'),
    (b'C', b'G'),
    (b'G', b'C'),
    (b'T', b'A'),
    (b'N', b'N'),
];

lazy_static! {
    static ref COMPLEMENT: Vec<Option<u8>> = {
        let mut table = vec![None; 256];

        for &(nuc, complement) in &COMPLEMENTS {
            table[nuc as usize] = Some(complement);
        }

        table
    };
}

pub fn check_alphabet(seq: &[u8]) -> Result<()> {
    for (pos, &nuc) in seq.iter().enumerate() {
        if COMPLEMENT[nuc as usize].is_none() {
            return Err(ErrorKind::InvalidAlphabet(nuc, pos).into());
        }
    }

    Ok(())
}

/// Reverse complement using the `ACGTN` table; other characters are kept.
pub fn revcomp(seq: &[u8]) -> Vec<u8> {
    seq.iter()
        .rev()
        .map(|&nuc| COMPLEMENT[nuc as usize].unwrap_or(nuc))
        .collect()
}

pub fn reverse_complement(seq: &[u8], alphabet: Alphabet) -> Result<Vec<u8>> {
    if alphabet == Alphabet::Strict {
        check_alphabet(seq)?;
    }

    Ok(revcomp(seq))
}

/// Opens a (possibly gzip compressed) file for buffered reading.
pub fn open_input<P: AsRef<Path>>(path: P) -> Result<Box<dyn BufRead>> {
    let path = path.as_ref();
    let handle =
        File::open(path).chain_err(|| format!("could not open input file {:?}", path))?;

    let is_gz = path.extension().map(|ext| ext == "gz").unwrap_or(false);
    if is_gz {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(handle))))
    } else {
        Ok(Box::new(BufReader::new(handle)))
    }
}

pub fn open_file_or_stdout(file: &Option<String>) -> Result<Box<dyn Write>> {
    if let Some(path) = file {
        let handle =
            File::create(path).chain_err(|| format!("could not create output file {:?}", path))?;
        let writer = io::BufWriter::new(handle);

        Ok(Box::new(writer))
    } else {
        Ok(Box::new(io::stdout()))
    }
}
