use std::collections::HashSet;
use std::fmt::Debug;
use std::path::Path;

use bio::io::fasta;

use crate::common::open_input;
use crate::errors::*;

/// Named reference sequences, in file order.
pub type References = Vec<(String, Vec<u8>)>;

/// Reads a (possibly gzip compressed) FASTA file of background sequences.
///
/// Multi-line records are concatenated. Names must be non-empty and unique.
pub fn read_fasta<P: AsRef<Path> + Debug>(path: &P) -> Result<References> {
    let reader = fasta::Reader::new(open_input(path)?);

    let mut names = HashSet::new();
    let mut references = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record.chain_err(|| {
            let msg = format!("failed to read record {} of {:?}", idx + 1, path);
            ErrorKind::MalformedReference(msg)
        })?;

        record.check().map_err(|msg| {
            ErrorKind::MalformedReference(format!("record {} of {:?}: {}", idx + 1, path, msg))
        })?;

        let name = record.id().to_owned();
        if !names.insert(name.clone()) {
            return Err(ErrorKind::MalformedReference(format!(
                "duplicate sequence name {:?} in {:?}",
                name, path
            ))
            .into());
        }

        references.push((name, record.seq().to_owned()));
    }

    Ok(references)
}
