use std::collections::HashMap;

use rayon::prelude::*;

use crate::common::Alphabet;
use crate::constants::PROGRESS_INTERVAL;
use crate::errors::*;
use crate::oligo::OligoDesign;
use crate::progress;
use crate::scan::find_guides_both_strands;

/// Counts exact occurrences of a fixed set of oligos in background sequences.
///
/// Every guide found in a background sequence (either strand) is turned into an
/// oligo using the same design as the selected guides; oligos that are not
/// tracked are ignored.
pub struct BackgroundScreen<'a> {
    design: &'a OligoDesign,
    alphabet: Alphabet,
    index: HashMap<Vec<u8>, usize>,
    hits: Vec<u64>,
}

impl<'a> BackgroundScreen<'a> {
    pub fn new<I, S>(
        design: &'a OligoDesign,
        alphabet: Alphabet,
        oligos: I,
    ) -> BackgroundScreen<'a>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        let mut index = HashMap::new();
        for oligo in oligos {
            let next_idx = index.len();
            index.entry(oligo.as_ref().to_vec()).or_insert(next_idx);
        }

        BackgroundScreen {
            design,
            alphabet,
            hits: vec![0; index.len()],
            index,
        }
    }

    /// Indices of tracked oligos for every guide occurrence in `seq`.
    fn scan(&self, seq: &[u8]) -> Result<Vec<usize>> {
        let mut oligo = Vec::new();
        let mut found = Vec::new();

        for guide in find_guides_both_strands(seq, self.alphabet)? {
            self.design.synthesize_into(&guide, &mut oligo)?;
            if let Some(&idx) = self.index.get(&oligo) {
                found.push(idx);
            }
        }

        Ok(found)
    }

    pub fn screen(&mut self, seq: &[u8]) -> Result<()> {
        for idx in self.scan(seq)? {
            self.hits[idx] += 1;
        }

        Ok(())
    }

    /// Screens every reference sequence, reporting progress every 1000 sequences.
    pub fn screen_all(&mut self, references: &[(String, Vec<u8>)]) -> Result<()> {
        let progress = progress::with_interval(
            references.len(),
            "  Screening background: ",
            PROGRESS_INTERVAL,
        );

        let found: Vec<Vec<usize>> = references
            .par_iter()
            .map(|(name, seq)| {
                let found = self
                    .scan(seq)
                    .chain_err(|| format!("failed to screen background sequence {:?}", name));

                progress.inc(1);
                found
            })
            .collect::<Result<_>>()?;

        progress.finish_and_clear();

        for idx in found.into_iter().flatten() {
            self.hits[idx] += 1;
        }

        Ok(())
    }

    /// Number of background occurrences of `oligo`; 0 if not tracked.
    pub fn hits(&self, oligo: &[u8]) -> u64 {
        self.index
            .get(oligo)
            .map(|&idx| self.hits[idx])
            .unwrap_or(0)
    }

    pub fn total_hits(&self) -> u64 {
        self.hits.iter().sum()
    }
}
