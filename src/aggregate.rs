use std::collections::HashMap;

use rayon::prelude::*;

use crate::common::Alphabet;
use crate::errors::*;
use crate::progress;
use crate::reads::DedupedReads;
use crate::scan::find_guides_both_strands;

/// Read-weighted guide frequencies and the guides found in each unique read.
#[derive(Debug, PartialEq)]
pub struct GuideCounts {
    /// (spacer, weight) in the order in which spacers were first seen
    frequencies: Vec<(Vec<u8>, u64)>,
    /// Indices into `frequencies` for every occurrence in each read (both strands)
    membership: Vec<Vec<usize>>,
}

impl GuideCounts {
    /// Scans every unique read on both strands.
    ///
    /// Reads are scanned in parallel, but merged in read order so that the
    /// order of first occurrence does not depend on scheduling.
    pub fn count(reads: &DedupedReads, alphabet: Alphabet) -> Result<GuideCounts> {
        let progress = progress::with_prefix(reads.len(), "  Scanning reads: ");
        let scanned: Vec<Vec<Vec<u8>>> = reads
            .as_slice()
            .par_iter()
            .map(|(seq, _)| {
                let guides = find_guides_both_strands(seq, alphabet);
                progress.inc(1);
                guides
            })
            .collect::<Result<_>>()?;

        progress.finish_and_clear();

        let mut index: HashMap<Vec<u8>, usize> = HashMap::new();
        let mut frequencies: Vec<(Vec<u8>, u64)> = Vec::new();
        let mut membership = Vec::with_capacity(reads.len());

        for ((_, copies), guides) in reads.iter().zip(scanned) {
            let mut members = Vec::with_capacity(guides.len());

            for guide in guides {
                let idx = match index.get(&guide) {
                    Some(&idx) => idx,
                    None => {
                        let idx = frequencies.len();
                        index.insert(guide.clone(), idx);
                        frequencies.push((guide, 0));
                        idx
                    }
                };

                frequencies[idx].1 += copies;
                members.push(idx);
            }

            membership.push(members);
        }

        Ok(GuideCounts {
            frequencies,
            membership,
        })
    }

    /// Number of distinct spacers
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    pub fn frequencies(&self) -> &[(Vec<u8>, u64)] {
        &self.frequencies
    }

    pub fn weight(&self, guide: &[u8]) -> Option<u64> {
        self.frequencies
            .iter()
            .find(|(spacer, _)| spacer.as_slice() == guide)
            .map(|(_, weight)| *weight)
    }

    /// Every guide occurrence in the nth unique read, in scan order.
    pub fn guides_in(&self, read: usize) -> impl Iterator<Item = &[u8]> {
        self.membership[read]
            .iter()
            .map(move |&idx| self.frequencies[idx].0.as_slice())
    }

    /// Indices of the `max_guides` heaviest guides; ties keep first-seen order.
    fn ranked(&self, max_guides: usize) -> Vec<usize> {
        let mut ranked: Vec<usize> = (0..self.frequencies.len()).collect();
        ranked.sort_by(|&a, &b| self.frequencies[b].1.cmp(&self.frequencies[a].1));
        ranked.truncate(max_guides);
        ranked
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SelectedGuide {
    pub spacer: Vec<u8>,
    /// Number of reads (counting each occurrence) containing the spacer
    pub weight: u64,
    /// Fraction of all reads that contain the spacer at least once
    pub fraction: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GuideSelection {
    pub guides: Vec<SelectedGuide>,
    pub targeted_reads: u64,
    pub total_reads: u64,
}

impl GuideSelection {
    /// Percentage of all reads targeted by at least one selected guide.
    pub fn total_targeted_percent(&self) -> f64 {
        100.0 * self.targeted_reads as f64 / self.total_reads as f64
    }
}

/// Selects the `max_guides` most frequent guides and the fraction of reads they target.
pub fn select(
    reads: &DedupedReads,
    counts: &GuideCounts,
    max_guides: usize,
) -> Result<GuideSelection> {
    let total_reads = reads.total_reads();
    if total_reads == 0 {
        return Err(ErrorKind::EmptyInput(reads.source().to_owned()).into());
    }

    let ranked = counts.ranked(max_guides);
    let mut rank_of: Vec<Option<usize>> = vec![None; counts.len()];
    for (rank, &idx) in ranked.iter().enumerate() {
        rank_of[idx] = Some(rank);
    }

    let mut fractions = vec![0.0; ranked.len()];
    let mut targeted_reads = 0;
    let mut matched = Vec::new();
    for (members, (_, copies)) in counts.membership.iter().zip(reads.iter()) {
        matched.clear();
        matched.extend(members.iter().filter_map(|&idx| rank_of[idx]));
        matched.sort_unstable();
        matched.dedup();

        if !matched.is_empty() {
            targeted_reads += copies;

            let fraction = copies as f64 / total_reads as f64;
            for &rank in &matched {
                fractions[rank] += fraction;
            }
        }
    }

    let guides = ranked
        .into_iter()
        .zip(fractions)
        .map(|(idx, fraction)| {
            let (spacer, weight) = &counts.frequencies[idx];

            SelectedGuide {
                spacer: spacer.clone(),
                weight: *weight,
                fraction,
            }
        })
        .collect();

    Ok(GuideSelection {
        guides,
        targeted_reads,
        total_reads,
    })
}

pub fn aggregate(
    reads: &DedupedReads,
    max_guides: usize,
    alphabet: Alphabet,
) -> Result<GuideSelection> {
    if reads.total_reads() == 0 {
        return Err(ErrorKind::EmptyInput(reads.source().to_owned()).into());
    }

    let counts = GuideCounts::count(reads, alphabet)?;
    debug!("Found {} distinct guides in {:?}", counts.len(), reads.source());

    select(reads, &counts, max_guides)
}
