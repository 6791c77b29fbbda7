use crate::common::{reverse_complement, Alphabet};
use crate::constants::*;
use crate::errors::*;

/// Start offsets of every spacer in `seq` that is followed by a 1 nt gap and `GG`.
///
/// Overlapping runs such as `GGG` yield one spacer per `GG`.
pub fn spacer_starts(seq: &[u8]) -> impl Iterator<Item = usize> + '_ {
    seq.windows(PAM_GG.len())
        .enumerate()
        .skip(MIN_PAM_OFFSET)
        .filter(|(_, window)| *window == PAM_GG)
        .map(|(pam_pos, _)| pam_pos - MIN_PAM_OFFSET)
}

/// Guide spacers on the forward strand of `seq`, left to right, duplicates included.
pub fn find_guides(seq: &[u8]) -> Vec<&[u8]> {
    spacer_starts(seq)
        .map(|start| &seq[start..start + SPACER_LEN])
        .collect()
}

/// Forward strand spacers followed by the spacers of the reverse complement.
pub fn find_guides_both_strands(seq: &[u8], alphabet: Alphabet) -> Result<Vec<Vec<u8>>> {
    let rc = reverse_complement(seq, alphabet)?;

    let mut guides: Vec<Vec<u8>> = find_guides(seq).into_iter().map(|v| v.to_vec()).collect();
    guides.extend(find_guides(&rc).into_iter().map(|v| v.to_vec()));

    Ok(guides)
}
