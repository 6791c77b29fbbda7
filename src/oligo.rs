use crate::constants::{DEFAULT_OVERLAP, DEFAULT_PROMOTER};
use crate::errors::*;

/// Promoter and scaffold overlap flanking the guide spacer in an ordered oligo.
#[derive(Clone, Debug, PartialEq)]
pub struct OligoDesign {
    promoter: Vec<u8>,
    overlap: Vec<u8>,
}

impl OligoDesign {
    pub fn new(promoter: &[u8], overlap: &[u8]) -> OligoDesign {
        OligoDesign {
            promoter: promoter.to_owned(),
            overlap: overlap.to_owned(),
        }
    }

    /// T7 promoter followed by the 5' end of the Cas9 scaffold.
    pub fn t7() -> OligoDesign {
        Self::new(DEFAULT_PROMOTER.as_bytes(), DEFAULT_OVERLAP.as_bytes())
    }

    pub fn promoter(&self) -> &[u8] {
        &self.promoter
    }

    pub fn overlap(&self) -> &[u8] {
        &self.overlap
    }

    /// Writes the oligo for `guide` into `oligo`, replacing its contents.
    ///
    /// Transcription from T7 starts with a G, so one is inserted if the
    /// spacer does not already start with one.
    pub fn synthesize_into(&self, guide: &[u8], oligo: &mut Vec<u8>) -> Result<()> {
        if guide.is_empty() {
            return Err(ErrorKind::InvalidGuide(String::new()).into());
        }

        oligo.clear();
        oligo.extend_from_slice(&self.promoter);
        if guide[0] != b'G' {
            oligo.push(b'G');
        }
        oligo.extend_from_slice(guide);
        oligo.extend_from_slice(&self.overlap);

        Ok(())
    }

    pub fn synthesize(&self, guide: &[u8]) -> Result<Vec<u8>> {
        let mut oligo =
            Vec::with_capacity(self.promoter.len() + 1 + guide.len() + self.overlap.len());
        self.synthesize_into(guide, &mut oligo)?;

        Ok(oligo)
    }
}

impl Default for OligoDesign {
    fn default() -> OligoDesign {
        Self::t7()
    }
}
