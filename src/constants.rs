/// Length of a Cas9 guide spacer.
pub const SPACER_LEN: usize = 20;

/// Number of nucleotides between the spacer and the `GG` of the `NGG` PAM.
pub const PAM_GAP: usize = 1;

/// Smallest offset at which a `GG` can follow a full spacer and the PAM gap.
pub const MIN_PAM_OFFSET: usize = SPACER_LEN + PAM_GAP;

pub const PAM_GG: &[u8] = b"GG";

// T7 promoter and the start of the Cas9 scaffold
pub const DEFAULT_PROMOTER: &str = "TTCTAATACGACTCACTATA";
pub const DEFAULT_OVERLAP: &str = "GTTTTAGAGCTAGA";

pub const DEFAULT_MAX_GUIDES: &str = "50";
pub const DEFAULT_MIN_READ_LENGTH: &str = "0";
pub const DEFAULT_MAX_READ_LENGTH: &str = "1000";
pub const DEFAULT_MAX_READS: &str = "-1";

/// Background sequences between progress reports
pub const PROGRESS_INTERVAL: usize = 1000;
