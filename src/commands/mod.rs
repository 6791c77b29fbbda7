pub mod design;
pub mod offtargets;

use crate::errors::*;

pub fn build_thread_pool(threads: usize) -> Result<()> {
    ::rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .chain_err(|| "failed to build thread pool")
}
