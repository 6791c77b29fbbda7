pub use indicatif::ProgressBar;
pub use indicatif::ProgressStyle;

pub fn with_prefix(size: usize, prefix: &str) -> ProgressBar {
    with_interval(size, prefix, size / 10000)
}

/// Progress bar that redraws at most once every `interval` steps.
pub fn with_interval(size: usize, prefix: &str, interval: usize) -> ProgressBar {
    let template = format!(
        "{}{}",
        prefix, "{wide_bar} {pos}/{len} [{elapsed} elapsed; {eta} left]"
    );

    let progress = ProgressBar::new(size as u64);
    progress.set_draw_delta(interval as u64);
    progress.set_style(ProgressStyle::default_bar().template(&template));

    progress
}
