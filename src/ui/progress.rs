use indicatif::{ProgressBar, ProgressStyle};

/// Bar shown while detail fetches are in flight. Hidden when stdout
/// is not a terminal, so batch runs and tests stay quiet.
pub fn fetch_bar(total: u64) -> ProgressBar {
    if !console::Term::stdout().is_term() {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} entries")
            .unwrap()
            .progress_chars("#>-"),
    );
    pb
}
