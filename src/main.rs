//! sv binary entry point.

fn main() {
    if let Err(err) = scenevault::cli::run() {
        scenevault::ui::output::error(format!("{err:#}"));
        std::process::exit(1);
    }
}
