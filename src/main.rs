//! nmeta - command-line entry point

use neurometa::ui::output;

fn main() {
    if let Err(err) = neurometa::cli::run() {
        output::error(format!("{err:#}"));
        std::process::exit(1);
    }
}
