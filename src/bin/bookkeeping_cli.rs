use bookkeeping_core::{cli::output, cli::run_cli, init};

fn main() {
    init();

    if let Err(err) = run_cli(std::env::args().skip(1).collect()) {
        output::error(&err);
        std::process::exit(1);
    }
}
