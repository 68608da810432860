mod cli;
mod runner;
mod suite;

fn main() {
    let matches = cli::build_cli().get_matches();
    let params = cli::Params::from_matches(&matches);

    let mut stdout = std::io::stdout().lock();
    // Parse failures are reported per file, never through the exit code.
    let _ = runner::run(&params.into(), &mut stdout);
}
