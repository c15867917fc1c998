use log::error;
use station_cmp::compare::{init_logging, parse_cli, run};

fn main() {
    let config = parse_cli();
    init_logging(config.verbosity);
    println!(
        "compare {} with {} and plot to {}",
        config.sola.display(),
        config.local.display(),
        config.svgout.display()
    );
    if let Err(e) = run(&config) {
        error!("could not plot the comparison: {}", e);
    }
}
