use colored::Colorize;
use logstruct_filters::{cli_parse, init_tracing, run};
use std::io::Write;

fn main() {
    let cli = cli_parse();
    init_tracing(cli.verbose, cli.quiet);

    if let Err(err) = run(cli) {
        let _ = std::io::stdout().flush();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        std::process::exit(1);
    }
}
