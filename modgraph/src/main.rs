use clap::Parser;

fn main() {
    let cli = modgraph::args::Cli::parse();
    modgraph::logging::init(cli.verbose, cli.log_json);

    let stdout = std::io::stdout();
    let code = match modgraph::run::run(&cli, &mut stdout.lock()) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("modgraph: {err}");
            1
        }
    };
    std::process::exit(code);
}
