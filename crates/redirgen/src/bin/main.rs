use redirgen::{cli, telemetry};

fn main() {
    let cli = cli::parse_from(std::env::args_os());
    telemetry::init(cli.verbose);

    if let Err(e) = redirgen::run(cli) {
        tracing::error!("error: {}", e);
        std::process::exit(1);
    }
}
