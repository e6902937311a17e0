use clap::Parser;
use cloudcents::cli::{commands, Cli, Commands};

fn main() {
    let cli = Cli::parse();

    cloudcents::logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Auth { ref api_key } => commands::auth::execute(api_key.as_deref()),
        Commands::Login => commands::login::execute(),
        Commands::Completions { shell } => commands::completions::execute(shell),
    };

    if let Err(e) = result {
        tracing::debug!(error = ?e, "command failed");
        cloudcents::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
