use clap::Parser;
use onetimesecret::cli::{output, Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Create {
            ref value,
            ref email,
            ttl,
            ref passphrase,
        } => onetimesecret::cli::commands::create::execute(
            &cli,
            value.as_deref(),
            email.as_deref(),
            ttl,
            passphrase.as_deref(),
        ),
        Commands::Inspect { ref keys } => {
            onetimesecret::cli::commands::inspect::execute(&cli, keys)
        }
        Commands::Completions { ref shell } => {
            onetimesecret::cli::commands::completions::execute(shell)
        }
    };

    if let Err(e) = result {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}
