//! `ots create` — create or generate a secret and print the share link.

use std::time::Duration;

use crate::api::SecretOption;
use crate::cli::{build_client, output, secret_url, Cli};
use crate::errors::Result;

/// Execute the `create` command.
pub fn execute(
    cli: &Cli,
    value: Option<&str>,
    email: Option<&str>,
    ttl: Option<u64>,
    passphrase: Option<&str>,
) -> Result<()> {
    let client = build_client(cli)?;

    let mut opts = Vec::new();
    if let Some(seconds) = ttl {
        opts.push(SecretOption::Ttl(Duration::from_secs(seconds)));
    }
    if let Some(phrase) = passphrase {
        opts.push(SecretOption::Passphrase(phrase.to_string()));
    }
    if let Some(addr) = email {
        opts.push(SecretOption::Recipient(addr.to_string()));
    }

    let metadata = match value {
        Some(value) => {
            output::warning("Value provided on command line — it may appear in shell history.");
            let metadata = client.create_secret(value, &opts)?;
            output::success("Secret created");
            metadata
        }
        None => {
            let generated = client.generate_secret(&opts)?;
            output::success("Secret generated");
            println!("Secret value: {}", generated.value);
            generated.metadata
        }
    };

    if email.is_some() {
        output::info(&format!(
            "Email with a link has been sent to {}",
            metadata.recipient.join(", ")
        ));
    } else {
        println!(
            "Secret link: {}",
            secret_url(&cli.host, &metadata.secret_key)
        );
    }
    println!("Metadata key (do not share): {}", metadata.metadata_key);
    output::tip("Run `ots inspect <metadata key>` to check whether it has been read.");

    Ok(())
}
