//! `ots inspect` — view metadata about previously created secrets.

use crate::api::SecretStatus;
use crate::cli::{build_client, output, secret_url, Cli};
use crate::errors::Result;

/// Execute the `inspect` command.
///
/// Takes the private metadata keys printed at creation time; inspecting
/// does not consume the secret and can be repeated.
pub fn execute(cli: &Cli, keys: &[String]) -> Result<()> {
    let client = build_client(cli)?;

    for (i, key) in keys.iter().enumerate() {
        if i > 0 {
            println!();
        }
        if keys.len() > 1 {
            output::info(key);
        }

        let m = client.retrieve_metadata(key)?;

        println!("Password set: {}", m.passphrase_required);
        println!("Status      : {}", m.status());
        if m.status() == SecretStatus::Read {
            println!("Received at : {}", m.received);
        }
        println!(
            "Expires     : {}",
            m.deadline().format("%Y-%m-%d %H:%M:%S %z UTC")
        );
        println!("Created on  : {}", m.created);
        println!("Created by  : {}", m.customer_id);
        if let Some(recipient) = m.recipient.first() {
            println!("Sent to     : {recipient}");
        }
        if !m.secret_key.is_empty() {
            println!("Secret URL  : {}", secret_url(&cli.host, &m.secret_key));
        }
    }

    Ok(())
}
