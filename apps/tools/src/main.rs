use anyhow::Result;
use clap::{Parser, Subcommand};
use storage::Storage;

#[derive(Parser, Debug)]
struct Cli {
    #[arg(long, default_value = "sqlite://./data/dashboard.db")]
    database_url: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List persisted entries with their last update time.
    Dump,
    Get {
        key: String,
    },
    Set {
        key: String,
        value: String,
    },
    Remove {
        key: String,
    },
    /// Print the persisted state snapshot.
    Snapshot,
    /// Remove every persisted entry, as a logout does.
    Clear,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let storage = Storage::new(&cli.database_url).await?;

    match cli.command {
        Command::Dump => {
            for item in storage.items().await? {
                println!("{}\t{}\t{}", item.updated_at.to_rfc3339(), item.key, item.value);
            }
        }
        Command::Get { key } => match storage.get_item(&key).await? {
            Some(value) => println!("{value}"),
            None => println!("no entry for key={key}"),
        },
        Command::Set { key, value } => {
            storage.set_item(&key, &value).await?;
            println!("stored key={key}");
        }
        Command::Remove { key } => {
            let removed = storage.remove_item(&key).await?;
            println!("removed key={key}: {removed}");
        }
        Command::Snapshot => match storage.load_snapshot().await? {
            Some(snapshot) => println!("{}", serde_json::to_string_pretty(&snapshot)?),
            None => println!("no persisted snapshot"),
        },
        Command::Clear => {
            let removed = storage.clear().await?;
            println!("cleared {removed} entries");
        }
    }

    Ok(())
}
