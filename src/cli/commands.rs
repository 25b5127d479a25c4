use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "drivealert", about = "Identify drivers by face embedding")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Identify a driver from a face embedding
    Identify {
        /// Embedding as a JSON array of numbers
        #[arg(long, conflicts_with = "file")]
        embedding: Option<String>,
        /// Read the embedding JSON array from a file
        #[arg(long)]
        file: Option<String>,
    },
    /// List active drivers
    Drivers,
    /// Show one driver by user id
    Driver {
        user_id: String,
    },
    /// Set last login time for a driver to now
    TouchLogin {
        user_id: String,
    },
    /// Import driver documents from a JSON file (an array of objects)
    Import {
        path: String,
    },
    /// Check that the store is reachable
    Health,
}
