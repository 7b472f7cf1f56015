use clap::{Parser, Subcommand};
use planvisite::model::ClientId;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "planvisite", bin_name = "planvisite", version)]
#[command(about = "Plan client visits and orders from the command line", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Data directory (default: $PLANVISITE_HOME or the platform data dir)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a client to the roster
    #[command(alias = "a")]
    Add {
        name: String,
        address: String,
        city: String,

        #[arg(long, default_value = "")]
        region: String,

        #[arg(long, default_value = "")]
        phone: String,
    },

    /// List clients, optionally filtered by a search term
    #[command(alias = "ls")]
    Clients {
        /// Matches name, address, city, region or phone (case-insensitive)
        query: Vec<String>,
    },

    /// Import clients from a delimited file (name;address;city[;region[;phone]])
    ImportClients {
        file: PathBuf,

        /// Field delimiter (default: the import-delimiter config value)
        #[arg(short, long)]
        delimiter: Option<char>,
    },

    /// Plan a visit for one or more clients
    #[command(alias = "p")]
    Plan {
        /// Visit date as YYYY-MM-DD (default: today)
        #[arg(short, long)]
        date: Option<String>,

        /// Client ids (e.g. -c 0 -c 3 or -c 0 3)
        #[arg(short = 'c', long = "client", num_args = 1..)]
        clients: Vec<ClientId>,

        #[arg(short, long)]
        note: Option<String>,

        /// Order total (e.g. 1.234,50)
        #[arg(short, long)]
        total: Option<String>,

        #[arg(long)]
        quote_number: Option<String>,

        #[arg(long)]
        quote_validity: Option<String>,
    },

    /// List planned visits
    #[command(alias = "v")]
    Visits,

    /// Change a planned visit
    #[command(alias = "e")]
    Edit {
        /// Position of the visit as listed
        position: String,

        #[arg(short, long)]
        date: Option<String>,

        /// Replace the clients with these ids (snapshotted again)
        #[arg(short = 'c', long = "client", num_args = 1..)]
        clients: Option<Vec<ClientId>>,

        #[arg(short, long)]
        note: Option<String>,

        #[arg(short, long)]
        total: Option<String>,

        #[arg(long)]
        quote_number: Option<String>,

        #[arg(long)]
        quote_validity: Option<String>,
    },

    /// Delete a planned visit
    #[command(alias = "rm")]
    Delete {
        /// Position of the visit as listed
        position: String,
    },

    /// Export visits as csv-mymaps, csv-simple or json
    Export {
        /// Export format (default: the export-format config value)
        #[arg(short, long)]
        format: Option<String>,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Import visits from a JSON export, replacing the current list
    Import { file: PathBuf },

    /// Get or set configuration
    Config {
        /// Configuration key (import-delimiter, export-format, currency-symbol)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plan_with_repeated_clients() {
        let cli = Cli::try_parse_from([
            "planvisite", "plan", "-d", "2024-05-01", "-c", "0", "-c", "2", "--total", "10,50",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Plan {
                date,
                clients,
                total,
                ..
            }) => {
                assert_eq!(date.as_deref(), Some("2024-05-01"));
                assert_eq!(clients, vec![0, 2]);
                assert_eq!(total.as_deref(), Some("10,50"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_edit_without_clients() {
        let cli = Cli::try_parse_from(["planvisite", "edit", "2", "--note", "x"]).unwrap();
        match cli.command {
            Some(Commands::Edit {
                position,
                clients,
                note,
                ..
            }) => {
                assert_eq!(position, "2");
                assert!(clients.is_none());
                assert_eq!(note.as_deref(), Some("x"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["planvisite", "visits", "-v", "--data-dir", "/tmp/x"])
            .unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/x")));
    }

    #[test]
    fn clients_query_words_are_collected() {
        let cli = Cli::try_parse_from(["planvisite", "clients", "via", "roma"]).unwrap();
        match cli.command {
            Some(Commands::Clients { query }) => assert_eq!(query, vec!["via", "roma"]),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
