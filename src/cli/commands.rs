use clap::{Parser, Subcommand};

use crate::services::DEFAULT_LIMIT;

#[derive(Parser)]
#[command(name = "ratreader")]
#[command(about = "Terminal client for the Rat Reader RSS service")]
#[command(version)]
#[command(after_help = "Examples:
  ratreader config https://yoursite.com/ratReader/api.php
  ratreader login
  ratreader feeds
  ratreader articles --verbose
  ratreader read 1")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in to Rat Reader
    Login {
        /// Username (prompted if omitted)
        #[arg(short, long)]
        username: Option<String>,

        /// Password (prompted if omitted)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Create an account and log in
    Register {
        /// Username (prompted if omitted)
        #[arg(short, long)]
        username: Option<String>,

        /// Password (prompted if omitted)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Log out
    Logout,

    /// Show login status
    Status,

    /// List your feeds
    Feeds,

    /// Add a new feed
    AddFeed {
        /// Feed URL
        url: String,

        /// Feed name (defaults to the feed's title)
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Remove a feed
    RemoveFeed {
        /// Feed ID to remove
        feed_id: String,

        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Ask the server to fetch all feeds now
    Refresh,

    /// List articles
    Articles {
        /// Filter by feed ID
        #[arg(short, long)]
        feed_id: Option<String>,

        /// Max articles to show
        #[arg(
            short,
            long,
            default_value_t = DEFAULT_LIMIT as u32,
            value_parser = clap::value_parser!(u32).range(1..)
        )]
        limit: u32,

        /// Show descriptions
        #[arg(short, long)]
        verbose: bool,

        /// Show article links
        #[arg(long)]
        links: bool,
    },

    /// Read an article by its number in the `articles` listing
    ///
    /// The listing is fetched again, so numbers only match while the
    /// server's ordering is unchanged. Pass the same --feed-id used with
    /// `articles` to number the same listing.
    Read {
        /// Article number from the list
        number: String,

        /// Number within this feed's listing
        #[arg(short, long)]
        feed_id: Option<String>,
    },

    /// Set the API URL
    Config {
        /// API URL
        url: String,
    },
}
