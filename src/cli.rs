use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "animeav1", bin_name = "animeav1", version)]
#[command(about = "Search AnimeAV1 and resolve episode streams")]
pub struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print single-line JSON
    #[arg(long, global = true)]
    pub compact: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Search the catalog (first page)
    #[command(after_help = r#"EXAMPLES:
  animeav1 search "one piece"
  animeav1 search frieren --dub
  animeav1 search"#)]
    Search {
        /// Text filter; omit to browse
        text: Option<String>,

        /// Carry the dub variant into the returned ids
        #[arg(long)]
        dub: bool,
    },

    /// List episodes of a search result id or plain slug
    Episodes {
        /// Encoded anime id or slug
        #[arg(value_name = "ID")]
        id: String,
    },

    /// Resolve the HLS stream of an episode id
    Server {
        /// Encoded episode id
        #[arg(value_name = "EPISODE_ID")]
        id: String,

        /// Server name hint (only HLS is resolved)
        #[arg(long, default_value = "HLS")]
        server: String,
    },

    /// Print provider capabilities
    Settings,
}
