//! ParamStore CLI
//!
//! Host-side tools for logger parameters, on a flash filesystem directory
//! or a radio module NVM image.
//!
//! # Commands
//!
//! - `set` - Store a parameter
//! - `get` - Print a parameter
//! - `list` - Print every parameter
//! - `info` - Display medium usage
//! - `layout` - Display the NVM slot table

mod commands;

use clap::{Parser, Subcommand};
use paramstore_core::{Config, ParamStore, ParamStoreFactory, Platform};
use paramstore_storage::DEFAULT_FS_CAPACITY;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Logger parameter store tools.
#[derive(Parser)]
#[command(name = "paramstore")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Flash filesystem root directory
    #[arg(global = true, short, long, conflicts_with = "nvm")]
    root: Option<PathBuf>,

    /// Radio module NVM image file
    #[arg(global = true, short, long)]
    nvm: Option<PathBuf>,

    /// Filesystem partition size in bytes
    #[arg(global = true, long, default_value_t = DEFAULT_FS_CAPACITY)]
    capacity: u64,

    /// Do not format a filesystem root that fails to mount
    #[arg(global = true, long)]
    no_format: bool,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Store a parameter
    Set {
        /// Parameter key
        key: String,
        /// Parameter value
        value: String,
    },

    /// Print a parameter
    Get {
        /// Parameter key
        key: String,
    },

    /// Print every parameter
    List {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Display medium usage
    Info {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Display the NVM slot table
    Layout {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Show version information
    Version,
}

impl Cli {
    /// Picks the medium from the flags, falling back to the build's platform.
    fn target(&self) -> Result<(Platform, Config), Box<dyn std::error::Error>> {
        let mut config = Config::new()
            .fs_capacity(self.capacity)
            .format_if_unmounted(!self.no_format);

        let platform = if let Some(image) = &self.nvm {
            config = config.nvm_image(image);
            Platform::RadioNvm
        } else if let Some(root) = &self.root {
            config = config.fs_root(root);
            Platform::FlashFs
        } else {
            Platform::current().ok_or("no backend in this build; pass --root or --nvm")?
        };

        Ok((platform, config))
    }

    fn open(&self) -> Result<ParamStore, Box<dyn std::error::Error>> {
        let (platform, config) = self.target()?;
        Ok(ParamStoreFactory::create_for(platform, &config)?)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &cli.command {
        Commands::Set { key, value } => {
            let mut store = cli.open()?;
            commands::params::set(&mut store, key, value)?;
        }
        Commands::Get { key } => {
            let store = cli.open()?;
            commands::params::get(&store, key)?;
        }
        Commands::List { format } => {
            let store = cli.open()?;
            commands::params::list(&store, format)?;
        }
        Commands::Info { format } => {
            let (platform, config) = cli.target()?;
            commands::inspect::info(platform, &config, format)?;
        }
        Commands::Layout { format } => {
            commands::inspect::layout(format)?;
        }
        Commands::Version => {
            println!("ParamStore CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("ParamStore Core v{}", paramstore_core::VERSION);
        }
    }

    Ok(())
}
