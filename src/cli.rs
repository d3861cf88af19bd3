use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::shopping_list::ViewMode;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Pantry-aware shopping lists from meal plans and recipes",
    long_about = None
)]
pub struct Cli {
    /// Household data file (overrides PANTRY_DATA_FILE)
    #[arg(short, long, global = true)]
    pub data: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse an item string into name, quantity and unit
    Parse { text: String },

    /// Show the shopping list
    List {
        #[arg(short, long, value_enum)]
        mode: Option<ViewMode>,
        /// Supermarket layout id (defaults to the selected or default layout)
        #[arg(short, long)]
        layout: Option<String>,
        /// Remember the mode and layout for later calls
        #[arg(long)]
        save: bool,
    },

    /// Select or deselect a saved meal plan
    TogglePlan { id: String },

    /// Select or deselect a favourite recipe
    ToggleRecipe { id: String },

    /// Check or uncheck a shopping list item
    Check { item_id: String },

    /// Set the custom order of the flat list
    Order {
        #[arg(required = true)]
        item_ids: Vec<String>,
    },

    /// Import pantry items from a CSV file
    ImportPantry { csv: PathBuf },

    /// Write the shopping list to a CSV file
    Export {
        csv: PathBuf,
        #[arg(short, long, value_enum)]
        mode: Option<ViewMode>,
        #[arg(short, long)]
        layout: Option<String>,
    },

    /// Manage supermarket layouts
    #[command(subcommand)]
    Layout(LayoutCommand),
}

#[derive(Subcommand, Debug)]
pub enum LayoutCommand {
    List,
    Add {
        #[arg(short, long)]
        name: String,
        /// Category names in aisle order, comma separated
        #[arg(short, long, value_delimiter = ',', required = true)]
        categories: Vec<String>,
        #[arg(long)]
        default: bool,
    },
    Default { id: String },
    Select { id: Option<String> },
    Remove { id: String },
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
