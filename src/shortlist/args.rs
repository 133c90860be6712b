use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "shortlist")]
#[command(about = "Stage items in input lists, rank the keepers in one main list", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new project and make it active
    New { name: String },

    /// List saved projects
    Projects,

    /// Switch the active project (by name or id)
    Use { name: String },

    /// Delete a saved project
    DeleteProject { name: String },

    /// Show the active project's input lists
    Lists,

    /// Add an input list
    AddList { name: String },

    /// Delete an input list (its picked entries go too)
    RmList { name: String },

    /// Add items to an input list
    Add {
        list: String,
        /// Item contents
        #[arg(required = true, num_args = 1..)]
        items: Vec<String>,
    },

    /// Delete an item from an input list (1-based index)
    Rm { list: String, index: usize },

    /// Pick an item into the main list
    #[command(alias = "p")]
    Pick {
        list: String,
        /// 1-based index within the input list
        index: usize,
        /// Insert at this 1-based rank instead of appending
        #[arg(long)]
        at: Option<u32>,
    },

    /// Remove a main-list entry (1-based rank); the source item frees up
    Drop { rank: u32 },

    /// Show the ranked main list
    #[command(alias = "s")]
    Show,

    /// Move a main-list entry to a new rank
    Reorder { from: u32, to: u32 },

    /// List tags with usage counts
    Tags,

    /// Create a tag
    TagNew {
        name: String,
        #[arg(long, default_value = "#4f8ef7")]
        color: String,
    },

    /// Rename and/or recolor a tag
    TagEdit {
        name: String,
        new_name: String,
        #[arg(long)]
        color: Option<String>,
    },

    /// Delete a tag, stripping it from every item
    TagRm { name: String },

    /// Apply a tag to main-list entries by rank
    Tag {
        tag: String,
        #[arg(required = true, num_args = 1..)]
        ranks: Vec<u32>,
    },

    /// Strip a tag from main-list entries by rank
    Untag {
        tag: String,
        #[arg(required = true, num_args = 1..)]
        ranks: Vec<u32>,
    },

    /// Export the active project to a JSON archive
    Export { path: PathBuf },

    /// Import a JSON archive as the active project (ids regenerated)
    Import { path: PathBuf },
}
