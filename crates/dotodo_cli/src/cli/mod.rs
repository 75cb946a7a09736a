use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Initialize a todo store in the current directory
    ///
    /// Example: todo init
    /// Example: todo init --example --random-ids
    Init {
        /// Populate the store with generated example tasks
        #[arg(long)]
        example: bool,
        /// Use random string identifiers instead of sequential integers
        #[arg(long)]
        random_ids: bool,
    },
    /// Add a new task
    ///
    /// Example: todo add "Buy milk" --important
    /// Example: todo add            (prompts for each field)
    Add {
        name: Option<String>,
        #[arg(short = 'd', long)]
        description: Option<String>,
        #[arg(short = 'i', long)]
        important: bool,
        /// Shell command to run when the task is completed
        #[arg(short = 'c', long)]
        command: Option<String>,
    },
    /// List tasks
    ///
    /// Example: todo ls
    /// Example: todo ls --imp --uncom
    Ls {
        /// Only completed tasks
        #[arg(long = "com")]
        completed: bool,
        /// Only uncompleted tasks
        #[arg(long = "uncom")]
        uncompleted: bool,
        /// Only important tasks
        #[arg(long = "imp")]
        important: bool,
    },
    /// Mark a task as completed
    ///
    /// Example: todo done 3
    Done {
        id: String,
    },
    /// Delete the todo store and everything in it
    ///
    /// Example: todo rm
    Rm,
}
