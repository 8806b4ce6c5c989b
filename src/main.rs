//! mrvc CLI - minimal content-addressed version control

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use mrvc::fs::normalize;
use mrvc::logging::init_logging;
use mrvc::ops::{commit, log, ls_tree, status, CommitRequest, FileSelection};
use mrvc::{read_blob, read_commit, read_tree, Hash, Repo};

#[derive(Parser)]
#[command(name = "mrvc")]
#[command(about = "minimal content-addressed version control")]
#[command(version)]
struct Cli {
    /// repository root
    #[arg(short = 'C', long, global = true, default_value = ".", env = "MRVC_REPO")]
    repo: PathBuf,

    /// more log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// initialize a new repository
    Init {
        /// repository name
        #[arg(long)]
        name: String,

        /// repository author
        #[arg(long)]
        author: String,
    },

    /// snapshot files and advance HEAD
    Commit {
        /// commit message
        #[arg(short, long)]
        message: String,

        /// author name (defaults to the repository author)
        #[arg(short, long)]
        author: Option<String>,

        /// commit every tracked file
        #[arg(long, conflicts_with = "files")]
        all: bool,

        /// files to commit; a single `*` means every tracked file
        files: Vec<PathBuf>,
    },

    /// compare the working directory against HEAD
    Status,

    /// show commit history from HEAD
    Log {
        /// maximum number of commits to show
        #[arg(short = 'n', long)]
        max_count: Option<usize>,
    },

    /// list files recorded in a commit
    LsTree {
        /// commit hash (defaults to HEAD)
        commit: Option<String>,
    },

    /// show contents of an object
    CatFile {
        /// object type (blob, tree, commit)
        object_type: String,

        /// object hash
        object: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose) {
        eprintln!("warning: {}", e);
    }

    if let Err(e) = run(cli) {
        eprintln!("error: {}", e);
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn run(cli: Cli) -> mrvc::Result<()> {
    match cli.command {
        Commands::Init { name, author } => {
            let repo = Repo::init(&cli.repo, &name, &author)?;
            println!("initialized mrvc repository at {}", repo.root().display());
        }

        Commands::Commit {
            message,
            author,
            all,
            files,
        } => {
            let repo = Repo::open(&cli.repo)?;
            let author = match author {
                Some(author) => author,
                None => repo.metadata()?.author,
            };

            let request = CommitRequest::new(message, author, file_selection(all, files)?);
            let hash = commit(&repo, &request)?;
            println!("{}", hash);
        }

        Commands::Status => {
            let repo = Repo::open(&cli.repo)?;
            let status = status(&repo)?;
            print!("{}", status);
            if !matches!(status, mrvc::Status::Changes(_)) {
                println!();
            }
        }

        Commands::Log { max_count } => {
            let repo = Repo::open(&cli.repo)?;
            for entry in log(&repo, max_count)? {
                println!("{}", entry);
            }
        }

        Commands::LsTree { commit } => {
            let repo = Repo::open(&cli.repo)?;
            let commit = commit.as_deref().map(Hash::from_hex).transpose()?;
            for entry in ls_tree(&repo, commit)? {
                println!("{}", entry);
            }
        }

        Commands::CatFile {
            object_type,
            object,
        } => {
            let repo = Repo::open(&cli.repo)?;
            let hash = Hash::from_hex(&object)?;

            match object_type.as_str() {
                "blob" => {
                    let data = read_blob(&repo, &hash)?;
                    io::stdout().write_all(&data).map_err(|e| mrvc::Error::Io {
                        path: "stdout".into(),
                        source: e,
                    })?;
                }
                "tree" => {
                    let tree = read_tree(&repo, &hash)?;
                    for entry in tree.entries() {
                        println!("{} {} {}", entry.kind.type_name(), entry.hash, entry.name);
                    }
                }
                "commit" => {
                    let commit = read_commit(&repo, &hash)?;
                    println!("tree {}", commit.tree);
                    if let Some(parent) = commit.parent {
                        println!("parent {}", parent);
                    }
                    println!("author {}", commit.author);
                    println!("timestamp {}", commit.timestamp);
                    println!();
                    println!("{}", commit.message);
                }
                _ => {
                    return Err(mrvc::Error::InvalidObjectType(object_type));
                }
            }
        }
    }

    Ok(())
}

/// map command line file arguments to a selection
///
/// relative paths are taken against the current directory, not the repository root.
fn file_selection(all: bool, files: Vec<PathBuf>) -> mrvc::Result<FileSelection> {
    if all || (files.len() == 1 && files[0].as_os_str() == "*") {
        return Ok(FileSelection::All);
    }

    let paths = files
        .iter()
        .map(|path| normalize(path))
        .collect::<mrvc::Result<Vec<_>>>()?;
    Ok(FileSelection::Paths(paths))
}
