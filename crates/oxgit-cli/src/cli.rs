use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "oxgit", about = "Content-addressed object store", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Repository directory
    #[arg(long, global = true, default_value = ".git")]
    pub git_dir: PathBuf,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create an empty repository
    Init,
    /// Compute an object id for a file, optionally storing it
    HashObject(HashObjectArgs),
    /// Show the content, type or size of a stored object
    CatFile(CatFileArgs),
}

#[derive(Args)]
pub struct HashObjectArgs {
    /// Write the object into the object database
    #[arg(short)]
    pub write: bool,

    /// Object type
    #[arg(short = 't', default_value = "blob")]
    pub object_type: String,

    /// File to hash
    pub file: PathBuf,
}

#[derive(Args)]
#[group(required = true, multiple = false)]
pub struct CatFileMode {
    /// Pretty-print the object's content
    #[arg(short = 'p')]
    pub pretty: bool,

    /// Show the object's type
    #[arg(short = 't')]
    pub show_type: bool,

    /// Show the object's size
    #[arg(short = 's')]
    pub show_size: bool,

    /// Exit with zero status if the object exists
    #[arg(short = 'e')]
    pub exists: bool,
}

#[derive(Args)]
pub struct CatFileArgs {
    #[command(flatten)]
    pub mode: CatFileMode,

    /// Object id (40 hex characters)
    pub object: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_hash_object() {
        let cli = Cli::try_parse_from(["oxgit", "hash-object", "-w", "notes.txt"]).unwrap();
        assert_eq!(cli.git_dir, PathBuf::from(".git"));
        match cli.command {
            Command::HashObject(args) => {
                assert!(args.write);
                assert_eq!(args.object_type, "blob");
                assert_eq!(args.file, PathBuf::from("notes.txt"));
            }
            _ => panic!("expected hash-object"),
        }
    }

    #[test]
    fn test_cat_file_requires_one_mode() {
        let id = "bd9dbf5aae1a3862dd1526723246b20206e5fc37";
        assert!(Cli::try_parse_from(["oxgit", "cat-file", id]).is_err());
        assert!(Cli::try_parse_from(["oxgit", "cat-file", "-p", "-t", id]).is_err());
        assert!(Cli::try_parse_from(["oxgit", "cat-file", "-p", id]).is_ok());
    }

    #[test]
    fn test_global_git_dir() {
        let cli = Cli::try_parse_from(["oxgit", "init", "--git-dir", "/tmp/repo"]).unwrap();
        assert_eq!(cli.git_dir, PathBuf::from("/tmp/repo"));
        assert!(matches!(cli.command, Command::Init));
    }
}
