//! Command handlers for the oxgit CLI.

use std::io::Write;
use std::process::ExitCode;

use anyhow::{Context, Result};
use oxgit_storage::{ObjectId, ObjectKind, Repository, StorageConfig};

use crate::cli::{CatFileArgs, Cli, Command, HashObjectArgs};

pub fn run_command(cli: Cli) -> Result<ExitCode> {
    let config = StorageConfig::with_git_dir(cli.git_dir);
    match cli.command {
        Command::Init => cmd_init(config),
        Command::HashObject(args) => cmd_hash_object(config, args),
        Command::CatFile(args) => cmd_cat_file(config, args),
    }
}

fn cmd_init(config: StorageConfig) -> Result<ExitCode> {
    let repo = Repository::init(config).context("failed to initialize repository")?;
    println!("Initialized empty repository in {}", repo.git_dir().display());
    Ok(ExitCode::SUCCESS)
}

fn cmd_hash_object(config: StorageConfig, args: HashObjectArgs) -> Result<ExitCode> {
    let kind: ObjectKind = args.object_type.parse()?;
    let content = std::fs::read(&args.file)
        .with_context(|| format!("failed to read file '{}'", args.file.display()))?;

    let id = if args.write {
        let repo = Repository::open(config)?;
        repo.object_store()
            .put(kind, &content)
            .with_context(|| format!("failed to write object for '{}'", args.file.display()))?
    } else {
        // Hashing alone needs no repository.
        oxgit_storage::object::hash(kind, &content)
    };

    println!("{id}");
    Ok(ExitCode::SUCCESS)
}

fn cmd_cat_file(config: StorageConfig, args: CatFileArgs) -> Result<ExitCode> {
    let id = ObjectId::from_hex(&args.object)
        .with_context(|| format!("not a valid object name '{}'", args.object))?;
    let store = Repository::open(config)?.object_store();

    if args.mode.exists {
        let found = store.contains(&id)?;
        return Ok(if found { ExitCode::SUCCESS } else { ExitCode::FAILURE });
    }

    let object = store
        .get(&id)
        .with_context(|| format!("failed to read object {id}"))?;

    if args.mode.show_type {
        println!("{}", object.kind);
    } else if args.mode.show_size {
        println!("{}", object.content.len());
    } else {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(&object.content)?;
        stdout.flush()?;
    }

    Ok(ExitCode::SUCCESS)
}
