// SPDX-FileCopyrightText: 2026 Kei Watanabe <kei.wtnb.dev@gmail.com>
// SPDX-License-Identifier: MIT

//! The action catalogue.
//!
//! One module per category. Each module owns the clap subcommand enum for
//! its actions together with the handlers that format and run the git
//! command lines. The [`Action`] enum at the top ties the categories into
//! one command tree; raw action names like `branch:join` are rewritten into
//! this tree by [`crate::router`] before clap parses anything.

pub mod branch;
pub mod commit;
pub mod config;
pub mod file;
pub mod history;
pub mod misc;
pub mod repo;
pub mod staging;
pub mod stash;
pub mod status;
pub mod sync;
pub mod tag;

use crate::{config::Settings, runner::Git};

use anyhow::Result;
use clap::Subcommand;

/// Top-level action categories.
#[derive(Debug, Clone, Subcommand)]
pub enum Action {
    /// Working tree status.
    #[command(subcommand)]
    Status(status::StatusAction),

    /// Branch handling.
    #[command(subcommand)]
    Branch(branch::BranchAction),

    /// Tracked file handling.
    #[command(subcommand)]
    File(file::FileAction),

    /// Staging area handling.
    #[command(subcommand)]
    Staging(staging::StagingAction),

    /// Commit handling.
    #[command(subcommand)]
    Commit(commit::CommitAction),

    /// Commit history display and editing.
    #[command(subcommand)]
    History(history::HistoryAction),

    /// Repository setup and remotes.
    #[command(subcommand)]
    Repo(repo::RepoAction),

    /// Tag handling.
    #[command(subcommand)]
    Tag(tag::TagAction),

    /// Upload and download commits.
    #[command(subcommand)]
    Sync(sync::SyncAction),

    /// Stash handling.
    #[command(subcommand)]
    Stash(stash::StashAction),

    /// Git configuration handling.
    #[command(subcommand)]
    Config(config::ConfigAction),

    /// Everything else.
    #[command(subcommand)]
    Misc(misc::MiscAction),
}

impl Action {
    /// Run the resolved action.
    pub fn run(self, git: &Git, settings: &Settings) -> Result<()> {
        match self {
            Self::Status(action) => action.run(git),
            Self::Branch(action) => action.run(git, settings),
            Self::File(action) => action.run(git),
            Self::Staging(action) => action.run(git),
            Self::Commit(action) => action.run(git),
            Self::History(action) => action.run(git, settings),
            Self::Repo(action) => action.run(git, settings),
            Self::Tag(action) => action.run(git),
            Self::Sync(action) => action.run(git),
            Self::Stash(action) => action.run(git),
            Self::Config(action) => action.run(git),
            Self::Misc(action) => action.run(git),
        }
    }
}
