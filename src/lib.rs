// SPDX-FileCopyrightText: 2026 Kei Watanabe <kei.wtnb.dev@gmail.com>
// SPDX-License-Identifier: MIT

//! Mnemonic command-line wrapper around the Git binary.
//!
//! `gi` maps short, memorable action names onto invocations of the external
//! `git` binary. Actions are namespaced by category (`branch:join`,
//! `staging:add`, ...), reachable through aliases (`sw` for `branch:switch`)
//! and category abbreviations (`b:` for `branch:`). Every action echoes the
//! git command lines it is about to run, prefixed by a prompt string, and
//! honors a global dry-run mode that prints without executing.
//!
//! The crate never talks to a repository directly. All version-control
//! semantics belong to the `git` binary; this crate only resolves names,
//! formats command lines, and shells out.

pub mod actions;
pub mod config;
pub mod resolve;
pub mod router;
pub mod runner;
