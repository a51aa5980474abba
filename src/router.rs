// SPDX-FileCopyrightText: 2026 Kei Watanabe <kei.wtnb.dev@gmail.com>
// SPDX-License-Identifier: MIT

//! Action routing and name resolution.
//!
//! Actions are addressed as `category:action` (`branch:join`), with nested
//! categories (`history:edit:start`). On top of the canonical names sit two
//! shorthand layers:
//!
//! - **Aliases** map a bare name to a full action name plus optional fixed
//!   arguments, e.g. `sw` -> `branch:switch`, `pick` -> `staging:add -p`.
//!   User-defined aliases from the startup file are consulted before the
//!   built-in table and may point at built-in aliases.
//! - **Abbreviations** expand category prefixes, e.g. `b:j` fails as a
//!   literal name but `b:` expands to `branch:` first, so `b:join` works.
//!
//! The router rewrites raw argv before clap ever sees it: the first
//! non-flag token is resolved to a canonical action and replaced by the
//! matching subcommand path segments (plus any fixed alias arguments).
//! Everything after the action token is left untouched for clap to parse.
//! When no action token is present, the configured default action is
//! spliced in.

use phf::phf_map;
use std::collections::BTreeMap;

/// Category prefix abbreviations, expanded longest-prefix-first.
static ABBREVS: phf::Map<&'static str, &'static str> = phf_map! {
    "b:" => "branch:",
    "c:" => "commit:",
    "C:" => "config:",
    "g:" => "staging:",
    "f:" => "file:",
    "r:" => "repo:",
    "r:r:" => "repo:remote:",
    "h:" => "history:",
    "h:e:" => "history:edit:",
    "histedit:" => "history:edit:",
};

/// Built-in aliases: shorthand name to action name plus fixed arguments.
static ALIASES: phf::Map<&'static str, &'static [&'static str]> = phf_map! {
    "status" => &["status:compact"],
    "branches" => &["branch:list"],
    "branch" => &["branch:create"],
    "switch" => &["branch:switch"],
    "sw" => &["branch:switch"],
    "fork" => &["branch:fork"],
    "join" => &["branch:join"],
    "merge" => &["branch:merge"],
    "update" => &["branch:update"],
    "files" => &["file:list"],
    "track" => &["file:track"],
    "register" => &["file:track"],
    "changes" => &["file:changes"],
    "stage" => &["staging:add"],
    "staged" => &["staging:show"],
    "unstage" => &["staging:clear"],
    "pick" => &["staging:add", "-p"],
    "commit" => &["commit:create"],
    "cc" => &["commit:create"],
    "correct" => &["commit:correct"],
    "fixup" => &["commit:fixup"],
    "commits" => &["commit:show"],
    "hist" => &["history:show", "-F", "graph"],
    "histedit" => &["history:edit:start"],
    "tags" => &["tag:list"],
    "sync" => &["sync:both"],
    "push" => &["sync:push"],
    "upload" => &["sync:push"],
    "up" => &["sync:push"],
    "pull" => &["sync:pull"],
    "download" => &["sync:pull"],
    "dl" => &["sync:pull"],
};

/// Canonical action names mapped to clap subcommand path segments.
///
/// Bare category names with a default action (`tag`, `config`, `history`,
/// `repo:remote`) resolve to their default leaf.
static ACTIONS: phf::Map<&'static str, &'static [&'static str]> = phf_map! {
    "status:here" => &["status", "here"],
    "status:info" => &["status", "info"],
    "status:compact" => &["status", "compact"],
    "status:default" => &["status", "default"],

    "branch:list" => &["branch", "list"],
    "branch:switch" => &["branch", "switch"],
    "branch:create" => &["branch", "create"],
    "branch:fork" => &["branch", "fork"],
    "branch:join" => &["branch", "join"],
    "branch:merge" => &["branch", "merge"],
    "branch:checkout" => &["branch", "checkout"],
    "branch:rename" => &["branch", "rename"],
    "branch:delete" => &["branch", "delete"],
    "branch:reset" => &["branch", "reset"],
    "branch:rebase" => &["branch", "rebase"],
    "branch:update" => &["branch", "update"],
    "branch:upstream" => &["branch", "upstream"],
    "branch:current" => &["branch", "current"],
    "branch:previous" => &["branch", "previous"],
    "branch:parent" => &["branch", "parent"],
    "branch:echo" => &["branch", "echo"],

    "file:list" => &["file", "list"],
    "file:track" => &["file", "track"],
    "file:changes" => &["file", "changes"],
    "file:move" => &["file", "move"],
    "file:rename" => &["file", "rename"],
    "file:delete" => &["file", "delete"],
    "file:restore" => &["file", "restore"],
    "file:blame" => &["file", "blame"],
    "file:egrep" => &["file", "egrep"],

    "staging:add" => &["staging", "add"],
    "staging:show" => &["staging", "show"],
    "staging:edit" => &["staging", "edit"],
    "staging:clear" => &["staging", "clear"],

    "commit:create" => &["commit", "create"],
    "commit:correct" => &["commit", "correct"],
    "commit:fixup" => &["commit", "fixup"],
    "commit:apply" => &["commit", "apply"],
    "commit:show" => &["commit", "show"],
    "commit:revert" => &["commit", "revert"],
    "commit:rollback" => &["commit", "rollback"],

    "history" => &["history", "show"],
    "history:show" => &["history", "show"],
    "history:notuploaded" => &["history", "notuploaded"],
    "history:edit:start" => &["history", "edit", "start"],
    "history:edit:resume" => &["history", "edit", "resume"],
    "history:edit:skip" => &["history", "edit", "skip"],
    "history:edit:cancel" => &["history", "edit", "cancel"],

    "repo:init" => &["repo", "init"],
    "repo:create" => &["repo", "create"],
    "repo:clone" => &["repo", "clone"],
    "repo:remote" => &["repo", "remote", "handle"],
    "repo:remote:handle" => &["repo", "remote", "handle"],
    "repo:remote:origin" => &["repo", "remote", "origin"],

    "tag" => &["tag", "handle"],
    "tag:handle" => &["tag", "handle"],
    "tag:list" => &["tag", "list"],
    "tag:upload" => &["tag", "upload"],
    "tag:download" => &["tag", "download"],

    "sync:both" => &["sync", "both"],
    "sync:push" => &["sync", "push"],
    "sync:pull" => &["sync", "pull"],

    "stash:list" => &["stash", "list"],
    "stash:show" => &["stash", "show"],
    "stash:put" => &["stash", "put"],
    "stash:pop" => &["stash", "pop"],
    "stash:drop" => &["stash", "drop"],

    "config" => &["config", "handle"],
    "config:handle" => &["config", "handle"],
    "config:setuser" => &["config", "setuser"],
    "config:alias" => &["config", "alias"],

    "misc:startupfile" => &["misc", "startupfile"],
};

/// The action name an argv token resolved to, plus its clap path and any
/// fixed arguments contributed by alias expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub name: String,
    pub segments: Vec<String>,
    pub fixed_args: Vec<String>,
}

/// Resolve one action token through aliases, abbreviations, and the
/// canonical action table.
///
/// # Errors
///
/// - Return [`RouterError::ActionNotFound`] for names no layer recognizes.
/// - Return [`RouterError::AliasLoop`] when alias expansion cycles.
pub fn resolve_action(
    token: &str,
    user_aliases: &BTreeMap<String, Vec<String>>,
) -> Result<Resolution> {
    let mut name = token.to_owned();
    let mut fixed_args: Vec<String> = Vec::new();

    // Alias expansion first; user aliases shadow built-ins and may chain
    // into them, so loop with a hop limit.
    let mut hops = 0;
    loop {
        let expansion: Option<Vec<String>> = if let Some(args) = user_aliases.get(&name) {
            Some(args.clone())
        } else {
            ALIASES
                .get(name.as_str())
                .map(|args| args.iter().map(|s| (*s).to_owned()).collect())
        };

        let Some(expansion) = expansion else { break };
        let Some((target, rest)) = expansion.split_first() else {
            return Err(RouterError::ActionNotFound(token.to_owned()));
        };

        // Fixed arguments of outer aliases precede those of inner ones.
        fixed_args.extend(rest.iter().cloned());
        if *target == name {
            return Err(RouterError::AliasLoop(token.to_owned()));
        }
        name = target.clone();

        hops += 1;
        if hops > 8 {
            return Err(RouterError::AliasLoop(token.to_owned()));
        }
    }

    // Abbreviation expansion, longest prefix first.
    if !ACTIONS.contains_key(name.as_str()) {
        let mut abbrevs: Vec<(&str, &str)> =
            ABBREVS.entries().map(|(k, v)| (*k, *v)).collect();
        abbrevs.sort_by_key(|(k, _)| std::cmp::Reverse(k.len()));
        for (prefix, category) in abbrevs {
            if let Some(rest) = name.strip_prefix(prefix) {
                name = format!("{category}{rest}");
                break;
            }
        }
    }

    let segments = ACTIONS
        .get(name.as_str())
        .ok_or_else(|| RouterError::ActionNotFound(token.to_owned()))?;

    Ok(Resolution {
        name,
        segments: segments.iter().map(|s| (*s).to_owned()).collect(),
        fixed_args,
    })
}

/// Rewrite raw argv into the form the clap command tree expects.
///
/// The first token that does not look like a global flag is resolved via
/// [`resolve_action`] and replaced by its subcommand path segments plus any
/// fixed alias arguments. Remaining argv is passed through untouched. When
/// no action token exists, `default_action` is resolved and appended.
///
/// Global flags that take a value must use `=` form (`--color=never`), so a
/// leading-dash token can always be skipped whole.
pub fn expand_argv(
    argv: Vec<String>,
    user_aliases: &BTreeMap<String, Vec<String>>,
    default_action: &str,
) -> Result<Vec<String>> {
    let action_index = argv
        .iter()
        .enumerate()
        .skip(1)
        .find(|(_, token)| !token.starts_with('-'))
        .map(|(index, _)| index);

    let mut expanded = Vec::with_capacity(argv.len() + 2);
    match action_index {
        Some(index) => {
            let resolution = resolve_action(&argv[index], user_aliases)?;
            expanded.extend(argv[..index].iter().cloned());
            expanded.extend(resolution.segments);
            expanded.extend(resolution.fixed_args);
            expanded.extend(argv[index + 1..].iter().cloned());
        }
        None => {
            let resolution = resolve_action(default_action, user_aliases)?;
            expanded.extend(argv);
            expanded.extend(resolution.segments);
            expanded.extend(resolution.fixed_args);
        }
    }

    Ok(expanded)
}

/// All canonical action names, sorted, for the action listing.
pub fn action_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = ACTIONS
        .keys()
        .copied()
        .filter(|name| name.contains(':'))
        .collect();
    names.sort_unstable();
    names
}

/// Action routing error types.
#[derive(Debug, thiserror::Error)]
pub enum RouterError {
    /// No alias, abbreviation, or canonical action matches the name.
    #[error("{0}: Action not found.")]
    ActionNotFound(String),

    /// Alias expansion never reaches a canonical action.
    #[error("{0}: Alias expansion loops.")]
    AliasLoop(String),
}

/// Friendly result alias :3
pub type Result<T, E = RouterError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn no_user_aliases() -> BTreeMap<String, Vec<String>> {
        BTreeMap::new()
    }

    fn argv(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn canonical_names_resolve_to_path_segments() {
        let resolution = resolve_action("branch:switch", &no_user_aliases()).unwrap();
        assert_eq!(resolution.segments, argv(&["branch", "switch"]));
        assert!(resolution.fixed_args.is_empty());

        let resolution = resolve_action("history:edit:start", &no_user_aliases()).unwrap();
        assert_eq!(resolution.segments, argv(&["history", "edit", "start"]));
    }

    #[test]
    fn category_default_actions_resolve() {
        let resolution = resolve_action("tag", &no_user_aliases()).unwrap();
        assert_eq!(resolution.segments, argv(&["tag", "handle"]));

        let resolution = resolve_action("repo:remote", &no_user_aliases()).unwrap();
        assert_eq!(resolution.segments, argv(&["repo", "remote", "handle"]));

        let resolution = resolve_action("history", &no_user_aliases()).unwrap();
        assert_eq!(resolution.segments, argv(&["history", "show"]));
    }

    #[test]
    fn aliases_expand_with_fixed_arguments() {
        let resolution = resolve_action("sw", &no_user_aliases()).unwrap();
        assert_eq!(resolution.name, "branch:switch");

        let resolution = resolve_action("pick", &no_user_aliases()).unwrap();
        assert_eq!(resolution.name, "staging:add");
        assert_eq!(resolution.fixed_args, argv(&["-p"]));

        let resolution = resolve_action("hist", &no_user_aliases()).unwrap();
        assert_eq!(resolution.name, "history:show");
        assert_eq!(resolution.fixed_args, argv(&["-F", "graph"]));
    }

    #[test]
    fn abbreviations_expand_longest_prefix_first() {
        let resolution = resolve_action("b:join", &no_user_aliases()).unwrap();
        assert_eq!(resolution.name, "branch:join");

        // "h:e:" must win over "h:".
        let resolution = resolve_action("h:e:start", &no_user_aliases()).unwrap();
        assert_eq!(resolution.name, "history:edit:start");

        let resolution = resolve_action("r:r:origin", &no_user_aliases()).unwrap();
        assert_eq!(resolution.name, "repo:remote:origin");

        let resolution = resolve_action("histedit:cancel", &no_user_aliases()).unwrap();
        assert_eq!(resolution.name, "history:edit:cancel");
    }

    #[test]
    fn user_aliases_shadow_and_chain_into_builtins() {
        let mut user = BTreeMap::new();
        user.insert("br".to_owned(), argv(&["branch:create", "-w"]));
        user.insert("s".to_owned(), argv(&["sw"]));

        let resolution = resolve_action("br", &user).unwrap();
        assert_eq!(resolution.name, "branch:create");
        assert_eq!(resolution.fixed_args, argv(&["-w"]));

        let resolution = resolve_action("s", &user).unwrap();
        assert_eq!(resolution.name, "branch:switch");
    }

    #[test]
    fn alias_cycles_are_reported() {
        let mut user = BTreeMap::new();
        user.insert("a".to_owned(), argv(&["b"]));
        user.insert("b".to_owned(), argv(&["a"]));

        let error = resolve_action("a", &user).unwrap_err();
        assert!(matches!(error, RouterError::AliasLoop(_)));
    }

    #[test]
    fn unknown_actions_are_reported() {
        let error = resolve_action("hello", &no_user_aliases()).unwrap_err();
        assert_eq!(error.to_string(), "hello: Action not found.");
    }

    #[test]
    fn argv_rewrite_preserves_flags_and_trailing_arguments() {
        let expanded = expand_argv(
            argv(&["gi", "-n", "sw", "topic"]),
            &no_user_aliases(),
            "status:here",
        )
        .unwrap();
        assert_eq!(expanded, argv(&["gi", "-n", "branch", "switch", "topic"]));
    }

    #[test]
    fn fixed_alias_arguments_precede_user_arguments() {
        let expanded = expand_argv(
            argv(&["gi", "pick", "src/main.rs"]),
            &no_user_aliases(),
            "status:here",
        )
        .unwrap();
        assert_eq!(
            expanded,
            argv(&["gi", "staging", "add", "-p", "src/main.rs"])
        );
    }

    #[test]
    fn missing_action_falls_back_to_the_default() {
        let expanded =
            expand_argv(argv(&["gi", "-q"]), &no_user_aliases(), "status:here").unwrap();
        assert_eq!(expanded, argv(&["gi", "-q", "status", "here"]));
    }
}
