//! Interactive command loop over the person registry.
//!
//! Commands are read line by line from any `BufRead`, so the same loop
//! drives an interactive session, a script file and the tests.

use std::io::BufRead;

use itertools::Itertools;
use tracing::{debug, instrument};

use crate::arena::FamilyTree;
use crate::cli::error::CliResult;
use crate::cli::output;
use crate::date::DateValidator;
use crate::report;
use crate::traverse::TraversalOrder;

const HELP: &str = "\
Commands:
  add [id]            add a person (prompts for name, birth date, parents)
  remove <id>         remove a person
  find <id>           look up a person
  list                show the roster table (in-order)
  ancestors <id>      show the ancestor tree
  descendants <id>    show the structural descendant tree
  traverse [order]    walk the tree (pre|in|post|level)
  rebalance           rebuild the tree to minimal height
  help                show this help
  quit                exit";

/// Runs the command loop until `quit` or end of input.
pub fn run_session<R: BufRead>(tree: &mut FamilyTree, input: &mut R) -> CliResult<()> {
    let validator = DateValidator::new();

    loop {
        output::prompt("famtree>");
        let Some(line) = read_line(input)? else {
            break;
        };
        let mut tokens = line.split_whitespace();
        let Some(command) = tokens.next() else {
            continue;
        };
        let arg = tokens.next();

        match command {
            "add" => _add(tree, input, &validator, arg)?,
            "remove" => _remove(tree, arg),
            "find" => _find(tree, arg),
            "list" => _list(tree),
            "ancestors" => _ancestors(tree, arg),
            "descendants" => _descendants(tree, arg),
            "traverse" => _traverse(tree, input, arg)?,
            "rebalance" => _rebalance(tree),
            "help" => output::info(HELP),
            "quit" | "exit" => break,
            other => {
                output::warning(&format!("Unknown command: {other} (try 'help')"));
            }
        }
    }
    Ok(())
}

fn read_line<R: BufRead>(input: &mut R) -> CliResult<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end().to_string()))
}

fn parse_id(arg: Option<&str>, usage: &str) -> Option<u32> {
    match arg {
        None => {
            output::warning(&format!("Usage: {usage}"));
            None
        }
        Some(s) => match s.parse() {
            Ok(id) => Some(id),
            Err(_) => {
                output::warning(&format!("Not a valid id: {s}"));
                None
            }
        },
    }
}

#[instrument(skip(tree, input, validator))]
fn _add<R: BufRead>(
    tree: &mut FamilyTree,
    input: &mut R,
    validator: &DateValidator,
    arg: Option<&str>,
) -> CliResult<()> {
    let id = match arg {
        Some(s) => match s.parse() {
            Ok(id) => id,
            Err(_) => {
                output::warning(&format!("Not a valid id: {s}"));
                return Ok(());
            }
        },
        None => {
            let id = tree.next_id();
            output::detail(&format!("Assigned id: {id}"));
            id
        }
    };

    output::prompt("Name:");
    let Some(name) = read_line(input)? else {
        return Ok(());
    };

    let birth_date = loop {
        output::prompt("Birth date (dd/mm/yyyy):");
        let Some(candidate) = read_line(input)? else {
            return Ok(());
        };
        match validator.validate(&candidate) {
            Ok(()) => break candidate,
            Err(e) => output::warning(&e),
        }
    };

    output::prompt("Father id (empty for none):");
    let father = read_parent(tree, read_line(input)?);
    output::prompt("Mother id (empty for none):");
    let mother = read_parent(tree, read_line(input)?);

    match tree.insert(id, name.trim(), &birth_date, father, mother) {
        Some(_) => output::success(&format!("Added person {id}")),
        None => output::warning(&format!("Id {id} already exists, not added")),
    }
    Ok(())
}

fn read_parent(tree: &FamilyTree, line: Option<String>) -> Option<generational_arena::Index> {
    let text = line?;
    let text = text.trim();
    if text.is_empty() || text == "0" {
        return None;
    }
    let id: u32 = match text.parse() {
        Ok(id) => id,
        Err(_) => {
            output::warning(&format!("Not a valid id: {text}, parent left unset"));
            return None;
        }
    };
    let resolved = tree.lookup(id);
    if resolved.is_none() {
        output::warning(&format!("No person with id {id}, parent left unset"));
    }
    resolved
}

#[instrument(skip(tree))]
fn _remove(tree: &mut FamilyTree, arg: Option<&str>) {
    let Some(id) = parse_id(arg, "remove <id>") else {
        return;
    };
    if tree.remove(id) {
        output::success(&format!("Removed person {id}"));
    } else {
        output::info("Not found");
    }
}

#[instrument(skip(tree))]
fn _find(tree: &FamilyTree, arg: Option<&str>) {
    let Some(id) = parse_id(arg, "find <id>") else {
        return;
    };
    match tree.lookup(id).and_then(|idx| tree.person(idx)) {
        Some(person) => output::info(person),
        None => output::info("Not found"),
    }
}

#[instrument(skip(tree))]
fn _list(tree: &FamilyTree) {
    output::header("Persons (in-order)");
    output::info(&report::roster_table(tree));
}

#[instrument(skip(tree))]
fn _ancestors(tree: &FamilyTree, arg: Option<&str>) {
    let Some(id) = parse_id(arg, "ancestors <id>") else {
        return;
    };
    match tree.lookup(id) {
        Some(idx) => output::info(&report::ancestor_tree(tree, idx)),
        None => output::info("Not found"),
    }
}

#[instrument(skip(tree))]
fn _descendants(tree: &FamilyTree, arg: Option<&str>) {
    let Some(id) = parse_id(arg, "descendants <id>") else {
        return;
    };
    match tree.lookup(id) {
        Some(idx) => output::info(&report::descendant_tree(tree, idx)),
        None => output::info("Not found"),
    }
}

#[instrument(skip(tree, input))]
fn _traverse<R: BufRead>(
    tree: &FamilyTree,
    input: &mut R,
    arg: Option<&str>,
) -> CliResult<()> {
    let order: TraversalOrder = match arg {
        Some(s) => match s.parse() {
            Ok(order) => order,
            Err(e) => {
                output::warning(&e);
                return Ok(());
            }
        },
        None => {
            output::prompt("Order (pre|in|post|level):");
            let Some(choice) = read_line(input)? else {
                return Ok(());
            };
            match choice.parse() {
                Ok(order) => order,
                Err(e) => {
                    output::warning(&e);
                    return Ok(());
                }
            }
        }
    };

    if tree.is_empty() {
        output::info("(empty tree)");
        return Ok(());
    }

    output::header(&format!("Traversal: {order}"));
    debug!(%order, nodes = tree.len(), "traversing");
    if order == TraversalOrder::Level {
        // one line per depth level
        let by_level = tree
            .iter_levelorder()
            .chunk_by(|(_, _, depth)| *depth);
        for (depth, nodes) in &by_level {
            let row = nodes.map(|(_, node, _)| node.person.to_string()).join("  ");
            output::detail(&format!("level {depth}: {row}"));
        }
    } else {
        for (_, node) in tree.traverse(order) {
            output::detail(&node.person);
        }
    }
    Ok(())
}

#[instrument(skip(tree))]
fn _rebalance(tree: &mut FamilyTree) {
    tree.rebalance();
    output::success(&format!(
        "Rebalanced: {} persons, height {}",
        tree.len(),
        tree.height()
    ));
}
