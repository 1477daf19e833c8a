//! Line-driven browsing session.
//!
//! Each input line is one action. Query lines (`/text`) are debounced: a
//! burst of query lines arriving within the quiet period only applies the
//! last one. An empty line or any other action applies a pending query
//! immediately.

use std::io::{self, BufRead, Write};
use std::num::NonZeroUsize;
use std::time::Instant;

use seedscope_core::{Criteria, Debouncer, DetailView, Explorer, SortKey};

use crate::render::Renderer;

pub const HELP: &str = "\
/TEXT        search variety, crop, institution, attributes and notes
n, next      next page
p, prev      previous page
page N       go to page N
size N       rows per page
sort KEY     sort by KEY (repeat to reverse)
crop NAME    add a crop filter
state NAME   add a state filter (name or two-letter code)
clear        remove all filters
show ID      detail view of one variety
help         this text
q, quit      leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Query(String),
    Apply,
    Next,
    Previous,
    Page(usize),
    Size(NonZeroUsize),
    Sort(SortKey),
    Crop(String),
    State(String),
    Clear,
    Show(String),
    Help,
    Quit,
}

/// Parse one input line.
pub fn parse_action(line: &str) -> Result<Action, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Action::Apply);
    }
    if let Some(query) = line.strip_prefix('/') {
        return Ok(Action::Query(query.trim().to_string()));
    }
    let (command, argument) = match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };
    let required = |what: &str| {
        if argument.is_empty() {
            Err(format!("'{command}' needs {what}"))
        } else {
            Ok(argument.to_string())
        }
    };
    match command.to_lowercase().as_str() {
        "n" | "next" => Ok(Action::Next),
        "p" | "prev" | "previous" => Ok(Action::Previous),
        "page" => argument
            .parse()
            .map(Action::Page)
            .map_err(|_| format!("invalid page number '{argument}'")),
        "size" => argument
            .parse()
            .map(Action::Size)
            .map_err(|_| format!("page size must be a positive number, got '{argument}'")),
        "sort" => argument.parse().map(Action::Sort),
        "crop" => required("a crop name").map(Action::Crop),
        "state" => required("a state").map(Action::State),
        "clear" => Ok(Action::Clear),
        "show" => required("a variety id").map(Action::Show),
        "help" | "?" => Ok(Action::Help),
        "q" | "quit" | "exit" => Ok(Action::Quit),
        other => Err(format!("unknown command '{other}', type 'help'")),
    }
}

/// Drive `explorer` from `input` until EOF or `quit`.
///
/// `clock` stamps each line for the debouncer.
pub fn run<R, W>(
    explorer: &mut Explorer,
    renderer: Renderer,
    debouncer: &mut Debouncer<String>,
    input: R,
    out: &mut W,
    clock: impl Fn() -> Instant,
) -> io::Result<()>
where
    R: BufRead,
    W: Write,
{
    writeln!(out, "{}", renderer.page(&explorer.snapshot()))?;

    for line in input.lines() {
        let line = line?;
        let now = clock();
        if let Some(query) = debouncer.poll(now) {
            apply_query(explorer, query);
            writeln!(out, "{}", renderer.page(&explorer.snapshot()))?;
        }

        let action = match parse_action(&line) {
            Ok(action) => action,
            Err(message) => {
                writeln!(out, "{message}")?;
                continue;
            }
        };
        if let Action::Query(query) = action {
            debouncer.push(query, now);
            continue;
        }

        let flushed = match debouncer.flush() {
            Some(query) => {
                apply_query(explorer, query);
                true
            }
            None => false,
        };
        match action {
            Action::Quit => break,
            Action::Help => {
                writeln!(out, "{HELP}")?;
                continue;
            }
            Action::Show(id) => {
                match DetailView::find(explorer.dataset(), &id) {
                    Ok(view) => writeln!(out, "{}", renderer.detail(&view))?,
                    Err(error) => writeln!(out, "{error}")?,
                }
                continue;
            }
            Action::Apply if !flushed => continue,
            Action::Apply | Action::Query(_) => {}
            Action::Next => explorer.next_page(),
            Action::Previous => explorer.previous_page(),
            Action::Page(index) => explorer.go_to_page(index),
            Action::Size(size) => explorer.set_page_size(size),
            Action::Sort(key) => explorer.toggle_sort(key),
            Action::Crop(crop) => {
                explorer.update_criteria(|c| *c = std::mem::take(c).with_crop(crop));
            }
            Action::State(state) => {
                explorer.update_criteria(|c| *c = std::mem::take(c).with_state(&state));
            }
            Action::Clear => explorer.set_criteria(Criteria::new()),
        }
        writeln!(out, "{}", renderer.page(&explorer.snapshot()))?;
    }

    if let Some(query) = debouncer.flush() {
        apply_query(explorer, query);
        writeln!(out, "{}", renderer.page(&explorer.snapshot()))?;
    }
    Ok(())
}

fn apply_query(explorer: &mut Explorer, query: String) {
    tracing::debug!(%query, "applying query");
    explorer.update_criteria(|criteria| criteria.set_query(query));
}
