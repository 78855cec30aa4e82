//! Line-oriented browsing session
//!
//! Reads filter commands one per line and prints which crates each command
//! hid or revealed.

use anyhow::{bail, Result};
use std::io::Write;
use std::str::FromStr;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use ecosystem_core::catalog::TagRegistry;
use ecosystem_core::filter::{CatalogView, FilterEvent, VisibilityDelta};

const HELP: &str = "\
Commands:
  toggle <tag>  flip a tag filter
  set <tag>     activate a tag filter
  clear         drop every filter
  list          show the visible crates
  tags          show the tag controls
  help          show this message
  quit          end the session";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    Filter(FilterEvent),
    List,
    Tags,
    Help,
    Quit,
}

impl FromStr for BrowseCommand {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let command = words.next().unwrap_or_default();
        let argument = words.next();

        if words.next().is_some() {
            bail!("Too many arguments: '{}'", line.trim());
        }

        let parsed = match (command, argument) {
            ("toggle", Some(tag)) => Self::Filter(FilterEvent::Toggle(tag.to_string())),
            ("set", Some(tag)) => Self::Filter(FilterEvent::Set(tag.to_string())),
            ("toggle" | "set", None) => bail!("'{}' needs a tag", command),
            ("clear", None) => Self::Filter(FilterEvent::Clear),
            ("list", None) => Self::List,
            ("tags", None) => Self::Tags,
            ("help", None) => Self::Help,
            ("quit" | "exit", None) => Self::Quit,
            _ => bail!("Unknown command: '{}'", line.trim()),
        };

        Ok(parsed)
    }
}

/// Run a session until `quit` or end of input
pub async fn run_session<R, W>(
    view: &mut CatalogView<'_>,
    registry: &TagRegistry,
    input: R,
    out: &mut W,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    write_status(view, out)?;

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<BrowseCommand>() {
            Ok(command) => command,
            Err(e) => {
                writeln!(out, "{e} (type 'help' for commands)")?;
                continue;
            }
        };

        match command {
            BrowseCommand::Filter(event) => {
                let delta = view.apply(event);
                write_delta(&delta, out)?;
                write_status(view, out)?;
            }
            BrowseCommand::List => {
                for entry in view.visible() {
                    writeln!(out, "  {}", entry.name)?;
                }
                write_status(view, out)?;
            }
            BrowseCommand::Tags => {
                for control in view.tag_controls(registry) {
                    let marker = if control.active { "x" } else { " " };
                    writeln!(out, "  [{}] {} ({})", marker, control.tag, control.count)?;
                }
            }
            BrowseCommand::Help => writeln!(out, "{HELP}")?,
            BrowseCommand::Quit => break,
        }
        out.flush()?;
    }

    tracing::debug!("Browse session ended with {} filter(s)", view.filters().len());
    Ok(())
}

fn write_delta<W: Write>(delta: &VisibilityDelta, out: &mut W) -> Result<()> {
    for name in &delta.hidden {
        writeln!(out, "- {name}")?;
    }
    for name in &delta.shown {
        writeln!(out, "+ {name}")?;
    }
    Ok(())
}

fn write_status<W: Write>(view: &CatalogView<'_>, out: &mut W) -> Result<()> {
    let filters = view.filters();
    if filters.is_empty() {
        writeln!(
            out,
            "{} of {} crates visible (no filters)",
            view.visible_count(),
            view.catalog().len()
        )?;
    } else {
        writeln!(
            out,
            "{} of {} crates visible (filters: {})",
            view.visible_count(),
            view.catalog().len(),
            filters.iter().collect::<Vec<_>>().join(", ")
        )?;
    }
    Ok(())
}
