mod load;
pub use load::{Inputs, LoadError, load_inputs, resolve_columns};

use std::io::Write;

use crate::cli::commands::{Cli, Commands, PrintArgs};
use crate::cli::output::table_to_json;
use crate::io::config_io::{self, LoadedConfig};
use crate::model::{ExpansionSet, TaskTable};
use crate::ops::task_ops;
use crate::tui::app::App;
use crate::tui::render::render_plain;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let cwd = std::env::current_dir()?;
    let inputs = load_inputs(cli.tasks.as_deref(), cli.config.as_deref(), &cwd)?;

    match cli.command {
        None => cmd_tui(inputs, cli.persist_columns),
        Some(Commands::Print(args)) => cmd_print(&inputs.table, &args),
    }
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn cmd_tui(inputs: Inputs, persist_columns: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::new(inputs.table, &inputs.config.config.ui);

    if persist_columns {
        let LoadedConfig { path, mut doc, .. } = inputs.config;
        app.on_columns_changed(move |columns| {
            if let Err(e) = config_io::persist_columns(&path, &mut doc, columns) {
                tracing::error!(error = %e, "could not persist columns");
            }
        });
    } else {
        app.on_columns_changed(|columns| {
            tracing::info!(columns = columns.len(), "columns changed");
        });
    }

    crate::tui::run(app)
}

fn cmd_print(table: &TaskTable, args: &PrintArgs) -> Result<(), Box<dyn std::error::Error>> {
    let stdout = std::io::stdout();
    write_table(&mut stdout.lock(), table, args)
}

/// Write the table as `print` shows it
pub fn write_table(
    out: &mut dyn Write,
    table: &TaskTable,
    args: &PrintArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let expanded = if args.expand_all {
        expand_all(table)
    } else {
        ExpansionSet::new()
    };

    if args.json {
        let json = table_to_json(table, &expanded);
        writeln!(out, "{}", serde_json::to_string_pretty(&json)?)?;
    } else {
        writeln!(out, "{}", render_plain(table, &expanded, args.width))?;
    }
    Ok(())
}

/// Expansion set holding every task that has sub-tasks
pub fn expand_all(table: &TaskTable) -> ExpansionSet {
    let mut expanded = ExpansionSet::new();
    task_ops::for_each_task(&table.tasks, &mut |task| {
        if task.has_children() {
            expanded.expand(&task.id);
        }
    });
    expanded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixture::demo_tasks;

    fn print_args(expand_all: bool, json: bool) -> PrintArgs {
        PrintArgs {
            expand_all,
            json,
            width: 120,
        }
    }

    fn printed(args: &PrintArgs) -> String {
        let table = TaskTable::with_default_columns(demo_tasks());
        let mut buf = Vec::new();
        write_table(&mut buf, &table, args).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn expand_all_covers_every_parent() {
        let table = TaskTable::with_default_columns(demo_tasks());
        let expanded = expand_all(&table);
        assert_eq!(expanded.len(), 3);
        for id in ["1", "1-1", "1-3"] {
            assert!(expanded.is_expanded(id));
        }
    }

    #[test]
    fn print_text_collapsed_and_expanded() {
        let collapsed = printed(&print_args(false, false));
        assert_eq!(collapsed.lines().count(), 2);
        let expanded = printed(&print_args(true, false));
        assert_eq!(expanded.lines().count(), 10);
        assert!(expanded.contains("Design Graphics"));
    }

    #[test]
    fn print_json() {
        let out = printed(&print_args(true, true));
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["rows"].as_array().unwrap().len(), 9);
        assert_eq!(value["rows"][8]["id"], "1-3-2");
    }
}
