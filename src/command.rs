use crate::data::datatable::DataTable;
use tracing::debug;

/// Command registry, in resolution order. A typed token resolves to the
/// first entry whose full name starts with it, so `sho` means `show`, not
/// `show_only`. Keep the order stable: tests pin it.
pub const COMMANDS: [&str; 5] = ["show", "show_only", "hide", "reset", "exit"];

/// Parse and run the command-mode buffer against the table. Returns true
/// when the run loop should terminate (the `exit` command). Unresolvable
/// command names and unknown column names are silent no-ops.
pub fn execute(table: &mut DataTable, input: &str) -> bool {
    let mut tokens = input.split_whitespace();
    let Some(name) = tokens.next() else {
        return false;
    };
    let args: Vec<&str> = tokens.collect();

    let Some(&command) = COMMANDS.iter().find(|c| c.starts_with(name)) else {
        debug!(target: "command", name, "unresolved command");
        return false;
    };

    debug!(target: "command", command, args = ?args, "executing");

    match command {
        "show" => {
            for arg in &args {
                if let Some(idx) = table.find_column(arg) {
                    table.enable_col(idx);
                }
            }
        }
        "show_only" => {
            // Hide the complement of the named set. Cumulative: existing
            // disabled columns stay disabled.
            let keep: Vec<usize> = args.iter().filter_map(|a| table.find_column(a)).collect();
            for idx in 0..table.column_count() {
                if !keep.contains(&idx) {
                    table.disable_col(idx);
                }
            }
        }
        "hide" => {
            for arg in &args {
                if let Some(idx) = table.find_column(arg) {
                    table.disable_col(idx);
                }
            }
        }
        "reset" => {
            table.reset_disabled_cols();
            table.reset_visibility();
        }
        "exit" => {
            table.dump_on_exit = true;
            return true;
        }
        _ => unreachable!(),
    }

    false
}
