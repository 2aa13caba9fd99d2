//! Command-line report viewer.
//!
//! # Responsibility
//! - Print expense reports and todos for a data directory as JSON.
//! - Exercise `tallybook_core` without the HTTP server.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tallybook_core::{
    core_version, Expense, ExpenseService, JsonFileStore, Todo, TodoService, EXPENSES_FILE_NAME,
    TODOS_FILE_NAME,
};

#[derive(Parser, Debug)]
#[command(name = "tallybook")]
#[command(about = "Inspect Tallybook data from the command line")]
struct Args {
    /// Directory holding `expenses.json` and `todos.json`
    #[arg(long, env = "TALLYBOOK_DATA_DIR", default_value = "data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the core version
    Version,
    /// Totals per month and category
    Monthly,
    /// Side-by-side totals for two YYYY-MM months
    Compare { month1: String, month2: String },
    /// Charges seen in two or more months of the window
    Recurring {
        #[arg(long)]
        months: Option<String>,
    },
    /// Distinct recent charges
    Tags {
        #[arg(long)]
        months: Option<String>,
    },
    /// List todos
    Todos,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let expenses: ExpenseService<JsonFileStore<Expense>> =
        ExpenseService::new(JsonFileStore::new(args.data_dir.join(EXPENSES_FILE_NAME)));

    let output = match args.command {
        Command::Version => serde_json::json!({ "version": core_version() }),
        Command::Monthly => serde_json::to_value(expenses.monthly_report())?,
        Command::Compare { month1, month2 } => serde_json::to_value(
            expenses.compare_months(Some(month1.as_str()), Some(month2.as_str()))?,
        )?,
        Command::Recurring { months } => {
            serde_json::to_value(expenses.recurring_expenses(months.as_deref())?)?
        }
        Command::Tags { months } => serde_json::to_value(expenses.expense_tags(months.as_deref())?)?,
        Command::Todos => {
            let todos: TodoService<JsonFileStore<Todo>> =
                TodoService::new(JsonFileStore::new(args.data_dir.join(TODOS_FILE_NAME)));
            serde_json::to_value(todos.list_todos())?
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
