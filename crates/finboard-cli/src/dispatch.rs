use finboard_client::commands;
use finboard_client::{ClientResult, SuccessEnvelope};

use crate::cli::{
    Cli, Commands, ExpenseCommand, GoalsCommand, IncomeCommand, LoginArgs, UserCommand,
};

pub fn dispatch(cli: &Cli) -> ClientResult<SuccessEnvelope> {
    match &cli.command {
        Commands::Expense { command } => match command {
            ExpenseCommand::Add {
                description,
                amount,
                category,
                installments,
                date,
            } => commands::expense::add(
                description.clone(),
                *amount,
                category.clone(),
                *installments,
                date.clone(),
            ),
        },
        Commands::Income { command } => match command {
            IncomeCommand::Add {
                source,
                amount,
                date,
            } => commands::income::add(source.clone(), *amount, date.clone()),
        },
        Commands::Import { dry_run, path } => commands::import::run(path.clone(), *dry_run),
        Commands::Months => commands::months::run(),
        Commands::Summary(args) => commands::summary::run(args.month.clone()),
        Commands::Search { term } => commands::search::run(term.clone()),
        Commands::Goals { command } => match command {
            GoalsCommand::List => commands::goals::list(),
            GoalsCommand::Set { assignments } => commands::goals::set(assignments.clone()),
        },
        Commands::Budget(args) => commands::budget::run(args.month.clone()),
        Commands::Forecast(args) => commands::forecast::run(args.month.clone()),
        Commands::Audit => commands::audit::run(),
        Commands::User { command } => match command {
            UserCommand::Create {
                username,
                password,
                confirmation,
            } => commands::user::create(username.clone(), password.clone(), confirmation.clone()),
        },
        Commands::Login(LoginArgs { username, password }) => {
            commands::user::login(username.clone(), password.clone())
        }
        Commands::Convert { amount, currency } => {
            commands::convert::run(*amount, currency.clone())
        }
        Commands::Classify { description } => commands::classify::run(description.clone()),
    }
}
