use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Assess => commands::assess::handle(flags).await,
        Commands::Analyze(args) => commands::analyze::handle(&args, flags).await,
        Commands::Flatten(args) => commands::flatten::handle(&args, flags),
        Commands::Classify(args) => commands::classify::handle(&args, flags),
        Commands::Rank(args) => commands::rank::handle(&args, flags),
        Commands::Report(args) => commands::report::handle(&args),
        Commands::Schema { action } => commands::schema::handle(&action, flags),
    }
}
