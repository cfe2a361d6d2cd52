use crate::cli::{Commands, TariffCommand};

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum OutputMode {
    Text,
    Json,
}

pub fn mode_for_command(command: &Commands) -> OutputMode {
    let json = match command {
        Commands::Compute { json, .. } | Commands::Eval { json, .. } => *json,
        Commands::Tariff { command } => match command {
            TariffCommand::Show { json, .. } => *json,
        },
    };

    if json { OutputMode::Json } else { OutputMode::Text }
}
