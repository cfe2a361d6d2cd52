use perdiem_engine::commands;
use perdiem_engine::{EngineResult, SuccessEnvelope};

use crate::cli::{Cli, Commands, TariffCommand};

pub fn dispatch(cli: &Cli) -> EngineResult<SuccessEnvelope> {
    match &cli.command {
        Commands::Compute {
            days,
            miles,
            receipts,
            tariff,
            json: _,
        } => commands::compute::run(days, miles, receipts, tariff.as_deref()),
        Commands::Eval {
            path,
            tariff,
            json: _,
        } => commands::eval::run(path, tariff.as_deref()),
        Commands::Tariff { command } => match command {
            TariffCommand::Show { tariff, json: _ } => commands::tariff::show(tariff.as_deref()),
        },
    }
}
