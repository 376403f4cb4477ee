use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use japan_car_calc::core::ResultField;
use japan_car_calc::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Field {
    Base,
    Final,
    BaseWithMarkup,
    FinalWithMarkup,
}

impl From<Field> for ResultField {
    fn from(field: Field) -> ResultField {
        match field {
            Field::Base => ResultField::Base,
            Field::Final => ResultField::Final,
            Field::BaseWithMarkup => ResultField::BaseWithMarkup,
            Field::FinalWithMarkup => ResultField::FinalWithMarkup,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Estimate the euro price of a car
    Quote {
        /// Car price in thousands of yen
        yen_price: String,
        /// Delivery cost in thousands of yen
        #[arg(short, long)]
        delivery: Option<String>,
        /// Markup applied to the car price, in percent
        #[arg(short, long, allow_hyphen_values = true)]
        markup: Option<String>,
        /// Print only this amount
        #[arg(short, long, value_enum)]
        field: Option<Field>,
    },
    /// Show the current yen to euro exchange rate
    Rate,
}

impl From<Commands> for japan_car_calc::AppCommand {
    fn from(cmd: Commands) -> japan_car_calc::AppCommand {
        match cmd {
            Commands::Quote {
                yen_price,
                delivery,
                markup,
                field,
            } => japan_car_calc::AppCommand::Quote(japan_car_calc::QuoteRequest {
                yen_price,
                delivery_cost: delivery,
                markup_percent: markup,
                field: field.map(ResultField::from),
            }),
            Commands::Rate => japan_car_calc::AppCommand::Rate,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => japan_car_calc::cli::setup::setup(),
        Some(cmd) => japan_car_calc::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
