use clap::{Args, Subcommand};
use rust_decimal::Decimal;

use crate::cli::{utils, Context};
use crate::services::CourtRequest;

#[derive(Subcommand)]
pub enum CourtCommands {
    #[command(about = "List all courts")]
    List,

    #[command(about = "Show a court and its reviews")]
    Show {
        #[arg(help = "Court id")]
        id: i64,
    },

    #[command(about = "Publish a new court")]
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        location: String,
        #[arg(long)]
        address: String,
        #[arg(long, help = "Price per hour; omit if not specified")]
        price: Option<Decimal>,
    },

    #[command(about = "Change fields of a court you own")]
    Update {
        #[arg(help = "Court id")]
        id: i64,
        #[command(flatten)]
        fields: CourtFields,
    },

    #[command(about = "Delete a court you own, with all its reviews")]
    Delete {
        #[arg(help = "Court id")]
        id: i64,
    },

    #[command(about = "List the courts you own")]
    Mine,
}

#[derive(Args)]
pub struct CourtFields {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub location: Option<String>,
    #[arg(long)]
    pub address: Option<String>,
    #[arg(long)]
    pub price: Option<Decimal>,
}

impl From<CourtFields> for CourtRequest {
    fn from(fields: CourtFields) -> Self {
        CourtRequest {
            name: fields.name,
            description: fields.description,
            location: fields.location,
            address: fields.address,
            price: fields.price,
        }
    }
}

pub async fn handle(cmd: CourtCommands, ctx: &Context) -> anyhow::Result<()> {
    match cmd {
        CourtCommands::List => {
            let courts = ctx.client.list_courts().await?;
            utils::output_data(ctx.output, &courts, utils::print_courts)
        }
        CourtCommands::Show { id } => {
            let detail = ctx.client.get_court(id).await?;
            utils::output_data(ctx.output, &detail, utils::print_court_detail)
        }
        CourtCommands::Create { name, description, location, address, price } => {
            let request = CourtRequest {
                name: Some(name),
                description: Some(description),
                location: Some(location),
                address: Some(address),
                price,
            };
            let court = ctx.client.create_court(ctx.token()?, &request).await?;
            utils::output_success(ctx.output, &format!("Created court {} ({})", court.id, court.name), &court)
        }
        CourtCommands::Update { id, fields } => {
            let court = ctx.client.update_court(ctx.token()?, id, &fields.into()).await?;
            utils::output_success(ctx.output, &format!("Updated court {}", court.id), &court)
        }
        CourtCommands::Delete { id } => {
            ctx.client.delete_court(ctx.token()?, id).await?;
            utils::output_success(ctx.output, &format!("Deleted court {}", id), &serde_json::Value::Null)
        }
        CourtCommands::Mine => {
            let courts = ctx.client.my_courts(ctx.token()?).await?;
            utils::output_data(ctx.output, &courts, utils::print_courts)
        }
    }
}
