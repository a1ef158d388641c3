use clap::Subcommand;

use crate::cli::{utils, Context};
use crate::services::ReviewRequest;

#[derive(Subcommand)]
pub enum ReviewCommands {
    #[command(about = "List reviews of a court, newest first")]
    List {
        #[arg(help = "Court id")]
        court_id: i64,
    },

    #[command(about = "Review a court")]
    Add {
        #[arg(help = "Court id")]
        court_id: i64,
        #[arg(long, value_parser = clap::value_parser!(i32).range(1..=5), help = "Rating from 1 to 5")]
        rating: i32,
        #[arg(long)]
        comment: String,
    },

    #[command(about = "Change a review you wrote")]
    Update {
        #[arg(help = "Review id")]
        id: i64,
        #[arg(long, value_parser = clap::value_parser!(i32).range(1..=5))]
        rating: Option<i32>,
        #[arg(long)]
        comment: Option<String>,
    },

    #[command(about = "Delete a review you wrote")]
    Delete {
        #[arg(help = "Review id")]
        id: i64,
    },

    #[command(about = "List the reviews you wrote")]
    Mine,
}

pub async fn handle(cmd: ReviewCommands, ctx: &Context) -> anyhow::Result<()> {
    match cmd {
        ReviewCommands::List { court_id } => {
            let reviews = ctx.client.list_reviews(court_id).await?;
            utils::output_data(ctx.output, &reviews, utils::print_reviews)
        }
        ReviewCommands::Add { court_id, rating, comment } => {
            let review = ctx.client.create_review(ctx.token()?, court_id, rating, &comment).await?;
            utils::output_success(ctx.output, &format!("Added review {} to court {}", review.id, court_id), &review)
        }
        ReviewCommands::Update { id, rating, comment } => {
            let changes = ReviewRequest { rating, comment };
            let review = ctx.client.update_review(ctx.token()?, id, &changes).await?;
            utils::output_success(ctx.output, &format!("Updated review {}", review.id), &review)
        }
        ReviewCommands::Delete { id } => {
            ctx.client.delete_review(ctx.token()?, id).await?;
            utils::output_success(ctx.output, &format!("Deleted review {}", id), &serde_json::Value::Null)
        }
        ReviewCommands::Mine => {
            let reviews = ctx.client.my_reviews(ctx.token()?).await?;
            utils::output_data(ctx.output, &reviews, utils::print_reviews)
        }
    }
}
