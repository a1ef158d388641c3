use clap::Subcommand;

use crate::cli::{utils, Context, OutputFormat};
use crate::services::UpdateProfileRequest;

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Register a new account")]
    Register {
        #[arg(help = "Username (4-20 letters, digits or underscores)")]
        name: String,
        #[arg(help = "Email")]
        email: String,
        #[arg(long, env = "CANCHAS_PASSWORD", hide_env_values = true, help = "Password")]
        password: String,
    },

    #[command(about = "Log in and print a bearer token")]
    Login {
        #[arg(help = "Email")]
        email: String,
        #[arg(long, env = "CANCHAS_PASSWORD", hide_env_values = true, help = "Password")]
        password: String,
    },

    #[command(about = "Show current user information")]
    Me,

    #[command(about = "Change email and/or password")]
    Update {
        #[arg(long, help = "Current password")]
        current_password: String,
        #[arg(long, help = "New email")]
        email: Option<String>,
        #[arg(long, help = "New password")]
        new_password: Option<String>,
    },
}

pub async fn handle(cmd: AuthCommands, ctx: &Context) -> anyhow::Result<()> {
    match cmd {
        AuthCommands::Register { name, email, password } => {
            let user = ctx.client.register(&name, &email, &password).await?;
            utils::output_success(ctx.output, &format!("Registered {} ({})", user.name, user.id), &user)
        }
        AuthCommands::Login { email, password } => {
            let session = ctx.client.login(&email, &password).await?;
            match ctx.output {
                OutputFormat::Json => utils::output_success(ctx.output, "Login successful", &session),
                OutputFormat::Text => {
                    println!("✓ Logged in as {} (token valid for {}s)", session.user.name, session.expires_in);
                    println!("export CANCHAS_TOKEN={}", session.token);
                    Ok(())
                }
            }
        }
        AuthCommands::Me => {
            let user = ctx.client.me(ctx.token()?).await?;
            utils::output_data(ctx.output, &user, utils::print_user)
        }
        AuthCommands::Update { current_password, email, new_password } => {
            let changes = UpdateProfileRequest {
                email,
                current_password: Some(current_password),
                new_password,
            };
            let user = ctx.client.update_me(ctx.token()?, &changes).await?;
            utils::output_success(ctx.output, "Account updated", &user)
        }
    }
}
