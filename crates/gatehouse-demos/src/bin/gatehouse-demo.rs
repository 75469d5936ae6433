//! Scenario runner for the gatehouse demos

use anyhow::Context;
use clap::{Parser, Subcommand};
use gatehouse_chat::providers::{OpenAiClient, OpenAiConfig};
use gatehouse_demos::scenarios::{
    BankingTriage, ClaimsReview, LoanPipeline, OperationsDesk, SupportDesk,
};
use gatehouse_runtime::Runtime;
use gatehouse_utils::GatehouseConfig;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "gatehouse-demo")]
#[command(about = "Human-in-the-loop agent scenario demos", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a loan application through the sequential pipeline
    Loan {
        /// Raw application text
        application: String,
    },
    /// Review an insurance claim with concurrent specialists
    Claims {
        /// Claim identifier
        #[arg(long, default_value = "clm-1")]
        claim_id: String,
        /// Policy number
        #[arg(long, default_value = "pol-1")]
        policy: String,
        /// Claim description
        description: String,
    },
    /// Triage a banking customer message and route it
    Banking {
        /// Customer identifier
        #[arg(long, default_value = "cust-1")]
        customer: String,
        /// The customer's message
        message: String,
    },
    /// Send one customer support message (history kept for the process
    /// lifetime)
    Support {
        /// Customer identifier
        #[arg(long, default_value = "cust-1")]
        customer: String,
        /// The customer's message
        message: String,
    },
    /// Walk an account freeze through the approval protocol
    Approval {
        /// Instruction for the operations agent
        instruction: String,
        /// Approve the request instead of rejecting it
        #[arg(long)]
        approve: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    gatehouse_utils::init_tracing();

    let cli = Cli::parse();
    let config = GatehouseConfig::from_env();
    config.validate().context("configuration is incomplete")?;

    let client = build_client(&config)?;
    let runtime = Runtime::builder()
        .client(client.clone())
        .default_model(&config.model)
        .build()?;

    match cli.command {
        Commands::Loan { application } => {
            info!("running loan pipeline");
            let pipeline = LoanPipeline::new(&runtime)?;
            println!("{}", pipeline.run(&application).await?);
        }

        Commands::Claims {
            claim_id,
            policy,
            description,
        } => {
            info!("running claims review");
            let review = ClaimsReview::new(&runtime)?;
            println!("{}", review.run(&claim_id, &policy, &description).await?);
        }

        Commands::Banking { customer, message } => {
            info!("running banking triage");
            let desk = BankingTriage::new(&runtime)?;
            let outcome = desk.handle(&customer, &message).await?;
            println!(
                "[{:?} / {:?}] {}",
                outcome.triage.department, outcome.triage.priority, outcome.reply
            );
        }

        Commands::Support { customer, message } => {
            info!("running support desk");
            let desk = SupportDesk::new(&runtime);
            println!("{}", desk.handle(&customer, &message).await?);
        }

        Commands::Approval {
            instruction,
            approve,
        } => {
            info!("running approval walkthrough");
            let desk = OperationsDesk::new(client)?;
            let report = desk.run_walkthrough(&instruction, approve).await?;
            println!(
                "request: {} ({})",
                report.request.function_name,
                report.request.message.as_deref().unwrap_or_default()
            );
            println!("decision: {}", if approve { "approved" } else { "rejected" });
            println!("{}", report.outcome);
        }
    }

    Ok(())
}

fn build_client(config: &GatehouseConfig) -> anyhow::Result<Arc<dyn gatehouse_chat::ChatClient>> {
    let mut provider_config = OpenAiConfig::new(
        config
            .api_key
            .clone()
            .unwrap_or_else(|| "not-needed".to_string()),
    );
    if let Some(api_base) = &config.api_base {
        provider_config = provider_config.with_api_base(api_base);
    }
    provider_config = provider_config.with_timeout(config.request_timeout.as_secs());

    let client = OpenAiClient::with_config(provider_config).context("building chat client")?;
    Ok(Arc::new(client))
}
