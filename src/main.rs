//! salarycast - Main entry point

use clap::Parser;
use salarycast::cli::{cmd_generate, cmd_predict, cmd_report, cmd_summary, Cli, Commands};
use salarycast::features::PredictionRequest;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "salarycast=info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { output, rows, seed } => {
            cmd_generate(&output, rows, seed)?;
        }
        Commands::Summary { data } => {
            cmd_summary(data.as_ref())?;
        }
        Commands::Predict {
            data,
            age,
            gender,
            education,
            job_title,
            experience,
            trees,
        } => {
            let request = PredictionRequest {
                age,
                gender,
                education,
                job_title,
                years_experience: experience,
            };
            cmd_predict(data.as_ref(), &request, trees)?;
        }
        Commands::Report {
            data,
            name,
            age,
            gender,
            education,
            job_title,
            experience,
            output,
            font_dir,
            font_name,
            trees,
        } => {
            let request = PredictionRequest {
                age,
                gender,
                education,
                job_title,
                years_experience: experience,
            };
            cmd_report(
                data.as_ref(),
                &name,
                &request,
                &output,
                font_dir.as_ref(),
                &font_name,
                trees,
            )?;
        }
    }

    Ok(())
}
