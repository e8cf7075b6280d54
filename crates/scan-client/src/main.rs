mod cli;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use flameo_client::logging::init_tracing;
use flameo_client::{
    resolve_client_config, ClientError, HttpBackend, MemoryPage, Region, SelectedFile,
    UploadController, UsageSection,
};

use crate::cli::{Args, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = resolve_client_config(args.config.as_deref(), args.base_url.as_deref())?;
    let _file_guard = init_tracing(&args.log_dir, &config.logging, args.log_to_stderr)?;
    let backend = Arc::new(HttpBackend::new(&config).context("failed to build http client")?);

    match args.command {
        Command::Scan { image } => {
            let page = Arc::new(MemoryPage::new());
            let controller = UploadController::new(page.clone(), backend, &config);
            controller.choose_file(read_image(&image).await?);
            let outcome = controller.submit_scan().await;
            report(&page, Region::ScanResults, outcome)
        }
        Command::Predict { image } => {
            let page = Arc::new(MemoryPage::new());
            let controller = UploadController::new(page.clone(), backend, &config);
            controller.choose_file(read_image(&image).await?);
            let outcome = controller.submit_predict().await;
            report(&page, Region::PredictResults, outcome)
        }
        Command::Audit { fields } => {
            let page = Arc::new(MemoryPage::new().with_audit_fields(fields));
            let controller = UploadController::new(page.clone(), backend, &config);
            let outcome = controller.submit_audit().await;
            report(&page, Region::AuditResult, outcome)
        }
        Command::Sections { usage } => {
            let page = Arc::new(MemoryPage::new().with_usage(usage));
            let controller = UploadController::new(page, backend, &config);
            let visible = match controller.toggle_usage_sections() {
                UsageSection::Personal => "personal",
                UsageSection::Professional => "professional",
                UsageSection::Neither => "none",
            };
            println!("{visible}");
            Ok(())
        }
    }
}

async fn read_image(path: &std::path::Path) -> anyhow::Result<SelectedFile> {
    SelectedFile::read(path)
        .await
        .with_context(|| format!("failed to read image {}", path.display()))
}

fn report(
    page: &MemoryPage,
    region: Region,
    outcome: Result<(), ClientError>,
) -> anyhow::Result<()> {
    let state = page.state();
    for alert in &state.alerts {
        eprintln!("{alert}");
    }
    match outcome {
        Ok(()) => {
            println!("{}", state.region(region));
            Ok(())
        }
        Err(err) => Err(anyhow::Error::new(err).context("submission failed")),
    }
}
