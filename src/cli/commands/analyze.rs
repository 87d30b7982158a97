//! Analyze Command
//!
//! One non-interactive cycle: collect, analyze, print, optionally send.
//!
//! Usage:
//!   reviewlens analyze --name "버거킹 연세로점" [--role consumer] [-f json] [--send]

use serde::Serialize;
use tracing::info;

use crate::cli::ui::{Output, render};
use crate::cli::util::{CommandContext, OutputFormat, wait_for_delivery};
use crate::delivery::DeliveryReport;
use crate::session::{CycleOutcome, FormInput, Snapshot};
use crate::types::{Result, ReviewError, Role};

#[derive(Serialize)]
struct AnalyzeOutput<'a> {
    #[serde(flatten)]
    snapshot: &'a Snapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    delivery: Option<DeliveryReport>,
}

pub async fn run(
    ctx: &CommandContext,
    name: &str,
    role: Role,
    format: OutputFormat,
    send: bool,
    wait_secs: u64,
) -> Result<()> {
    let out = Output::new(ctx.quiet);
    let mut session = ctx.session()?;

    let snapshot = match session.submit(FormInput::new(name, role)).await? {
        CycleOutcome::Ready(snapshot) => snapshot,
        CycleOutcome::Invalid { .. } => return Err(ReviewError::EmptyName),
        CycleOutcome::NoData { name, .. } => {
            return Err(ReviewError::NoReviews {
                name: name.into_inner(),
            });
        }
    };

    let delivery = if send {
        let delivery = ctx.delivery()?;
        let handle = session.deliver(delivery.as_ref()).await?;
        info!("Waiting for {} delivery", handle.method());
        Some(wait_for_delivery(handle, wait_secs).await?)
    } else {
        None
    };

    let output = AnalyzeOutput {
        snapshot: &snapshot,
        delivery,
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&output)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(&output)?),
        OutputFormat::Text => {
            render::print_snapshot(&out, &snapshot);
            if let Some(report) = &output.delivery {
                out.section("LLM 전달 결과");
                out.delivery_report(report);
            }
        }
    }

    Ok(())
}
