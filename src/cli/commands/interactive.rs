//! Interactive Command
//!
//! The form loop: restaurant name and role in, analysis and prompt out,
//! then an action menu for the ready prompt.

use anyhow::Result;
use dialoguer::{Input, Select, theme::ColorfulTheme};

use crate::cli::ui::{Output, render};
use crate::cli::util::{CommandContext, wait_for_delivery};
use crate::session::{CycleOutcome, FormInput, Session};
use crate::types::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Send,
    Recollect,
    NewSearch,
    Quit,
}

impl Action {
    const ALL: [Action; 4] = [Action::Send, Action::Recollect, Action::NewSearch, Action::Quit];

    fn label(&self) -> &'static str {
        match self {
            Action::Send => "LLM으로 보내기",
            Action::Recollect => "리뷰 다시 수집",
            Action::NewSearch => "새로 검색",
            Action::Quit => "종료",
        }
    }
}

pub async fn run(ctx: &CommandContext, wait_secs: u64) -> Result<()> {
    let out = Output::new(ctx.quiet);
    let theme = ColorfulTheme::default();
    let mut session = ctx.session()?;

    out.header("ReviewLens: 식당 리뷰 분석");

    loop {
        let name = Input::<String>::with_theme(&theme)
            .with_prompt("식당 이름")
            .allow_empty(true)
            .interact_text()?;

        let role_labels: Vec<&str> = Role::ALL.iter().map(|r| r.label()).collect();
        let role_idx = Select::with_theme(&theme)
            .with_prompt("누구를 위한 분석인가요?")
            .items(&role_labels)
            .default(0)
            .interact()?;
        let form = FormInput::new(name, Role::ALL[role_idx]);

        if !run_cycle(&mut session, &out, form.clone()).await {
            continue;
        }

        loop {
            let labels: Vec<&str> = Action::ALL.iter().map(|a| a.label()).collect();
            let choice = Select::with_theme(&theme)
                .with_prompt("다음 작업")
                .items(&labels)
                .default(0)
                .interact()?;

            match Action::ALL[choice] {
                Action::Send => send(ctx, &session, &out, wait_secs).await,
                Action::Recollect => {
                    session.refresh();
                    if !run_cycle(&mut session, &out, form.clone()).await {
                        break;
                    }
                }
                Action::NewSearch => break,
                Action::Quit => return Ok(()),
            }
        }
    }
}

/// Submit the form and render the outcome; true when a prompt is ready
async fn run_cycle(session: &mut Session, out: &Output, form: FormInput) -> bool {
    match session.submit(form).await {
        Ok(CycleOutcome::Ready(snapshot)) => {
            render::print_snapshot(out, &snapshot);
            true
        }
        Ok(CycleOutcome::Invalid { warning }) => {
            out.warning(&warning);
            false
        }
        Ok(CycleOutcome::NoData { message, .. }) => {
            out.error(&message);
            false
        }
        Err(e) if e.is_recoverable() => {
            out.warning(&e.to_string());
            false
        }
        Err(e) => {
            out.error(&format!("[{}] {}", e.kind(), e));
            false
        }
    }
}

/// Launch delivery and report its outcome; failures are shown, not returned
async fn send(ctx: &CommandContext, session: &Session, out: &Output, wait_secs: u64) {
    let delivery = match ctx.delivery() {
        Ok(delivery) => delivery,
        Err(e) => {
            out.error(&e.to_string());
            return;
        }
    };

    let handle = match session.deliver(delivery.as_ref()).await {
        Ok(handle) => handle,
        Err(e) => {
            out.error(&e.to_string());
            return;
        }
    };
    out.success(&format!("{}(으)로 프롬프트를 보냈습니다. 응답을 기다리는 중...", handle.method()));

    match wait_for_delivery(handle, wait_secs).await {
        Ok(report) => out.delivery_report(&report),
        Err(e) => out.error(&e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::LexiconAnalyzer;
    use crate::collector::Aggregator;
    use crate::config::Config;
    use crate::testing::{FailingCollector, StubCollector};
    use crate::types::Platform;

    fn session(collectors: Vec<crate::collector::SharedCollector>) -> Session {
        let config = Config::default();
        Session::new(
            Aggregator::new(collectors),
            Box::new(LexiconAnalyzer::new(&config.analysis)),
            &config,
        )
    }

    #[tokio::test]
    async fn test_run_cycle_reports_readiness() {
        let out = Output::new(true);
        let kakao = StubCollector::with_reviews(Platform::Kakao, 2);
        let mut ready = session(vec![kakao.shared()]);
        assert!(run_cycle(&mut ready, &out, FormInput::new("버거킹", Role::Owner)).await);
        assert!(!run_cycle(&mut ready, &out, FormInput::new(" ", Role::Owner)).await);

        let mut empty = session(vec![StubCollector::empty(Platform::Kakao).shared()]);
        assert!(!run_cycle(&mut empty, &out, FormInput::new("없는식당", Role::Owner)).await);
    }

    #[tokio::test]
    async fn test_run_cycle_survives_collector_failure() {
        let out = Output::new(true);
        let mut failing = session(vec![FailingCollector::shared(Platform::Google)]);
        assert!(!run_cycle(&mut failing, &out, FormInput::new("버거킹", Role::Owner)).await);
        assert_eq!(failing.phase(), crate::session::SessionPhase::Idle);
    }
}
