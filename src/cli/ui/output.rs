use console::style;

use crate::delivery::DeliveryReport;

/// Styled terminal messages; `quiet` silences everything but warnings and errors
pub struct Output {
    quiet: bool,
}

impl Output {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    pub fn success(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", style("✓").green(), message);
        }
    }

    pub fn error(&self, message: &str) {
        eprintln!("{} {}", style("✗").red(), message);
    }

    pub fn warning(&self, message: &str) {
        println!("{} {}", style("⚠").yellow(), message);
    }

    pub fn info(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", style("ℹ").blue(), message);
        }
    }

    pub fn header(&self, message: &str) {
        if !self.quiet {
            println!("\n{}", style(message).bold().underlined());
        }
    }

    pub fn section(&self, message: &str) {
        println!("\n{}", style(message).bold());
        println!("{}", "─".repeat(40));
    }

    pub fn kv(&self, key: &str, value: &str) {
        println!("  {} {}", style(format!("{}:", key)).dim(), value);
    }

    pub fn delivery_report(&self, report: &DeliveryReport) {
        let code = report
            .exit_code
            .map(|c| c.to_string())
            .unwrap_or_else(|| "-".to_string());
        let summary = format!(
            "{} 전달 {} (코드 {}, {:.1}s)",
            report.method,
            if report.success { "완료" } else { "실패" },
            code,
            report.elapsed.as_secs_f32()
        );

        if report.success {
            self.success(&summary);
        } else {
            self.error(&summary);
        }
        if !report.excerpt.is_empty() {
            println!("{}", style(&report.excerpt).dim());
        }
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::new(false)
    }
}
