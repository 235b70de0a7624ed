use export_core::{MessageKind, Phase, ProgressView, WidgetViewModel};
use url::Url;

const BAR_WIDTH: usize = 30;

/// Terminal lines for a widget view.
pub fn render(view: &WidgetViewModel) -> Vec<String> {
    let mut lines = Vec::new();

    if let Some(progress) = &view.progress {
        lines.push(progress_line(progress, view.phase));
    }
    if !view.error_fields.is_empty() {
        lines.push(format!("invalid fields: {}", view.error_fields.join(", ")));
    }
    if let Some(banner) = &view.banner {
        let tag = match banner.kind {
            MessageKind::Error => "error",
            MessageKind::Success => "ok",
        };
        lines.push(format!("{tag}: {}", banner.text));
    }
    if view.phase == Phase::Joining {
        lines.push("joining exported topics ...".to_string());
    }

    lines
}

fn progress_line(progress: &ProgressView, phase: Phase) -> String {
    let percent = progress.percent.clamp(0.0, 100.0);
    let filled = ((percent / 100.0) * BAR_WIDTH as f64).round() as usize;
    let bar = format!("{}{}", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled));
    let step = match phase {
        Phase::Draining { position, total } => format!(" {position}/{total}"),
        _ => String::new(),
    };
    match &progress.label {
        Some(label) => format!("[{bar}] {percent:>5.1}%{step} {label}"),
        None => format!("[{bar}] {percent:>5.1}%{step}"),
    }
}

/// Resolves a server-relative redirect against the RPC endpoint.
pub fn resolve_redirect(endpoint: &str, redirect: &str) -> String {
    Url::parse(endpoint)
        .and_then(|base| base.join(redirect))
        .map(|url| url.to_string())
        .unwrap_or_else(|_| redirect.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use export_core::{Banner, WidgetKind};
    use pretty_assertions::assert_eq;

    fn view() -> WidgetViewModel {
        WidgetViewModel {
            kind: WidgetKind::Pdf,
            phase: Phase::Idle,
            locked: false,
            banner: None,
            error_fields: Vec::new(),
            progress: None,
            dirty: true,
        }
    }

    #[test]
    fn progress_line_shows_step_and_label() {
        let view = WidgetViewModel {
            phase: Phase::Draining {
                position: 2,
                total: 4,
            },
            progress: Some(ProgressView {
                percent: 25.0,
                label: Some("Processing B ...".to_string()),
            }),
            ..view()
        };

        assert_eq!(
            render(&view),
            vec![format!(
                "[{}{}]  25.0% 2/4 Processing B ...",
                "#".repeat(8),
                ".".repeat(22)
            )]
        );
    }

    #[test]
    fn error_banner_and_fields() {
        let view = WidgetViewModel {
            phase: Phase::Failed,
            banner: Some(Banner {
                kind: MessageKind::Error,
                text: "There was a validation error".to_string(),
            }),
            error_fields: vec!["Title".to_string(), "Topic".to_string()],
            ..view()
        };

        assert_eq!(
            render(&view),
            vec![
                "invalid fields: Title, Topic".to_string(),
                "error: There was a validation error".to_string(),
            ]
        );
    }

    #[test]
    fn idle_view_renders_nothing() {
        assert!(render(&view()).is_empty());
    }

    #[test]
    fn relative_redirect_is_resolved_against_endpoint() {
        assert_eq!(
            resolve_redirect("https://wiki.example.com/bin/jsonrpc", "/pub/Main/export.pdf"),
            "https://wiki.example.com/pub/Main/export.pdf"
        );
        assert_eq!(
            resolve_redirect("not a url", "/pub/Main/export.pdf"),
            "/pub/Main/export.pdf"
        );
    }
}
