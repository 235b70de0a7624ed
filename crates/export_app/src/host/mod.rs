pub mod logging;
pub mod render;

use anyhow::Context;
use export_core::{ElementId, FormSnapshot, Phase, WidgetOptions};
use export_engine::{EngineEvent, EngineHandle, RejectReason};
use export_logging::{export_debug, export_info};

use crate::cli::Cli;
use crate::config::AppConfig;

/// Mounts one widget for the requested export, submits the form and renders
/// engine events until the submission finishes.
pub fn run_app(cli: Cli) -> anyhow::Result<Phase> {
    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(endpoint) = cli.endpoint {
        config.endpoint = endpoint;
    }
    config.debug |= cli.debug;

    logging::initialize(config.log, export_logging::level_for(config.debug));
    export_info!("exporting via {}/{}", config.endpoint, config.namespace);

    let kind = cli.cmd.kind();
    let form_args = cli.cmd.form_args();
    let base = match &form_args.form {
        Some(path) => load_form(path)?,
        None => FormSnapshot::default(),
    };
    let form = form_args.to_form(base);

    let engine = EngineHandle::new(config.engine_config())
        .with_context(|| format!("cannot use endpoint {}", config.endpoint))?;
    let element = ElementId::new(kind.marker_class());
    let options = WidgetOptions {
        debug: config.debug,
    };
    engine.mount(element.clone(), kind, options);
    engine.submit(element.clone(), form);

    while let Some(event) = engine.recv() {
        match event {
            EngineEvent::Mounted { created, .. } => {
                export_debug!("{} mounted (new: {})", kind.log_prefix(), created);
            }
            EngineEvent::View { view, .. } => {
                for line in render::render(&view) {
                    println!("{line}");
                }
            }
            EngineEvent::Navigate { url, .. } => {
                println!("{}", render::resolve_redirect(&config.endpoint, &url));
            }
            EngineEvent::Rejected { reason, .. } => {
                let reason = match reason {
                    RejectReason::NotMounted => "widget not mounted",
                    RejectReason::Busy => "submission already in flight",
                };
                anyhow::bail!("submission rejected: {reason}");
            }
            EngineEvent::Finished { element: done, phase } if done == element => {
                return Ok(phase);
            }
            EngineEvent::Finished { .. } => {}
        }
    }

    anyhow::bail!("export engine stopped unexpectedly")
}

fn load_form(path: &std::path::Path) -> anyhow::Result<FormSnapshot> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read form file {}", path.display()))?;
    ron::from_str(&content).with_context(|| format!("cannot parse form file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use export_core::FormField;
    use tempfile::TempDir;

    #[test]
    fn form_file_is_a_ron_field_list() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("form.ron");
        std::fs::write(
            &path,
            r#"[(name: "Topic", value: "Main.WebHome", required: true), (name: "Sheet")]"#,
        )
        .unwrap();

        let form = load_form(&path).unwrap();
        assert_eq!(
            form,
            FormSnapshot::new(vec![
                FormField::required("Topic", "Main.WebHome"),
                FormField::new("Sheet", ""),
            ])
        );
    }
}
