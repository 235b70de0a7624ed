use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use export_core::{FormField, FormSnapshot, WidgetKind, TOPIC_FIELD};

#[derive(Parser)]
#[command(name = "wiki-export", version, about = "Export wiki topics to Excel or PDF")]
pub struct Cli {
    /// RON config file (defaults to ./wiki-export.ron when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// JSON-RPC endpoint, e.g. https://wiki.example.com/bin/jsonrpc
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Log every request sent to the backend
    #[arg(long)]
    pub debug: bool,

    #[command(subcommand)]
    pub cmd: Cmd,
}

#[derive(Subcommand)]
pub enum Cmd {
    /// Export a topic to an Excel workbook
    Excel(FormArgs),
    /// Export one or more comma-separated topics into a single PDF
    Pdf(FormArgs),
}

impl Cmd {
    pub fn kind(&self) -> WidgetKind {
        match self {
            Cmd::Excel(_) => WidgetKind::Excel,
            Cmd::Pdf(_) => WidgetKind::Pdf,
        }
    }

    pub fn form_args(&self) -> &FormArgs {
        match self {
            Cmd::Excel(args) | Cmd::Pdf(args) => args,
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct FormArgs {
    /// Value of the Topic field
    #[arg(short, long)]
    pub topic: Option<String>,

    /// Additional form field as NAME=VALUE (repeatable)
    #[arg(short, long = "field", value_parser = parse_field)]
    pub fields: Vec<(String, String)>,

    /// Field that must not be empty (repeatable)
    #[arg(short, long = "required")]
    pub required: Vec<String>,

    /// RON file with a list of form fields, applied before the flags
    #[arg(long)]
    pub form: Option<PathBuf>,
}

fn parse_field(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected NAME=VALUE, got {raw:?}")),
    }
}

impl FormArgs {
    /// Builds the form the trigger submits: file fields first, then the
    /// topic and `--field` flags, with `--required` marking fields (missing
    /// required fields are added empty so validation reports them).
    pub fn to_form(&self, base: FormSnapshot) -> FormSnapshot {
        let mut fields = base.fields;
        if let Some(topic) = &self.topic {
            fields.push(FormField::new(TOPIC_FIELD, topic.clone()));
        }
        for (name, value) in &self.fields {
            fields.push(FormField::new(name.clone(), value.clone()));
        }
        for name in &self.required {
            let mut found = false;
            for field in fields.iter_mut().filter(|field| &field.name == name) {
                field.required = true;
                found = true;
            }
            if !found {
                fields.push(FormField::required(name.clone(), ""));
            }
        }
        FormSnapshot::new(fields)
    }
}
