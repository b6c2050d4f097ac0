//! Simulate binary - dispatches one request locally and prints the response
//!
//! Usage:
//!   cargo run --bin simulate -- --launch --locale es-ES
//!   cargo run --bin simulate -- --intent ConvertidorIntent --locale en-US \
//!       --slot deUnidad=feet --slot UnidadFinal=inches --slot cantidad=5
//!   cargo run --bin simulate -- --file request.json
//!
//! Optional environment variables (same as the server):
//! - DEFAULT_LOCALE (defaults to en)
//! - SPEECH_PREFIX
//! - STRICT_LOCALIZATION

use anyhow::{bail, Context, Result};
use std::fs;
use unit_converter_skill::config::Config;
use unit_converter_skill::envelope::RequestEnvelope;
use unit_converter_skill::{Skill, SkillSettings};

#[derive(Debug, Default)]
struct SimulateArgs {
    locale: Option<String>,
    intent: Option<String>,
    launch: bool,
    slots: Vec<(String, String)>,
    file: Option<String>,
}

impl SimulateArgs {
    fn parse(args: impl IntoIterator<Item = String>) -> Result<Self> {
        let mut parsed = Self::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--launch" => parsed.launch = true,
                "--locale" => parsed.locale = Some(args.next().context("--locale needs a value")?),
                "--intent" => parsed.intent = Some(args.next().context("--intent needs a value")?),
                "--file" => parsed.file = Some(args.next().context("--file needs a path")?),
                "--slot" => {
                    let slot = args.next().context("--slot needs name=value")?;
                    let (name, value) = slot
                        .split_once('=')
                        .with_context(|| format!("Slot '{}' is not name=value", slot))?;
                    parsed.slots.push((name.to_string(), value.to_string()));
                }
                other => bail!("Unknown argument: {}", other),
            }
        }

        Ok(parsed)
    }

    fn into_envelope(self) -> Result<RequestEnvelope> {
        if let Some(path) = &self.file {
            let json = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path))?;
            return serde_json::from_str(&json)
                .with_context(|| format!("{} is not a request envelope", path));
        }

        let locale = self.locale.as_deref().unwrap_or("en-US");
        match (self.launch, self.intent) {
            (true, None) => Ok(RequestEnvelope::launch(locale)),
            (false, Some(intent)) => Ok(self
                .slots
                .iter()
                .fold(RequestEnvelope::intent(locale, &intent), |envelope, (name, value)| {
                    envelope.with_slot(name, value)
                })),
            (true, Some(_)) => bail!("Use either --launch or --intent, not both"),
            (false, None) => bail!("Nothing to simulate: pass --launch, --intent or --file"),
        }
    }
}

fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "unit_converter_skill=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    let envelope = SimulateArgs::parse(std::env::args().skip(1))?.into_envelope()?;

    let skill = Skill::standard(SkillSettings::from(&config));
    let outcome = skill.process(&envelope).context("Dispatch failed")?;

    eprintln!("Handled by: {:?}", outcome.handled_by);
    println!(
        "{}",
        serde_json::to_string_pretty(&outcome.response.to_envelope())?
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_intent_with_slots() {
        let parsed = SimulateArgs::parse(args(&[
            "--intent",
            "ConvertidorIntent",
            "--locale",
            "es-ES",
            "--slot",
            "cantidad=2",
        ]))
        .unwrap();

        assert_eq!(parsed.intent.as_deref(), Some("ConvertidorIntent"));
        assert_eq!(parsed.slots, vec![("cantidad".to_string(), "2".to_string())]);

        let envelope = parsed.into_envelope().unwrap();
        assert_eq!(envelope.locale(), "es-ES");
        assert_eq!(envelope.slot_value("cantidad"), Some("2"));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(SimulateArgs::parse(args(&["--slot", "novalue"])).is_err());
        assert!(SimulateArgs::parse(args(&["--bogus"])).is_err());
        assert!(SimulateArgs::parse(args(&[])).unwrap().into_envelope().is_err());
    }
}
