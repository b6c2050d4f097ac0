use anyhow::{bail, Context, Result};
use std::net::SocketAddr;
use tracing::{error, info, warn};
use unit_converter_skill::config::Config;
use unit_converter_skill::i18n::{BundleValidator, LocaleRegistry};
use unit_converter_skill::server::{create_router, AppState};
use unit_converter_skill::{Skill, SkillSettings};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "unit_converter_skill=info,tower_http=info".into()),
        )
        .init();

    info!("Starting unit converter skill");

    // Load configuration from environment
    let config = Config::from_env()?;

    // Refuse to serve with broken message bundles
    let report = BundleValidator::validate(LocaleRegistry::get());
    for warning in &report.warnings {
        warn!("Bundle validation: {}", warning);
    }
    if report.has_errors() {
        for problem in &report.errors {
            error!("Bundle validation: {}", problem);
        }
        bail!("{} message bundle error(s); refusing to start", report.errors.len());
    }

    info!(
        default_locale = %config.default_locale,
        strict_localization = config.strict_localization,
        api_key_required = config.skill_api_key.is_some(),
        skill_id_checked = config.skill_id.is_some(),
        "Configuration loaded"
    );

    let skill = Skill::standard(SkillSettings::from(&config));
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let app = create_router(AppState::new(skill, config));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
