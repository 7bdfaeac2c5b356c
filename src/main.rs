mod modules;

use anyhow::Context;
use hondana_kernel::settings::Settings;
use hondana_kernel::{InitCtx, ModuleRegistry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load hondana settings")?;

    hondana_telemetry::init(&settings.telemetry)?;

    tracing::info!(
        env = ?settings.environment,
        db = %settings.database.url,
        "hondana-app bootstrap starting"
    );

    let pool = hondana_db::connect(&settings.database).await?;

    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry);

    let ctx = InitCtx {
        settings: &settings,
        db: &pool,
    };

    registry.init_modules(&ctx).await?;
    hondana_db::run_migrations(&pool, &registry.collect_migrations()).await?;
    registry.start_modules(&ctx).await?;

    tracing::info!("hondana-app bootstrap complete");

    hondana_http::start_server(&registry, &ctx).await?;

    registry.stop_modules().await?;

    Ok(())
}
