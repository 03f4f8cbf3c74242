use anyhow::Context;
use reel_kernel::settings::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load Reel settings")?;
    reel_telemetry::init(&settings.telemetry)?;

    reel_app::serve(settings).await
}
