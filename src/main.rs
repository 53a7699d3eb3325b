use anyhow::Context;

use dekaplet::app::{
    load_configuration,
    setup_tracing,
    DekapletApp,
};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    setup_tracing("dekaplet".into(), "info".into());

    let configuration = load_configuration().context("error loading configuration")?;
    let app = DekapletApp::from(configuration).await?;
    tracing::info!("listening on port {}", app.port());

    app.run_until_stopped().await?;
    Ok(())
}
