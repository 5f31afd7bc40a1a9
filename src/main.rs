use std::io::Write as _;

use cluster_ca_refresh::{
    config::Config,
    credentials::{CredentialsFetcher, CredentialsUpdater, HttpTransport},
    telemetry,
    trust::TlsClientConfig,
};
use color_eyre::eyre::eyre;
use secrecy::ExposeSecret;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();
    telemetry::init_tracing();

    let config = Config::load()?;
    tracing::info!("Loaded configuration: {:?}", config);

    let cluster = config.cluster.as_ref().ok_or_else(|| {
        eyre!("no cluster configured; set CA_REFRESH_CLUSTER__ID and CA_REFRESH_CLUSTER__ACCESS_TOKEN")
    })?;

    let transport = HttpTransport::new(config.authority.request_timeout())?;
    let fetcher = CredentialsFetcher::from_config(Box::new(transport), &config.authority);
    let updater =
        CredentialsUpdater::new(fetcher).require_certificate(config.authority.require_certificate);

    let mut tls = TlsClientConfig::default();
    updater
        .update(&cluster.id, cluster.access_token.expose_secret(), &mut tls)
        .await?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&tls.ca_data)?;
    stdout.flush()?;
    Ok(())
}
