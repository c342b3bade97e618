use std::io;
use std::time::Duration;

use panacea::{GatewayClient, Password, Query, Username};
use tracing_subscriber::EnvFilter;

/// Call any gateway action: `raw_action <action> [key=value ...]`.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let action = args.next().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "usage: raw_action <action> [key=value ...]",
        )
    })?;
    let query = args
        .filter_map(|arg| {
            arg.split_once('=')
                .map(|(key, value)| (key.to_owned(), value.to_owned()))
        })
        .collect::<Query>();

    let mut builder = GatewayClient::builder().timeout(Duration::from_secs(30));
    if let (Ok(username), Ok(password)) = (
        std::env::var("PANACEA_USERNAME"),
        std::env::var("PANACEA_PASSWORD"),
    ) {
        builder = builder.credentials(Username::new(username)?, Password::new(password)?);
    }
    let client = builder.build()?;

    let response = client.get(&action, query).await?;
    println!("{:#?}", response.fields());

    Ok(())
}

