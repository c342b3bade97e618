use std::io;

use panacea::{
    ClientConfig, GatewayClient, MessageText, Password, RawPhoneNumber, SendMessage, SendOptions,
    SenderId, Username,
};
use tracing_subscriber::EnvFilter;

fn required_env(name: &str) -> Result<String, io::Error> {
    std::env::var(name).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{name} environment variable is required"),
        )
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let username = required_env("PANACEA_USERNAME")?;
    let password = required_env("PANACEA_PASSWORD")?;
    let phone_raw = required_env("PANACEA_PHONE")?;
    let message = std::env::var("PANACEA_MESSAGE")
        .unwrap_or_else(|_| "Hello from the panacea demo.".to_owned());

    let mut config =
        ClientConfig::with_credentials(Username::new(username)?, Password::new(password)?);
    if let Ok(uri) = std::env::var("PANACEA_URI") {
        config.set_uri(uri);
    }

    let options = SendOptions {
        from: std::env::var("PANACEA_FROM").ok().map(SenderId::new).transpose()?,
        ..Default::default()
    };

    let client = GatewayClient::new(config);
    let request = SendMessage::new(
        RawPhoneNumber::new(phone_raw)?,
        MessageText::new(message)?,
        options,
    );

    let response = client.send_message(request).await?;
    println!(
        "status: {:?}, details: {:?}",
        response.status(),
        response.details()
    );

    Ok(())
}
