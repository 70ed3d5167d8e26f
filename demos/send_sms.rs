use std::io;

use smsc::{MessageText, RawPhoneNumber, SenderId, SmscClient};

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
    let login = required_env("SMSC_LOGIN")?;
    let password = required_env("SMSC_PASSWORD")?;
    let phone_raw = required_env("SMSC_PHONE")?;
    let message = std::env::var("SMSC_MESSAGE")
        .unwrap_or_else(|_| "Hello from the smsc example.".to_owned());
    let sender = std::env::var("SMSC_SENDER")
        .ok()
        .map(SenderId::new)
        .transpose()?;

    let mut client = SmscClient::new(login, password)?;
    let phone = RawPhoneNumber::new(phone_raw)?;
    let text = MessageText::new(message)?;

    let response = client
        .send_message_by_sms(&text, &phone, sender.as_ref())
        .await?;
    println!("response: {response:?}");

    Ok(())
}
