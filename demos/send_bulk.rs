use std::io;

use smsc::{MessageText, RawPhoneNumber, SmscClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let login = std::env::var("SMSC_LOGIN").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "SMSC_LOGIN environment variable is required",
        )
    })?;
    let password = std::env::var("SMSC_PASSWORD").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "SMSC_PASSWORD environment variable is required",
        )
    })?;
    // Comma-separated list, e.g. "+77011234567,+77021234567".
    let phones_raw = std::env::var("SMSC_PHONES").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "SMSC_PHONES environment variable is required",
        )
    })?;

    let mut client = SmscClient::new(login, password)?;
    let phones = phones_raw
        .split(',')
        .map(RawPhoneNumber::new)
        .collect::<Result<Vec<_>, _>>()?;
    let text = MessageText::new("Hello from the smsc bulk example.")?;

    let response = client.send_messages_by_sms(&text, &phones, None).await?;
    println!(
        "requests: {}, response: {:?}",
        client.requests_counter(),
        response
    );

    Ok(())
}
