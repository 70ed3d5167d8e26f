use std::io;

use smsc::{ErrorCode, MessageText, RawPhoneNumber, SmscClient, SmscError};

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
    let phone_raw = std::env::var("SMSC_PHONE").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "SMSC_PHONE environment variable is required",
        )
    })?;
    let message = std::env::var("SMSC_MESSAGE")
        .unwrap_or_else(|_| "Hello from the smsc check_price example.".to_owned());

    let mut client = SmscClient::new(login, password)?;
    let phones = vec![RawPhoneNumber::new(phone_raw)?];
    let text = MessageText::new(message)?;

    match client.get_price_of_sms_messages(&text, &phones).await {
        Ok(response) => println!(
            "cost: {:?}, cnt: {:?}",
            response.get("cost"),
            response.get("cnt")
        ),
        Err(SmscError::Api(err)) if err.code() == ErrorCode::Login => {
            eprintln!("credentials rejected: {}", err.message());
        }
        Err(err) => return Err(err.into()),
    }

    Ok(())
}
