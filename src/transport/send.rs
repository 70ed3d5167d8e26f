use crate::domain::{
    Charset, CostMode, MessageText, Params, RawPhoneNumber, ResponseFormat, SenderId,
};

/// Name of the remote method used for sending and pricing messages.
pub const SEND_METHOD: &str = "send";

pub fn encode_send_one_form(
    text: &MessageText,
    phone: &RawPhoneNumber,
    sender: Option<&SenderId>,
    charset: &Charset,
) -> Params {
    let mut params = Params::new();
    params.push((RawPhoneNumber::FIELD.to_owned(), phone.raw().to_owned()));
    push_text(&mut params, text);
    push_cost(&mut params, CostMode::SendAndReport);
    push_format(&mut params);
    push_sender(&mut params, sender);
    push_charset(&mut params, charset);
    params
}

// Recipients only: `mes` and `cost` are left to the remote defaults.
pub fn encode_send_many_form(
    phones: &[RawPhoneNumber],
    sender: Option<&SenderId>,
    charset: &Charset,
) -> Params {
    let mut params = Params::new();
    push_phones(&mut params, phones);
    push_format(&mut params);
    push_sender(&mut params, sender);
    push_charset(&mut params, charset);
    params
}

pub fn encode_price_form(text: &MessageText, phones: &[RawPhoneNumber], charset: &Charset) -> Params {
    let mut params = Params::new();
    push_phones(&mut params, phones);
    push_text(&mut params, text);
    push_cost(&mut params, CostMode::PriceOnly);
    push_format(&mut params);
    push_charset(&mut params, charset);
    params
}

fn push_phones(params: &mut Params, phones: &[RawPhoneNumber]) {
    let joined = phones
        .iter()
        .map(RawPhoneNumber::raw)
        .collect::<Vec<_>>()
        .join(",");
    params.push((RawPhoneNumber::FIELD.to_owned(), joined));
}

fn push_text(params: &mut Params, text: &MessageText) {
    params.push((MessageText::FIELD.to_owned(), text.as_str().to_owned()));
}

fn push_cost(params: &mut Params, cost: CostMode) {
    params.push((CostMode::FIELD.to_owned(), cost.as_param().to_owned()));
}

fn push_format(params: &mut Params) {
    params.push((
        ResponseFormat::FIELD.to_owned(),
        ResponseFormat::Json.as_param().to_owned(),
    ));
}

fn push_sender(params: &mut Params, sender: Option<&SenderId>) {
    if let Some(sender) = sender {
        params.push((SenderId::FIELD.to_owned(), sender.as_str().to_owned()));
    }
}

fn push_charset(params: &mut Params, charset: &Charset) {
    params.push((Charset::FIELD.to_owned(), charset.as_str().to_owned()));
}
