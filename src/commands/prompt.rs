//! Shared dialoguer prompts for the dashboard forms.
//!
//! Parsing errors are caught by `validate_with` so the user is asked again
//! on the spot; rule violations reported by the store are handled by
//! [`until_valid`], which reruns the whole form.

use crate::libs::error::StoreError;
use crate::libs::messages::Message;
use crate::libs::money::Money;
use crate::msg_error;
use anyhow::Result;
use chrono::NaiveDate;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Password, Select};
use std::str::FromStr;

pub fn required_text(prompt: Message, default: Option<&str>) -> Result<String> {
    let field = prompt.to_string();
    let theme = ColorfulTheme::default();
    let mut input = Input::<String>::with_theme(&theme).with_prompt(prompt.to_string());
    if let Some(default) = default {
        input = input.default(default.to_string());
    }
    let value = input
        .validate_with(|v: &String| -> std::result::Result<(), String> {
            if v.trim().is_empty() {
                Err(Message::FieldRequired(field.clone()).to_string())
            } else {
                Ok(())
            }
        })
        .interact_text()?;
    Ok(value.trim().to_string())
}

/// Empty input maps to `None`.
pub fn optional_text(prompt: Message, default: Option<&str>) -> Result<Option<String>> {
    let value: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt.to_string())
        .default(default.unwrap_or_default().to_string())
        .allow_empty(true)
        .interact_text()?;
    let value = value.trim();
    Ok(if value.is_empty() { None } else { Some(value.to_string()) })
}

pub fn number<T>(prompt: Message, default: Option<T>) -> Result<T>
where
    T: FromStr + ToString,
{
    let text = required_text_validated(prompt, default.map(|d| d.to_string()), |v| v.parse::<T>().is_ok(), Message::InvalidNumber)?;
    text.parse::<T>().map_err(|_| anyhow::anyhow!(Message::InvalidNumber(text.clone()).to_string()))
}

pub fn optional_number<T>(prompt: Message, default: Option<T>) -> Result<Option<T>>
where
    T: FromStr + ToString,
{
    let value: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt.to_string())
        .default(default.map(|d| d.to_string()).unwrap_or_default())
        .allow_empty(true)
        .validate_with(|v: &String| -> std::result::Result<(), String> {
            if v.trim().is_empty() || v.trim().parse::<T>().is_ok() {
                Ok(())
            } else {
                Err(Message::InvalidNumber(v.clone()).to_string())
            }
        })
        .interact_text()?;
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    Ok(value.parse::<T>().ok())
}

pub fn id(prompt: Message) -> Result<i64> {
    number::<i64>(prompt, None)
}

pub fn money(prompt: Message, default: Option<Money>) -> Result<Money> {
    let text = required_text_validated(
        prompt,
        default.map(|m| format!("{:.2}", m.as_f64())),
        |v| v.parse::<Money>().map(|m| !m.is_negative()).unwrap_or(false),
        Message::InvalidAmount,
    )?;
    Ok(text.parse::<Money>()?)
}

pub fn date(prompt: Message, default: Option<NaiveDate>) -> Result<NaiveDate> {
    let text = required_text_validated(prompt, default.map(|d| d.to_string()), |v| parse_date(v).is_some(), Message::InvalidDate)?;
    parse_date(&text).ok_or_else(|| anyhow::anyhow!(Message::InvalidDate(text.clone()).to_string()))
}

/// Empty input keeps the default (`None` meaning "use the store default").
pub fn optional_date(prompt: Message, default: Option<NaiveDate>) -> Result<Option<NaiveDate>> {
    let value: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt.to_string())
        .default(default.map(|d| d.to_string()).unwrap_or_default())
        .allow_empty(true)
        .validate_with(|v: &String| -> std::result::Result<(), String> {
            if v.trim().is_empty() || parse_date(v).is_some() {
                Ok(())
            } else {
                Err(Message::InvalidDate(v.clone()).to_string())
            }
        })
        .interact_text()?;
    Ok(parse_date(&value))
}

pub fn password(prompt: Message) -> Result<String> {
    Ok(Password::with_theme(&ColorfulTheme::default()).with_prompt(prompt.to_string()).interact()?)
}

pub fn confirm(prompt: Message) -> Result<bool> {
    Ok(Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt.to_string())
        .default(false)
        .interact()?)
}

pub fn select(prompt: Message, items: &[String], default: usize) -> Result<usize> {
    Ok(Select::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt.to_string())
        .items(items)
        .default(default)
        .interact()?)
}

/// Menu selection over message items.
pub fn menu(items: &[Message]) -> Result<usize> {
    let labels: Vec<String> = items.iter().map(|m| m.to_string()).collect();
    select(Message::PromptSelectAction, &labels, 0)
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

fn required_text_validated<F>(prompt: Message, default: Option<String>, is_valid: F, invalid: fn(String) -> Message) -> Result<String>
where
    F: Fn(&str) -> bool,
{
    let theme = ColorfulTheme::default();
    let mut input = Input::<String>::with_theme(&theme).with_prompt(prompt.to_string());
    if let Some(default) = default {
        input = input.default(default);
    }
    let value = input
        .validate_with(|v: &String| -> std::result::Result<(), String> {
            if is_valid(v.trim()) {
                Ok(())
            } else {
                Err(invalid(v.clone()).to_string())
            }
        })
        .interact_text()?;
    Ok(value.trim().to_string())
}

/// Runs a form until the store accepts it.
///
/// Validation errors are shown and the user may fill the form in again;
/// any other error is returned. `Ok(None)` means the user gave up.
pub fn until_valid<T, F>(mut form: F) -> Result<Option<T>>
where
    F: FnMut() -> Result<T>,
{
    loop {
        match form() {
            Ok(value) => return Ok(Some(value)),
            Err(e) => {
                if !matches!(e.downcast_ref::<StoreError>(), Some(store_error) if store_error.is_validation()) {
                    return Err(e);
                }
                msg_error!(e);
                if !confirm(Message::PromptTryAgain)? {
                    return Ok(None);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates_are_iso() {
        assert_eq!(parse_date(" 2024-02-29 "), NaiveDate::from_ymd_opt(2024, 2, 29));
        assert_eq!(parse_date("2023-02-29"), None);
        assert_eq!(parse_date("29.02.2024"), None);
        assert_eq!(parse_date(""), None);
    }
}
