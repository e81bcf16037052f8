//! `wellchat auth` / `wellchat deauth`

use std::error::Error;
use std::io::{self, BufRead, Write};

use crate::core::credentials::{validate_api_key, CredentialStore};

const KEY_PROMPT: &str = "Enter your Gemini API key: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationChoice {
    Yes,
    No,
}

pub fn parse_confirmation(input: &str) -> Result<ConfirmationChoice, String> {
    match input.trim().to_lowercase().as_str() {
        "" | "n" | "no" => Ok(ConfirmationChoice::No),
        "y" | "yes" => Ok(ConfirmationChoice::Yes),
        other => Err(format!("Invalid confirmation response: {other}")),
    }
}

pub fn run_auth(store: &CredentialStore) -> Result<(), Box<dyn Error>> {
    println!("🔐 Wellchat Authentication");
    println!("Keys can be created at https://aistudio.google.com/apikey");
    println!();

    let key = prompt_line(KEY_PROMPT)?;
    let key = key.trim();

    if !key.is_empty() && !validate_api_key(key) {
        println!("⚠️  That does not look like a Gemini API key; storing it anyway.");
    }

    if let Err(err) = store.store_key(key) {
        eprintln!("❌ Authentication failed: {err}");
        std::process::exit(1);
    }
    println!("✅ Gemini API key saved to the system keyring");
    Ok(())
}

pub fn run_deauth(store: &CredentialStore) -> Result<(), Box<dyn Error>> {
    let confirmation = prompt_line("Remove the stored Gemini API key? [y/N]: ")?;
    match parse_confirmation(&confirmation)? {
        ConfirmationChoice::No => {
            println!("Cancelled.");
            Ok(())
        }
        ConfirmationChoice::Yes => {
            if store.remove_key()? {
                println!("✅ Removed the stored Gemini API key");
            } else {
                println!("No stored Gemini API key found.");
            }
            Ok(())
        }
    }
}

fn prompt_line(prompt: &str) -> io::Result<String> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().lock().read_line(&mut input)?;
    Ok(input)
}
