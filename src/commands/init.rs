use std::io::{self, BufRead, Write};

use serde::Serialize;

use crate::config::{ApiKey, Config, DEFAULT_BIND};
use crate::error::{LinearError, Result};

#[derive(Serialize)]
struct FileConfig<'a> {
    api_key: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    bind: Option<&'a str>,
}

pub async fn run() -> Result<()> {
    let config_path = Config::config_path()?;
    let stdin = io::stdin();
    let mut input = stdin.lock();

    if config_path.exists() {
        let answer = prompt(
            &mut input,
            &format!(
                "Config file already exists at {}. Overwrite? [y/N] ",
                config_path.display()
            ),
        )?;

        if !answer.eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    println!("Linear Tasks Configuration");
    println!("==========================\n");

    let api_key = prompt(
        &mut input,
        "Enter your Linear API key (create one at https://linear.app/settings/api): ",
    )?;
    let api_key = ApiKey::new(&api_key).ok_or(LinearError::MissingApiKey)?;

    let bind = prompt(
        &mut input,
        &format!("Address to listen on [{DEFAULT_BIND}]: "),
    )?;

    let contents = render_config(&api_key, &bind)?;

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| LinearError::ConfigWrite {
            path: config_path.clone(),
            source: e,
        })?;
    }

    std::fs::write(&config_path, contents).map_err(|e| LinearError::ConfigWrite {
        path: config_path.clone(),
        source: e,
    })?;

    println!("\nConfig saved to {}", config_path.display());
    println!("Run 'linear-tasks serve' to start the page.");

    Ok(())
}

fn prompt(input: &mut impl BufRead, message: &str) -> Result<String> {
    print!("{message}");
    io::stdout().flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn render_config(api_key: &ApiKey, bind: &str) -> Result<String> {
    let bind = Some(bind.trim()).filter(|b| !b.is_empty());
    let file = FileConfig {
        api_key: api_key.expose(),
        bind,
    };
    Ok(toml::to_string(&file)?)
}
