use parley_config::Config;

/// Strategy for displaying the effective configuration.
///
/// Shows the merged result of the config file and environment overrides,
/// with the API key masked.
#[derive(Debug, Clone, Copy)]
pub struct InfoStrategy;

impl super::CommandStrategy for InfoStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load()?;

        println!("=== parley Configuration ===\n");

        println!("Config File: {}", Config::config_path()?.display());
        println!();

        println!("Cohere:");
        println!("  API Key: {}", mask_key(&config.providers.cohere.api_key));
        println!("  Base URL: {}", config.providers.cohere.base_url);
        println!();

        println!("Completion:");
        println!("  Model: {}", config.completion.model);
        println!("  Page Max Tokens: {}", config.completion.page_max_tokens);
        println!("  API Max Tokens: {}", config.completion.api_max_tokens);
        println!("  Temperature: {}", config.completion.temperature);
        println!();

        println!("Server:");
        println!("  Listen: {}", config.server.listen_addr());
        println!("  Static Dir: {}", config.server.static_dir.display());
        println!();

        println!("Sessions:");
        println!("  Idle Timeout: {}s", config.session.idle_timeout_secs);
        println!(
            "  Permanent Lifetime: {}s",
            config.session.permanent_lifetime_secs
        );
        println!("  History Max Turns: {}", config.history.max_turns);

        Ok(())
    }
}

fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.is_empty() {
        "(not set)".to_string()
    } else if chars.len() > 8 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}...{tail}")
    } else {
        "***".to_string()
    }
}
