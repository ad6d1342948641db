//! `loreseek doctor` — Diagnose configuration and connectivity.

use loreseek_config::AppConfig;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("LoreSeek Doctor — Diagnostics");
    println!("=============================\n");

    let mut issues = 0;

    let config_path = AppConfig::config_dir().join("config.toml");
    if !config_path.exists() {
        println!("  ⚠️  No config file — run `loreseek onboard` (defaults in use)");
    }

    match AppConfig::load() {
        Ok(config) => {
            println!("  ✅ Configuration valid");

            if config.has_api_key() {
                println!("  ✅ Model API key configured");

                let provider = loreseek_providers::from_config(&config);
                match provider.health_check().await {
                    Ok(true) => println!("  ✅ Model provider reachable ({})", config.api_url),
                    Ok(false) | Err(_) => {
                        println!("  ❌ Model provider unreachable ({})", config.api_url);
                        issues += 1;
                    }
                }
            } else {
                println!("  ❌ No model API key — set LORESEEK_API_KEY or api_key in config.toml");
                issues += 1;
            }

            if config.search.tavily_api_key.is_some() {
                println!("  ✅ Web search key configured");
            } else {
                println!("  ⚠️  No Tavily key — web search will report itself unavailable");
            }
        }
        Err(e) => {
            println!("  ❌ Configuration invalid: {e}");
            issues += 1;
        }
    }

    println!();
    if issues == 0 {
        println!("  All checks passed.");
    } else {
        println!("  {issues} issue(s) found. See above for details.");
    }

    Ok(())
}
