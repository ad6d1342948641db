//! `loreseek chat` — Interactive research session or single-question mode.

use std::sync::Arc;
use std::time::Duration;

use loreseek_agent::{Orchestrator, ResearchSession};
use loreseek_core::domain::Domain;
use loreseek_core::event::{EventBus, SessionEvent};
use loreseek_config::AppConfig;
use tokio::io::{AsyncBufReadExt, BufReader};

pub async fn run(
    message: Option<String>,
    domain: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    // Check for API key early and give a clear error
    if config.api_key.is_none() {
        eprintln!();
        eprintln!("  ERROR: No API key configured!");
        eprintln!();
        eprintln!("  Set one of these environment variables:");
        eprintln!("    export LORESEEK_API_KEY='sk-...'");
        eprintln!("    export OPENAI_API_KEY='sk-...'");
        eprintln!();
        eprintln!("  Or add it to your config file:");
        eprintln!("    {}", AppConfig::config_dir().join("config.toml").display());
        eprintln!();
        return Err("No API key found. See above for setup instructions.".into());
    }

    let start_domain = match domain {
        Some(name) => Domain::parse(&name).map_err(|e| {
            format!("{e}. Valid domains: {}", domain_names().join(", "))
        })?,
        None => config.session.default_domain,
    };

    let provider = loreseek_providers::from_config(&config);
    let tools = Arc::new(loreseek_tools::default_registry(&config.search));
    let tool_names: Vec<String> = tools.names().iter().map(|n| n.to_string()).collect();

    let event_bus = Arc::new(EventBus::default());
    let mut events = event_bus.subscribe();

    let orchestrator = Orchestrator::new(
        provider,
        &config.default_model,
        config.default_temperature,
        tools,
        event_bus,
    )
    .with_max_tokens(config.default_max_tokens)
    .with_max_rounds(config.agent.max_rounds)
    .with_tool_timeout(Duration::from_secs(config.agent.tool_timeout_secs));

    let mut session = ResearchSession::new(start_domain, config.session.debug);

    if let Some(question) = message {
        // Single question mode
        let active = session.domain();
        eprint!("  Researching...");
        let answer = orchestrator
            .advance(session.conversation_mut(), active, &question)
            .await?;
        eprint!("\r               \r");
        println!("{answer}");
        return Ok(());
    }

    // Interactive mode
    println!();
    println!("  ╔══════════════════════════════════════════════╗");
    println!("  ║      LoreSeek — Research Assistant           ║");
    println!("  ╚══════════════════════════════════════════════╝");
    println!();
    println!("  Model:   {}", config.default_model);
    println!("  Tools:   {}", tool_names.join(", "));
    println!("  Domain:  {}", session.domain());
    println!();
    println!("  Commands:");
    println!("    /domain          list research domains");
    println!("    /domain <name>   switch domain (resets the conversation)");
    println!("    /debug on|off    toggle tool usage details");
    println!("    exit             quit");
    println!();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    print_prompt()?;
    while let Some(line) = lines.next_line().await? {
        let input = line.trim();

        if input.is_empty() {
            print_prompt()?;
            continue;
        }
        if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
            break;
        }
        if let Some(rest) = input.strip_prefix("/domain") {
            handle_domain_command(&mut session, rest.trim());
            print_prompt()?;
            continue;
        }
        if let Some(rest) = input.strip_prefix("/debug") {
            handle_debug_command(&mut session, rest.trim());
            print_prompt()?;
            continue;
        }

        let active = session.domain();
        eprint!("  ...");
        let result = orchestrator
            .advance(session.conversation_mut(), active, input)
            .await;
        eprint!("\r     \r");

        // Always empty the event buffer so stale events from earlier
        // exchanges never surface after a later `/debug on`.
        drain_events(&mut events, session.debug());

        match result {
            Ok(answer) => {
                println!();
                for line in answer.lines() {
                    println!("  LoreSeek > {line}");
                }
                println!();
            }
            Err(e) => {
                // Model invocation failures end the round, not the session.
                eprintln!("  [Error] {e}");
                println!();
            }
        }

        print_prompt()?;
    }

    println!();
    println!("  Goodbye!");
    println!();
    Ok(())
}

fn print_prompt() -> std::io::Result<()> {
    use std::io::Write;
    print!("  You > ");
    std::io::stdout().flush()
}

fn domain_names() -> Vec<&'static str> {
    Domain::ALL.iter().map(|d| d.name()).collect()
}

fn handle_domain_command(session: &mut ResearchSession, argument: &str) {
    if argument.is_empty() {
        println!();
        println!("  Current domain: {}", session.domain());
        println!("  Available domains:");
        for domain in Domain::ALL {
            let marker = if domain == session.domain() { "*" } else { " " };
            println!("   {marker} {domain}");
        }
        println!();
        return;
    }

    match session.switch_domain(argument) {
        Ok(domain) => {
            println!();
            println!("  Switched to {domain}. The conversation has been reset.");
            println!();
        }
        Err(e) => {
            println!();
            println!("  {e}");
            println!("  Valid domains: {}", domain_names().join(", "));
            println!();
        }
    }
}

fn handle_debug_command(session: &mut ResearchSession, argument: &str) {
    let enabled = match argument {
        "on" => true,
        "off" => false,
        "" => !session.debug(),
        other => {
            println!("  Unknown /debug argument '{other}' (use on or off)");
            return;
        }
    };
    session.set_debug(enabled);
    println!(
        "  Debug output {}.",
        if enabled { "enabled" } else { "disabled" }
    );
}

/// Empty the buffered session events from the last exchange, rendering
/// them only when debug output is enabled.
fn drain_events(
    events: &mut tokio::sync::broadcast::Receiver<Arc<SessionEvent>>,
    debug: bool,
) {
    while let Ok(event) = events.try_recv() {
        if debug {
            println!("  {}", describe_event(&event));
        }
    }
}

fn describe_event(event: &SessionEvent) -> String {
    match event {
        SessionEvent::ToolRequested {
            tool_name, call_id, ..
        } => format!("[tool] {tool_name} requested ({call_id})"),
        SessionEvent::ToolCompleted {
            tool_name,
            success,
            duration_ms,
            ..
        } => {
            let status = if *success { "ok" } else { "failed" };
            format!("[tool] {tool_name} {status} in {duration_ms}ms")
        }
        SessionEvent::ResponseGenerated {
            model, tokens_used, ..
        } => format!("[model] {model} used {tokens_used} tokens"),
    }
}
