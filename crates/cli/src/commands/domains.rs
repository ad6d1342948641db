//! `loreseek domains` — List available research domains.

use loreseek_core::domain::Domain;

pub fn run() {
    println!("Available research domains:");
    for domain in Domain::ALL {
        let marker = if domain == Domain::default() {
            " (default)"
        } else {
            ""
        };
        println!("  {domain}{marker}");
    }
    println!();
    println!("Start in a domain with `loreseek chat --domain <name>`");
    println!("or switch mid-session with `/domain <name>`.");
}
