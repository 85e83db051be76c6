// Run one spell check against a live endpoint and print the matches,
// optionally filtered through a local ignore-rule database.
//
// Usage:
//   check_text "Dis tin dey sweet well well"
//   check_text --base-url http://localhost:8010/ --ignore-db ignore.redb "how far"

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;

use naijaspell_core::{
    filter_matches, CorrectionProvider, HttpSpellChecker, IgnoreRuleStore, RedbIgnoreStore,
    SpellConfig,
};

#[derive(Parser)]
#[command(about = "Check a sentence against the Pidgin spell-check endpoint")]
struct Args {
    /// Text to check.
    text: String,

    /// Base URL of the check endpoint (trailing slash included).
    #[arg(long, default_value = "https://api.languagetool.org/")]
    base_url: String,

    /// Language tag to check against.
    #[arg(long, default_value = "pcm-NG")]
    language: String,

    /// Request timeout in milliseconds.
    #[arg(long, default_value_t = 10_000)]
    timeout_ms: u64,

    /// Filter results through this ignore-rule database.
    #[arg(long)]
    ignore_db: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = SpellConfig {
        base_url: args.base_url,
        language: args.language,
        request_timeout_ms: args.timeout_ms,
        ..SpellConfig::default()
    };

    let client = HttpSpellChecker::new(&config).context("building HTTP client")?;
    let matches = client
        .spell_check(&args.text)
        .context("spell check request")?;

    let matches = match args.ignore_db {
        Some(path) => {
            let store = RedbIgnoreStore::new(&path)
                .with_context(|| format!("opening ignore db {}", path.display()))?;
            let rules = store.get_all().context("reading ignore rules")?;
            filter_matches(&matches, &rules)
        }
        None => matches,
    };

    if matches.is_empty() {
        println!("no corrections");
        return Ok(());
    }

    for m in &matches {
        println!("[{}..{}] {}", m.offset, m.offset + m.length, m.message);
        println!("  rule: {} ({})", m.rule.id, m.rule.category.name);
        if !m.replacements.is_empty() {
            let suggestions: Vec<&str> = m
                .replacements
                .iter()
                .take(5)
                .map(|r| r.value.as_str())
                .collect();
            println!("  suggestions: {}", suggestions.join(", "));
        }
    }

    Ok(())
}
