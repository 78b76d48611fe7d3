use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor::MoveTo,
    execute,
    style::Stylize,
    terminal::{Clear, ClearType},
};
use std::io::{stdin, stdout, BufRead, Write};
use translator_core::config::ConsoleConfig;
use translator_core::{logging, Direction, DictionaryLoader, SentenceTranslation, Translator};

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let config = ConsoleConfig::parse();
    logging::init("warn");

    let source = config.dictionary.source();
    let dictionary = DictionaryLoader::new()
        .with_reverse_policy(config.dictionary.reverse_policy)
        .load_source(&source, config.dictionary.fetch_timeout())
        .await
        .with_context(|| format!("Failed to load dictionary from {}", source))?;
    let translator = Translator::new(dictionary);

    let mut direction = if config.from_bangla {
        Direction::BanglaToChakma
    } else {
        Direction::ChakmaToBangla
    };

    print_banner(&translator, direction)?;

    let stdin = stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let cmd = line.trim();

        match cmd {
            "exit" => break,
            "" => {}
            ":c" => {
                direction = Direction::ChakmaToBangla;
                print_banner(&translator, direction)?;
                continue;
            }
            ":b" => {
                direction = Direction::BanglaToChakma;
                print_banner(&translator, direction)?;
                continue;
            }
            ":r" => {
                direction = direction.reversed();
                print_banner(&translator, direction)?;
                continue;
            }
            text => {
                let result = translator.translate_sentence(text, direction);
                print_result(text, &result)?;
            }
        }
        prompt()?;
    }

    Ok(())
}

fn print_banner(translator: &Translator, direction: Direction) -> Result<()> {
    let mut out = stdout();
    execute!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    let dict = translator.dictionary();
    writeln!(out, "{}", "Chakma <-> Bangla Dictionary Console".bold())?;
    writeln!(out, "---------------------------------------------------------------")?;
    writeln!(
        out,
        "{} chakma terms, {} bangla terms loaded.",
        dict.chakma_to_bangla.len(),
        dict.bangla_to_chakma.len()
    )?;
    writeln!(
        out,
        "Commands: ':c' chakma->bangla, ':b' bangla->chakma, ':r' reverse, 'exit' quit."
    )?;
    writeln!(out, "\nDirection: {}", direction.as_str().cyan())?;
    prompt()
}

fn print_result(input: &str, result: &SentenceTranslation) -> Result<()> {
    let mut out = stdout();
    writeln!(out, "\n{} {}", "Input:".dark_grey(), input)?;
    writeln!(out, "{} {}", "Translation:".green().bold(), result.primary)?;
    if result.has_alternatives() {
        writeln!(out, "{}", "Alternatives:".yellow())?;
        for alt in &result.alternatives {
            writeln!(out, "  {}", alt)?;
        }
    } else {
        writeln!(out, "{}", result.alternatives.join(", ").dark_grey())?;
    }
    Ok(())
}

fn prompt() -> Result<()> {
    let mut out = stdout();
    write!(out, "\n> ")?;
    out.flush()?;
    Ok(())
}
