use std::fs::File;
use std::io::{self, Read};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;

use chatfront::citations::citation_records;
use chatfront::compose::compose_answer;
use chatfront::models::ChatAppResponse;

#[derive(Parser, Debug)]
#[command(name = "render")]
#[command(about = "Render a chat api response JSON into displayable answer HTML")]
struct Cli {
    #[arg(long, default_value = "-")]
    file: String,
    #[arg(long, default_value_t = false)]
    partial: bool,
    #[arg(long, default_value_t = false)]
    html: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let raw = read_input(&cli.file)?;
    let response: ChatAppResponse =
        serde_json::from_str(&raw).context("failed to decode chat api response JSON")?;

    let choice = response
        .choices
        .into_iter()
        .next()
        .context("chat api response contained no choices")?;

    let records = citation_records(&choice.context);
    let followup_questions = choice.context.followup_questions.unwrap_or_default();

    let answer = compose_answer(
        &choice.message.content,
        records,
        followup_questions,
        cli.partial,
        Instant::now(),
    )?;

    if cli.html {
        println!("{}", answer.fragment_html);
    } else {
        println!("{}", serde_json::to_string_pretty(&answer)?);
    }

    Ok(())
}

fn read_input(file: &str) -> Result<String> {
    if file == "-" {
        let mut raw = String::new();
        io::stdin()
            .read_to_string(&mut raw)
            .context("failed to read stdin")?;
        return Ok(raw);
    }

    let mut raw = String::new();
    File::open(file)
        .with_context(|| format!("failed to open {file}"))?
        .read_to_string(&mut raw)
        .with_context(|| format!("failed to read {file}"))?;
    Ok(raw)
}
