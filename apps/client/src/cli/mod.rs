//! `vocab` command-line interface.

mod quiz;
mod vocabulary;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands::QuizOptions;
use crate::config::ClientConfig;
use crate::store::HttpStore;

pub use quiz::{play, run_quiz, AnswerLines};

#[derive(Parser)]
#[command(name = "vocab", version, about = "Vocabulary entry and quiz client")]
pub struct Cli {
    /// Base URL of the vocabulary API (overrides VOCAB_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add words from "word: meaning" or "word - meaning" lines
    Add {
        /// Entry text; read from stdin when omitted
        text: Option<String>,
    },

    /// Replace a word and its meaning
    Edit {
        /// Record ID
        id: String,

        /// New "word: meaning" line
        text: String,
    },

    /// Delete a word
    Delete {
        /// Record ID
        id: String,
    },

    /// List all words
    List,

    /// Check that the vocabulary API answers
    Status,

    /// Show how text would be parsed, without contacting the store
    Parse {
        /// Entry text; read from stdin when omitted
        text: Option<String>,

        /// Print the parse report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Quiz yourself on the stored words
    Quiz {
        /// Randomize question order
        #[arg(long)]
        shuffle: bool,

        /// Ask at most this many questions
        #[arg(long)]
        limit: Option<usize>,
    },
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let api_url = self.api_url.as_deref();

        match self.command {
            Commands::Parse { text, json } => {
                let text = vocabulary::read_text(text).await?;
                vocabulary::parse(&text, json)
            }
            Commands::Add { text } => {
                let text = vocabulary::read_text(text).await?;
                vocabulary::add(&connect(api_url)?, &text).await
            }
            Commands::Edit { id, text } => vocabulary::edit(&connect(api_url)?, &id, &text).await,
            Commands::Delete { id } => vocabulary::delete(&connect(api_url)?, &id).await,
            Commands::List => vocabulary::list(&connect(api_url)?).await,
            Commands::Status => vocabulary::status(&connect(api_url)?).await,
            Commands::Quiz { shuffle, limit } => {
                quiz::execute(connect(api_url)?, QuizOptions { shuffle, limit }).await
            }
        }
    }
}

fn connect(api_url: Option<&str>) -> Result<HttpStore> {
    let mut config = ClientConfig::from_env()?;
    if let Some(url) = api_url {
        config = config.with_api_url(url)?;
    }
    Ok(HttpStore::new(&config)?)
}
