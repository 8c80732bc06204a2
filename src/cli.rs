//! Command-line interface definitions for Awful Digest.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Model settings can be provided via flags, environment variables, or a
//! YAML settings file.

use crate::config::{DEFAULT_THRESHOLD, Persona};
use crate::outputs::Format;
use clap::Parser;

/// Command-line arguments for the Awful Digest application.
///
/// # Examples
///
/// ```sh
/// # Every persona, printed to the terminal
/// awful_digest
///
/// # One persona as Markdown, written to a directory
/// awful_digest --persona tech_enthusiast --format markdown -o ./digests
///
/// # A local OpenAI-compatible server
/// awful_digest --api-base http://localhost:11434/v1 --model llama3
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Persona to build a digest for (repeatable; defaults to every persona)
    #[arg(short, long, value_enum)]
    pub persona: Vec<Persona>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Console)]
    pub format: Format,

    /// Write one file per persona here instead of printing to stdout
    #[arg(short, long)]
    pub output_dir: Option<String>,

    /// Optional path to a YAML model settings file
    #[arg(short, long)]
    pub config: Option<String>,

    /// API key for the completion endpoint
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Model name (overrides the settings file)
    #[arg(long, env = "OPENAI_MODEL")]
    pub model: Option<String>,

    /// Base URL of an OpenAI-compatible API (overrides the settings file)
    #[arg(long, env = "OPENAI_API_BASE")]
    pub api_base: Option<String>,

    /// Minimum relevance (0-10) an article needs to be included
    #[arg(short, long, default_value_t = DEFAULT_THRESHOLD)]
    pub threshold: u8,
}

impl Cli {
    /// Personas to generate, in table order when none were named.
    pub fn personas(&self) -> Vec<Persona> {
        if self.persona.is_empty() {
            Persona::ALL.to_vec()
        } else {
            self.persona.clone()
        }
    }
}
