use anyhow::Result;
use clap::ValueEnum;
use serde::Serialize;

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    Yaml,
}

impl OutputFormat {
    /// Print `payload` as JSON/YAML, or hand over to `human` for text output.
    pub fn emit<T: Serialize>(self, payload: &T, human: impl FnOnce()) -> Result<()> {
        match self {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(payload)?),
            OutputFormat::Yaml => print!("{}", serde_yaml::to_string(payload)?),
            OutputFormat::Human => human(),
        }
        Ok(())
    }
}
