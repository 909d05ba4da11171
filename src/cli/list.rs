use anyhow::Result;
use clap::Parser;

use crate::cli::SubCommandExtend;
use crate::config::{Opts, OutputFormat};
use crate::PersonDBBuilder;

#[derive(Parser, Debug, Clone)]
pub struct ListCommand {
    /// 输出格式
    #[arg(long, value_name = "FORMAT", value_enum, default_value_t = OutputFormat::Table)]
    pub output_format: OutputFormat,
}

impl SubCommandExtend for ListCommand {
    async fn run(&self, opts: &Opts) -> Result<()> {
        let db = PersonDBBuilder::new(opts.conf_dir.clone()).open().await?;
        let persons = db.persons().await?;

        match self.output_format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&persons)?),
            OutputFormat::Table => {
                for person in &persons {
                    let len = person.vector.as_ref().map_or(0, Vec::len);
                    println!("{}\t{}\t{}\t{}", person.id, person.name, person.last_name, len);
                }
            }
        }
        Ok(())
    }
}
