use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use log::debug;
use tokio::task::block_in_place;

use crate::cli::SubCommandExtend;
use crate::config::{Opts, OutputFormat};
use crate::vectorizer;

#[derive(Parser, Debug, Clone)]
pub struct VectorizeCommand {
    /// 图片路径
    pub image: PathBuf,
    /// 输出格式
    #[arg(long, value_name = "FORMAT", value_enum, default_value_t = OutputFormat::Table)]
    pub output_format: OutputFormat,
}

impl SubCommandExtend for VectorizeCommand {
    async fn run(&self, _opts: &Opts) -> Result<()> {
        let start = Instant::now();
        let vector = block_in_place(|| derive_file(&self.image))?;
        debug!("向量化耗时: {:.2}ms", start.elapsed().as_secs_f32() * 1000.);

        match self.output_format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&vector)?),
            OutputFormat::Table => {
                for (i, v) in vector.iter().enumerate() {
                    println!("{}\t{:.6}", i, v);
                }
            }
        }
        Ok(())
    }
}

/// 读取图片文件并计算特征向量
pub fn derive_file(path: &Path) -> Result<Vec<f64>> {
    let bytes = std::fs::read(path).with_context(|| format!("无法读取 {}", path.display()))?;
    vectorizer::derive(&bytes).with_context(|| format!("无法处理 {}", path.display()))
}
