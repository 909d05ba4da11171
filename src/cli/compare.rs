use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tokio::task::block_in_place;

use crate::cli::{SubCommandExtend, derive_file};
use crate::compare;
use crate::config::Opts;

#[derive(Parser, Debug, Clone)]
pub struct CompareCommand {
    /// 第一张图片路径
    pub image1: PathBuf,
    /// 第二张图片路径
    pub image2: PathBuf,
}

impl SubCommandExtend for CompareCommand {
    async fn run(&self, _opts: &Opts) -> Result<()> {
        let (a, b) = block_in_place(|| -> Result<_> {
            Ok((derive_file(&self.image1)?, derive_file(&self.image2)?))
        })?;
        let distance = compare::euclidean(&a, &b)?;
        println!("{:.6}", distance);
        Ok(())
    }
}
