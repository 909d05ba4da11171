use std::convert::Infallible;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::LazyLock;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use directories::ProjectDirs;

use crate::cli::*;

static CONF_DIR: LazyLock<ConfDir> = LazyLock::new(|| {
    let proj_dirs =
        ProjectDirs::from("", "personvec", "personvec").expect("failed to get project dir");
    ConfDir { path: proj_dirs.config_dir().to_path_buf() }
});

fn default_config_dir() -> &'static str {
    CONF_DIR.path().to_str().unwrap_or(".")
}

#[derive(Parser, Debug, Clone)]
pub struct ServerOptions {
    /// 请求体大小上限，单位为字节
    #[arg(long, value_name = "BYTES", default_value_t = 10 * 1024 * 1024)]
    pub body_limit: usize,
    /// 单张图片解码和向量化的超时时间，单位为秒
    #[arg(long, value_name = "SECS", default_value_t = 10)]
    pub decode_timeout: u64,
}

impl ServerOptions {
    pub fn decode_timeout(&self) -> Duration {
        Duration::from_secs(self.decode_timeout)
    }
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self { body_limit: 10 * 1024 * 1024, decode_timeout: 10 }
    }
}

#[derive(Parser, Debug, Clone)]
#[command(name = "personvec", version)]
pub struct Opts {
    #[command(subcommand)]
    pub subcmd: SubCommand,
    /// personvec 配置文件目录
    #[arg(short, long, default_value = default_config_dir())]
    pub conf_dir: ConfDir,
}

#[derive(Subcommand, Debug, Clone)]
pub enum SubCommand {
    /// 启动 HTTP 服务
    Server(ServerCommand),
    /// 计算一张图片的特征向量
    Vectorize(VectorizeCommand),
    /// 计算两张图片特征向量的欧氏距离
    Compare(CompareCommand),
    /// 列出数据库中的所有人员
    List(ListCommand),
}

#[derive(Debug, Clone)]
pub struct ConfDir {
    path: PathBuf,
}

impl ConfDir {
    pub fn path(&self) -> &Path {
        self.path.as_path()
    }

    /// 返回数据库文件的路径
    pub fn database(&self) -> PathBuf {
        self.path.join("personvec.db")
    }
}

impl FromStr for ConfDir {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self { path: PathBuf::from(s) })
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    Json,
    #[default]
    Table,
}
