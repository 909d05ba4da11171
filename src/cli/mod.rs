mod compare;
mod list;
pub mod server;
mod vectorize;

pub use compare::*;
pub use list::*;
pub use server::*;
pub use vectorize::*;

use crate::config::Opts;

pub trait SubCommandExtend {
    fn run(&self, opts: &Opts) -> impl std::future::Future<Output = anyhow::Result<()>> + Send;
}
