//! iterarray: computes a factorial through an iterative array of tasks.
//!
//! Reads the number from the command line, or prompts for it on stdin.
//! Set `RUST_LOG=iterarray=debug` to watch each worker receive its request.

use std::{
    io::{self, Write},
    str::FromStr,
};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use iterarray::{ChannelArray, Payload};

#[derive(Parser)]
#[command(name = "iterarray", about = "Factorials through a chain of rendezvous-connected tasks")]
struct Args {
    /// Number of workers in the array, the largest number accepted
    #[arg(long, default_value_t = 49)]
    depth: usize,

    /// Integer type carried through the chain
    #[arg(long, value_enum, default_value_t = Width::I64)]
    width: Width,

    /// Number to compute the factorial of (prompted for when omitted)
    n: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Width {
    I64,
    U128,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "iterarray=info".into()),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let input = match args.n {
        Some(n) => n,
        None => prompt()?,
    };

    match args.width {
        Width::I64 => run::<i64>(input.trim(), args.depth).await,
        Width::U128 => run::<u128>(input.trim(), args.depth).await,
    }
}

fn prompt() -> Result<String> {
    print!("Calculate factorial of: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .context("failed to read from stdin")?;
    Ok(line)
}

async fn run<T>(input: &str, depth: usize) -> Result<()>
where
    T: Payload + FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let n: T = input
        .parse()
        .with_context(|| format!("`{input}` is not a valid number"))?;

    let mut array = ChannelArray::spawn(depth).await?;
    let product = array.compute(n).await?;
    println!("Fin: {n}! = {product}");

    array.shutdown().await?;
    Ok(())
}
