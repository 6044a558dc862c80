use clap::Parser;
use env_logger::Env;
use fibo::GenerateArgs;
use std::io;

#[derive(Parser)]
#[command(version, about = "Print the Fibonacci sequence up to a bound", long_about = None)]
struct Cli {
    #[command(flatten)]
    args: GenerateArgs,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let stdout = io::stdout();
    fibo::run(&cli.args, &mut stdout.lock())
}
