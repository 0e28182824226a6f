use clap::Parser;
use kappa::AnimationConfig;
use std::panic;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// A kappa strolling through the tide in your terminal.
#[derive(Parser, Debug)]
#[command(name = "kappa", version, about, long_about = None)]
struct Args {
    /// Define the message that the kappa speaks.
    #[arg(short, long, default_value = kappa::config::DEFAULT_MESSAGE)]
    message: String,

    /// Seed for cloud and wave placement (random when omitted).
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> ExitCode {
    match try_main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // The terminal is already restored here, so this lands on the main screen.
            println!("Animation error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn try_main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing()?;
    install_panic_hook();

    let config = AnimationConfig {
        seed: args.seed,
        ..AnimationConfig::with_message(args.message)
    };
    kappa::run(&config)?;
    Ok(())
}

/// Logging is off unless `RUST_LOG` asks for it. It goes to stderr, so
/// redirect stderr to a file to read it while the animation owns the screen.
fn init_tracing() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off"));
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .try_init()?;
    Ok(())
}

/// Release builds abort on panic and skip destructors, so put the terminal
/// back before the panic message is printed.
fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        kappa::terminal::restore_terminal();
        original_hook(info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_default_message() {
        let args = Args::try_parse_from(["kappa"]).unwrap();
        assert_eq!(args.message, "Hello!");
        assert_eq!(args.seed, None);
    }

    #[test]
    fn test_args_message_and_seed() {
        let args = Args::try_parse_from(["kappa", "-m", "Kyuu!", "--seed", "7"]).unwrap();
        assert_eq!(args.message, "Kyuu!");
        assert_eq!(args.seed, Some(7));

        let args = Args::try_parse_from(["kappa", "--message", "Hi there"]).unwrap();
        assert_eq!(args.message, "Hi there");
    }

    #[test]
    fn test_args_reject_bad_seed() {
        assert!(Args::try_parse_from(["kappa", "--seed", "soon"]).is_err());
    }
}
