use std::thread;
use std::time::{Duration, Instant};

use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use keyed_limiter::{FixedWindow, Limiter, TokenBucket};

/// Drive a limiter against one key on a fixed interval and print each decision.
#[derive(Debug, Parser)]
#[command(name = "limiter-demo", version, about)]
struct Args {
    /// Limiting algorithm
    #[arg(long, value_enum, default_value_t = Algorithm::TokenBucket)]
    algo: Algorithm,

    /// Rate limit key
    #[arg(long, default_value = "user:123")]
    key: String,

    /// Tokens per second (token-bucket)
    #[arg(long, default_value_t = 5.0)]
    rate: f64,

    /// Max burst tokens (token-bucket)
    #[arg(long, default_value_t = 10)]
    burst: u32,

    /// Max requests per window (fixed-window)
    #[arg(long, default_value_t = 10)]
    limit: u32,

    /// Window size in milliseconds (fixed-window)
    #[arg(long, default_value_t = 1000)]
    window_ms: u64,

    /// Delay between requests in milliseconds
    #[arg(long, default_value_t = 100)]
    interval_ms: u64,

    /// Number of requests to send
    #[arg(long, default_value_t = 50)]
    count: u32,

    /// Sleep for the reported retry-after when denied
    #[arg(long)]
    sleep_on_deny: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Algorithm {
    TokenBucket,
    FixedWindow,
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = Args::parse();
    let interval = Duration::from_millis(args.interval_ms);

    let limiter: Box<dyn Limiter> = match args.algo {
        Algorithm::TokenBucket => {
            let limiter = TokenBucket::new(args.rate, args.burst)?;
            println!(
                "demo: algo=token-bucket key={} rate={} burst={} interval={:?} count={}",
                args.key, args.rate, args.burst, interval, args.count
            );
            Box::new(limiter)
        }
        Algorithm::FixedWindow => {
            let window = Duration::from_millis(args.window_ms);
            let limiter = FixedWindow::new(args.limit, window)?;
            println!(
                "demo: algo=fixed-window key={} limit={} window={:?} interval={:?} count={}",
                args.key, args.limit, window, interval, args.count
            );
            Box::new(limiter)
        }
    };

    let start = Instant::now();
    let mut allowed_total = 0u32;
    for _ in 0..args.count {
        let elapsed_ms = start.elapsed().as_millis();
        let decision = limiter.allow(&args.key);
        if decision.allowed {
            allowed_total += 1;
            println!("{elapsed_ms:>7}ms  allowed   retry_after={:?}", decision.retry_after);
        } else {
            println!("{elapsed_ms:>7}ms  denied    retry_after={:?}", decision.retry_after);
            if args.sleep_on_deny {
                thread::sleep(decision.retry_after);
            }
        }
        thread::sleep(interval);
    }

    info!(
        allowed = allowed_total,
        denied = args.count - allowed_total,
        "Demo finished"
    );
    Ok(())
}
