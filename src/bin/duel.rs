//! Run a self-play duel from the command line.
//!
//! ```text
//! RUST_LOG=connect_mana=debug cargo run --features cli --bin duel -- --size 7 --win-length 4
//! ```

use std::time::Duration;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use connect_mana::games::{DuelBuilder, DuelResult};
use connect_mana::policy::PolicyConfig;

#[derive(Parser, Debug)]
#[command(author, version, about = "Self-play connect-N duel with effect cards", long_about = None)]
struct Args {
    /// Board width and height
    #[arg(long, default_value_t = 5)]
    size: usize,

    /// Marks in a row needed to win
    #[arg(short, long, default_value_t = 4)]
    win_length: usize,

    /// Mana cap per side
    #[arg(long, default_value_t = 10)]
    max_mana: u32,

    /// Mana gained each turn
    #[arg(long, default_value_t = 2)]
    regen: u32,

    /// Cards held after each refill
    #[arg(long, default_value_t = 5)]
    hand_size: usize,

    /// Shuffle seed
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Turn limit before declaring a draw
    #[arg(long, default_value_t = 200)]
    max_turns: usize,

    /// Pause before each decision, in milliseconds
    #[arg(long, default_value_t = 0)]
    delay_ms: u64,

    /// Never use destroy cards to stop a threat
    #[arg(long)]
    no_destroy_blocks: bool,

    /// Print the board after every turn
    #[arg(long)]
    show: bool,
}

fn main() -> connect_mana::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let policy = PolicyConfig::default().with_destroy_blocks_threats(!args.no_destroy_blocks);

    let mut duel = DuelBuilder::new()
        .size(args.size)
        .win_length(args.win_length)
        .max_mana(args.max_mana)
        .mana_regen(args.regen)
        .hand_size(args.hand_size)
        .seed(args.seed)
        .thinking_delay(Duration::from_millis(args.delay_ms))
        .policy(policy)
        .build()?;

    for _ in 0..args.max_turns {
        let Some(outcome) = duel.play_turn()? else {
            break;
        };
        if args.show {
            match &outcome.decision {
                Some(d) => println!("turn {} {}: {:?} at {}", outcome.turn, outcome.side, d.reason, d.cell),
                None => println!("turn {} {}: pass", outcome.turn, outcome.side),
            }
            println!("{}", duel.board());
        }
    }

    let result = duel.run(0)?;
    match result {
        DuelResult::Winner(side) => println!("{side} wins after {} turns", duel.turn()),
        DuelResult::Draw => println!("draw after {} turns", duel.turn()),
    }
    info!(?result, "done");
    Ok(())
}
