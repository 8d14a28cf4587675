//! hand_player — demo gesture playback entry point.

use std::io;
use std::path::Path;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use hand_player::config::load_calibration;
use hand_player::library::demo_program;
use hand_player::{DryRunChannel, Playback, Player};
use hand_pose::{AddressTable, CalibrationProfile, ServoChannel};

fn main() {
    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║        Hand Player — Two-Handed Gripper Gesture Demo         ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    #[cfg(feature = "scs")]
    println!("  Built with the SCS0009 serial backend (--port to use it)");
    #[cfg(not(feature = "scs"))]
    println!("  Dry-run build  (rebuild with --features scs for hardware)");
    println!();

    let args = Args::parse();

    // ── calibration ───────────────────────────────────────────────────────
    let cal = match &args.cal_path {
        Some(path) => match load_calibration(Path::new(path)) {
            Ok(cal) => {
                println!("  Calibration: {}", path);
                cal
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
        None => {
            println!("  Calibration: built-in demo offsets");
            CalibrationProfile::demo()
        }
    };

    // ── program + playback (fails fast on config mismatch) ───────────────
    let playback = match Playback::new(demo_program(), AddressTable::amazing_hand(), cal) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    // ── channel ───────────────────────────────────────────────────────────
    let channel: Box<dyn ServoChannel> = match &args.port {
        Some(port) => open_hardware(port, args.baud),
        None => {
            println!("  Channel: dry run (writes are printed, nothing moves)");
            Box::new(DryRunChannel::new())
        }
    };

    println!();
    println!("  Playing the demo routine.  Press Enter to stop.");
    println!();

    let player = Player::spawn(playback, channel);

    // Enter on stdin requests the stop; events print in the meantime.
    let (quit_tx, quit_rx) = mpsc::channel::<()>();
    thread::spawn(move || {
        let mut buf = String::new();
        let _ = io::stdin().read_line(&mut buf);
        let _ = quit_tx.send(());
    });

    loop {
        for ev in player.drain_events() {
            println!(
                "  ▸ {:<18} step {:<2} ({} servos, hold {:?})",
                ev.gesture,
                ev.step,
                ev.commands,
                ev.hold
            );
        }
        if quit_rx.try_recv().is_ok() {
            player.stop();
            break;
        }
        if player.is_finished() {
            break;
        }
        thread::sleep(Duration::from_millis(50));
    }

    match player.join() {
        (state, Ok(())) => println!("\n  Stopped cleanly ({:?}).", state),
        (state, Err(e)) => {
            eprintln!("\nError: playback {:?}: {}", state, e);
            std::process::exit(1);
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Argument parsing — deliberately plain; a launcher concern, not the core's
// ════════════════════════════════════════════════════════════════════════════

struct Args {
    cal_path: Option<String>,
    port: Option<String>,
    baud: u32,
}

impl Args {
    fn parse() -> Args {
        let mut args = Args { cal_path: None, port: None, baud: 1_000_000 };
        let mut iter = std::env::args().skip(1);
        while let Some(flag) = iter.next() {
            match flag.as_str() {
                "--cal" => args.cal_path = iter.next(),
                "--port" => args.port = iter.next(),
                "--baud" => {
                    args.baud = iter
                        .next()
                        .and_then(|b| b.parse().ok())
                        .unwrap_or(1_000_000);
                }
                "--help" | "-h" => {
                    println!("usage: hand_player [--cal FILE] [--port DEV] [--baud N]");
                    std::process::exit(0);
                }
                other => {
                    eprintln!("unknown flag `{}` (try --help)", other);
                    std::process::exit(2);
                }
            }
        }
        args
    }
}

#[cfg(feature = "scs")]
fn open_hardware(port: &str, baud: u32) -> Box<dyn ServoChannel> {
    use hand_player::scs::{ScsChannel, DEFAULT_TIMEOUT};
    match ScsChannel::open(port, baud, DEFAULT_TIMEOUT) {
        Ok(ch) => {
            println!("  Channel: SCS bus on {} at {} baud", port, baud);
            Box::new(ch)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(not(feature = "scs"))]
fn open_hardware(_port: &str, _baud: u32) -> Box<dyn ServoChannel> {
    eprintln!("Error: built without the `scs` feature; rebuild with --features scs");
    std::process::exit(1);
}
