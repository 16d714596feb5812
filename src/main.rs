use std::io::{self, BufRead, Write};
use std::sync::mpsc::channel;
use std::thread;
use std::time::Duration;

use tempo_chess::cli::repl::Repl;
use tempo_chess::session::game_session::{GameSession, SessionConfig};
use tempo_chess::suggestion::orchestrator::{SuggestionConfig, SuggestionOrchestrator};

fn main() {
    tracing_subscriber::fmt::init();

    let (command_tx, command_rx) = channel::<String>();
    let (output_tx, output_rx) = channel::<String>();

    // Spawn stdin reader thread
    thread::spawn(move || {
        let stdin = io::stdin();
        let mut stdin_lock = stdin.lock();
        let mut input = String::new();

        loop {
            input.clear();
            match stdin_lock.read_line(&mut input) {
                Ok(0) | Err(_) => {
                    // End of input plays as a quit
                    let _ = command_tx.send("quit".to_string());
                    break;
                }
                Ok(_) => {
                    let trimmed = input.trim_end().to_string();
                    if !trimmed.is_empty() && command_tx.send(trimmed).is_err() {
                        break;
                    }
                }
            }
        }
    });

    // Spawn printer thread
    thread::spawn(move || loop {
        while let Ok(line) = output_rx.try_recv() {
            println!("{}", line);
            io::stdout().flush().ok();
        }
        thread::sleep(Duration::from_millis(10));
    });

    let session = GameSession::new(SessionConfig::default());
    let orchestrator = SuggestionOrchestrator::local_random(SuggestionConfig::default());
    let mut repl = Repl::new(session, orchestrator, command_rx, output_tx);
    repl.greet();

    while repl.is_running() {
        repl.tick();
        // Sleep briefly to avoid busy-waiting
        thread::sleep(Duration::from_millis(10));
    }

    // Let the printer thread flush the goodbye line
    thread::sleep(Duration::from_millis(50));
}
