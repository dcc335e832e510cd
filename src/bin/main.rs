use braille_core::logging::init_tracing;
use braille_core::{AutocorrectEngine, EngineConfig, LoadStatus, Suggestion};
use clap::Parser;
use crossterm::style::Stylize;
use std::io::{self, stdin, stdout, BufRead, ErrorKind, Write};
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Instant;

const DEMO_CASES: &[(&str, &str)] = &[
    ("D", "A"),
    ("DW", "B"),
    ("DK", "C"),
    ("D W Q", "THE"),
    ("DW DKO", "Suggestions for 'B' + complex pattern"),
    ("DWQK", "Complex single character"),
];

/// Six-key braille autocorrect REPL.
#[derive(Parser, Debug)]
#[command(name = "braille_repl", version)]
struct Args {
    /// JSON dictionary: an array of words or an object of word -> frequency.
    #[arg(long)]
    dictionary: Option<PathBuf>,

    /// Learning data loaded at start and saved on exit.
    #[arg(long)]
    learning_data: Option<PathBuf>,

    /// Write the word frequency table here on exit.
    #[arg(long)]
    export_dictionary: Option<PathBuf>,

    /// JSON engine config; missing keys keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, default_value_t = 5)]
    max_suggestions: usize,

    /// Run the worked examples before the interactive session.
    #[arg(long)]
    demo: bool,

    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = match &args.config {
        Some(path) => EngineConfig::from_json_file(path).unwrap_or_else(|e| {
            eprintln!("[ERROR] Could not read config '{}': {}", path.display(), e);
            EngineConfig::default()
        }),
        None => EngineConfig::default(),
    };

    let mut engine = match &args.dictionary {
        Some(path) => {
            let (engine, status) = AutocorrectEngine::from_dictionary_file(path, config);
            if let LoadStatus::SeedFallback { reason } = status {
                eprintln!("[ERROR] Error loading dictionary: {}. Using default words.", reason);
            }
            engine
        }
        None => AutocorrectEngine::with_config(config),
    };

    if let Some(path) = &args.learning_data {
        if path.exists() {
            if let Err(e) = engine.load_learning_data(path) {
                eprintln!("[ERROR] Error loading learning data: {}", e);
            }
        }
    }

    println!("{}", "Braille Autocorrect System".bold());
    println!("---------------------------------------------------------------");

    if args.demo {
        run_demo(&mut engine);
    }

    let (tx, events) = mpsc::channel();
    install_interrupt_handler(tx.clone());
    spawn_input(tx);
    // Every way out of the session falls through to the saves below.
    run_session(&mut engine, args.max_suggestions, &events);

    if let Some(path) = &args.learning_data {
        if let Err(e) = engine.save_learning_data(path) {
            eprintln!("[ERROR] Could not save learning data: {}", e);
        } else {
            println!("Learning data saved to '{}'", path.display());
        }
    }
    if let Some(path) = &args.export_dictionary {
        if let Err(e) = engine.save_dictionary_file(path) {
            eprintln!("[ERROR] Could not save dictionary: {}", e);
        } else {
            println!("Dictionary saved to '{}'", path.display());
        }
    }

    print_statistics(&engine);
}

fn run_demo(engine: &mut AutocorrectEngine) {
    println!("Testing Braille Pattern Recognition:\n");
    for (input, expected) in DEMO_CASES {
        let suggestions = engine.get_suggestions(input, 3);
        println!("Input: '{}'", input);
        println!("Expected: {}", expected);
        print_suggestions(&suggestions);
        println!();
    }
}

/// What the session loop can receive: a line, or the reason input stopped.
#[derive(Debug)]
enum SessionEvent {
    Line(String),
    Closed,
    Interrupted,
    Failed(io::Error),
}

/// Reads stdin on its own thread so Ctrl-C can wake a blocked prompt.
fn spawn_input(tx: Sender<SessionEvent>) {
    thread::spawn(move || {
        let mut lines = stdin().lock();
        loop {
            let mut line = String::new();
            let event = match lines.read_line(&mut line) {
                Ok(0) => SessionEvent::Closed,
                Ok(_) => SessionEvent::Line(line),
                Err(e) if e.kind() == ErrorKind::InvalidData => {
                    eprintln!("[ERROR] {}", e);
                    SessionEvent::Line(String::new())
                }
                Err(e) => SessionEvent::Failed(e),
            };
            let last = !matches!(event, SessionEvent::Line(_));
            if tx.send(event).is_err() || last {
                break;
            }
        }
    });
}

fn install_interrupt_handler(tx: Sender<SessionEvent>) {
    if let Err(e) = ctrlc::set_handler(move || {
        let _ = tx.send(SessionEvent::Interrupted);
    }) {
        eprintln!("[ERROR] Could not install Ctrl-C handler: {}", e);
    }
}

fn run_session(engine: &mut AutocorrectEngine, max_suggestions: usize, events: &Receiver<SessionEvent>) {
    println!("Interactive Mode (type 'quit', press Ctrl-D or Ctrl-C to exit):");
    println!("Enter chords separated by spaces, e.g. 'D' for A, 'DW' for B, 'D DW Q'.\n");

    loop {
        let Some(input) = prompt(events, "Braille Input: ") else { break };
        let input = input.trim();
        if input.eq_ignore_ascii_case("quit") {
            break;
        }
        if input.is_empty() {
            continue;
        }

        let started = Instant::now();
        let suggestions = engine.get_suggestions(input, max_suggestions);
        let elapsed = started.elapsed();

        println!("Suggestions (processed in {:.2}ms):", elapsed.as_secs_f64() * 1000.0);
        print_suggestions(&suggestions);

        if !suggestions.is_empty() {
            let Some(answer) = prompt(events, "Was suggestion correct? (y/n/word): ") else { break };
            let answer = answer.trim();
            let lower = answer.to_lowercase();
            if !matches!(lower.as_str(), "y" | "yes" | "" | "n" | "no") && engine.learn_correction(input, answer) {
                println!("{}", format!("Learned: '{}' -> '{}'", input, answer.to_uppercase()).green());
            }
        }
        println!();
    }
}

/// Prints `label` and waits for the next line. `None` ends the session:
/// end of input, Ctrl-C, or a read error, each reported here.
fn prompt(events: &Receiver<SessionEvent>, label: &str) -> Option<String> {
    print!("{}", label.bold());
    if let Err(e) = stdout().flush() {
        eprintln!("[ERROR] Could not flush output: {}", e);
    }
    match events.recv() {
        Ok(SessionEvent::Line(line)) => Some(line),
        Ok(SessionEvent::Closed) | Err(_) => None,
        Ok(SessionEvent::Interrupted) => {
            println!("\n{}", "Interrupted.".dark_grey());
            None
        }
        Ok(SessionEvent::Failed(e)) => {
            eprintln!("\n[ERROR] Could not read input: {}", e);
            None
        }
    }
}

fn print_suggestions(suggestions: &[Suggestion]) {
    if suggestions.is_empty() {
        println!("  {}", "No suggestions found.".dark_grey());
        return;
    }
    for (i, suggestion) in suggestions.iter().enumerate() {
        println!(
            "  {}. {} (confidence: {:.3})",
            i + 1,
            suggestion.word.as_str().cyan(),
            suggestion.score
        );
    }
}

fn print_statistics(engine: &AutocorrectEngine) {
    let stats = engine.statistics();
    println!("\n{}", "System Statistics:".bold());
    println!("  dictionary_size: {}", stats.dictionary_size);
    println!("  cache_size: {}", stats.cache_size);
    println!("  learned_corrections: {}", stats.learned_corrections);
    println!("  total_word_frequency: {}", stats.total_word_frequency);
    println!("  fuzzy_searches: {}", stats.fuzzy_searches);
}
