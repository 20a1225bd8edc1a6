/// Preview — interactive shell for stepping through an album.
///
/// Usage: preview --album <path> [--config <path>] [--debug] [--verbose]
///
/// Commands:
///   next / prev                 — advance or retreat one panel
///   chapter <n>                 — jump to chapter n (1-based)
///   panel <n>                   — jump to panel n of the current chapter (1-based)
///   play                        — toggle playback
///   ended                       — simulate the chapter track finishing
///   volume <v>                  — set volume (0.0..1.0)
///   debug                       — toggle the debug overlay flag
///   effects [name]              — list every effect, or just the named one
///   status                      — show position and player state
///   help                        — list commands
///   quit                        — exit

use album_engine::core::effects::{Effect, EffectState};
use album_engine::core::engine::AlbumEngine;
use std::io::{self, BufRead, Write};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        print_usage();
        return;
    }

    let mut album_path = None;
    let mut config_path = None;
    let mut debug = false;
    let mut verbose = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--album" if i + 1 < args.len() => {
                i += 1;
                album_path = Some(args[i].clone());
            }
            "--config" if i + 1 < args.len() => {
                i += 1;
                config_path = Some(args[i].clone());
            }
            "--debug" => debug = true,
            "--verbose" | "-v" => verbose = true,
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    album_engine::logging::init(verbose);

    let Some(album_path) = album_path else {
        eprintln!("Missing --album <path>");
        print_usage();
        std::process::exit(1);
    };

    let mut builder = AlbumEngine::builder().content_path(&album_path);
    if let Some(ref path) = config_path {
        builder = builder.config_path(path);
    }
    if debug {
        builder = builder.debug_mode(true);
    }

    let mut engine = match builder.build() {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            std::process::exit(1);
        }
    };

    println!(
        "Loaded {} chapters, {} panels",
        engine.content().chapters.len(),
        engine.content().panel_count()
    );
    println!("Type 'help' for commands.\n");
    print_panel(&engine);

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("album> ");
        stdout.flush().ok();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).is_err() || line.is_empty() {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        let cmd = parts[0].to_lowercase();

        match cmd.as_str() {
            "quit" | "exit" | "q" => {
                println!("Goodbye.");
                break;
            }
            "help" | "h" | "?" => print_help(),
            "next" | "n" => {
                if engine.advance().moved() {
                    print_panel(&engine);
                } else {
                    println!("Already at the last panel.");
                }
            }
            "prev" | "p" => {
                if engine.retreat().moved() {
                    print_panel(&engine);
                } else {
                    println!("Already at the first panel.");
                }
            }
            "chapter" => match parse_ordinal(parts.get(1)) {
                Some(index) if index < engine.content().chapters.len() => {
                    engine.set_chapter(index);
                    print_panel(&engine);
                }
                _ => println!(
                    "Usage: chapter <1..{}>",
                    engine.content().chapters.len()
                ),
            },
            "panel" => {
                let len = engine.current_chapter().map_or(0, |c| c.panels.len());
                match parse_ordinal(parts.get(1)) {
                    Some(index) if index < len => {
                        engine.set_panel(index);
                        print_panel(&engine);
                    }
                    _ => println!("Usage: panel <1..{}>", len),
                }
            }
            "play" => {
                engine.toggle_play();
                print_audio(&engine);
            }
            "ended" => {
                engine.track_ended();
                print_audio(&engine);
            }
            "volume" => match parts.get(1).and_then(|v| v.parse::<f32>().ok()) {
                Some(volume) => {
                    engine.set_volume(volume);
                    print_audio(&engine);
                }
                None => println!("Usage: volume <0.0..1.0>"),
            },
            "debug" => {
                engine.toggle_debug();
                println!(
                    "Debug overlay: {} (debug mode {})",
                    on_off(engine.state().is_debug_visible()),
                    on_off(engine.state().is_debug_mode())
                );
            }
            "effects" => match parts.get(1) {
                None => print_effects(&engine),
                Some(name) => match Effect::from_name(name) {
                    Some(effect) => print_effect(effect, engine.effects().get(effect)),
                    None => println!("Unknown effect: '{}'", name),
                },
            },
            "status" => print_status(&engine),
            _ => {
                println!("Unknown command: '{}'. Type 'help' for available commands.", cmd);
            }
        }
    }
}

fn print_usage() {
    println!("Preview — interactive shell for stepping through an album.");
    println!();
    println!("Usage: preview --album <path> [--config <path>] [--debug] [--verbose]");
    println!();
    println!("  --album <path>   Album content RON file");
    println!("  --config <path>  Engine config RON file (optional)");
    println!("  --debug          Enable debug mode");
    println!("  --verbose        Log every transition");
}

fn print_help() {
    println!("Commands:");
    println!("  next | prev        Advance or retreat one panel");
    println!("  chapter <n>        Jump to chapter n (1-based)");
    println!("  panel <n>          Jump to panel n of the current chapter (1-based)");
    println!("  play               Toggle playback");
    println!("  ended              Simulate the chapter track finishing");
    println!("  volume <v>         Set volume (0.0..1.0)");
    println!("  debug              Toggle the debug overlay");
    println!("  effects [name]     List every effect, or just the named one");
    println!("  status             Show position and player state");
    println!("  help               Show this help");
    println!("  quit               Exit");
}

fn parse_ordinal(arg: Option<&&str>) -> Option<usize> {
    arg?.parse::<usize>().ok()?.checked_sub(1)
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "on"
    } else {
        "off"
    }
}

fn print_panel(engine: &AlbumEngine) {
    let (Some(chapter), Some(panel)) = (engine.current_chapter(), engine.current_panel()) else {
        println!("(empty album)");
        return;
    };
    let progress = engine.progress();

    println!(
        "\n--- Chapter {}: {} | Panel {}/{} ({} of {}) ---",
        chapter.number,
        chapter.title,
        engine.state().panel_index() + 1,
        chapter.panels.len(),
        progress.index + 1,
        progress.total
    );
    println!("{}", panel.title);
    println!("{}", panel.text);
    if let Some(ref quote) = panel.quote {
        println!("  \"{}\"", quote);
    }
    if let Some(ref after) = panel.text_after {
        println!("{}", after);
    }

    let visible: Vec<&str> = engine.effects().visible_effects().map(|e| e.name()).collect();
    if visible.is_empty() {
        println!("[Effects] none");
    } else {
        println!("[Effects] {}", visible.join(", "));
    }
    println!();
}

fn print_audio(engine: &AlbumEngine) {
    let cue = engine.audio_cue();
    println!(
        "[Audio] {} {} volume={:.2}",
        if cue.playing { "playing" } else { "paused" },
        cue.src.unwrap_or("(no track)"),
        cue.volume
    );
}

fn print_effects(engine: &AlbumEngine) {
    for (effect, state) in engine.effects().iter() {
        print_effect(effect, state);
    }
}

fn print_effect(effect: Effect, state: &EffectState) {
    if state.visible {
        println!(
            "  {:<13} intensity={:.2} color={} position={:?} rotate={} pulse={} opacity={:.2}",
            effect.name(),
            state.intensity,
            state.color,
            state.position,
            state.rotate,
            state.pulse,
            state.opacity
        );
    } else {
        println!("  {:<13} hidden", effect.name());
    }
}

fn print_status(engine: &AlbumEngine) {
    let state = engine.state();
    let (chapter, panel) = state.position();
    println!(
        "Position: chapter {} panel {} (first={} last={})",
        chapter + 1,
        panel + 1,
        engine.is_first(),
        engine.is_last()
    );
    print_audio(engine);
    println!(
        "Debug: mode {} overlay {}",
        on_off(state.is_debug_mode()),
        on_off(state.is_debug_visible())
    );
}
