/// Preview: interactive storyboard shell for trying out stories and rules.
///
/// Usage: preview [--file <story.txt>] [--config <settings.ron>] [--rules <rules.ron>]...
///
/// Commands:
///   load <file>       load story text from a file
///   demo              load the bundled demo story
///   generate          build the storyboard from the loaded text
///   show              print the current frame
///   list              list all scenes
///   next / prev       step through scenes
///   goto <n>          jump to scene n (1-based)
///   play              play from the current scene at the configured pacing
///   stop              rewind to the first scene
///   narrate           print the narration request for the current scene
///   shotlist          print the shot list
///   json              print the JSON export
///   style <name>      set the presentation style
///   pacing <secs>     set seconds per scene
///   length <mode>     set scene length (short, medium, long)
///   reset             drop the storyboard
///   help              list commands
///   quit              exit
use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use storymode::cli::{init_tracing, LogArgs};
use storymode::core::demo::DEMO_STORY;
use storymode::core::pipeline::StoryboardEngine;
use storymode::core::session::{PlaybackState, Session};
use storymode::schema::settings::{SceneLength, Settings, Style};

#[derive(Parser, Debug)]
#[command(name = "preview")]
#[command(about = "Interactive storyboard preview shell", long_about = None)]
struct Args {
    /// Story text file to load at startup
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Settings file (RON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Extra visual rule file (RON), may be repeated
    #[arg(short, long)]
    rules: Vec<PathBuf>,

    #[command(flatten)]
    log: LogArgs,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log);

    let mut settings = match &args.config {
        Some(path) => Settings::load_from_ron(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => Settings::default(),
    };
    settings.rules.extend(args.rules.iter().cloned());

    let engine = StoryboardEngine::from_settings(&settings)?;
    println!("Loaded {} visual rules", engine.rules().len());

    let mut story = String::new();
    if let Some(path) = &args.file {
        story = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        println!("Loaded story from {} ({} chars)", path.display(), story.chars().count());
    }

    let mut session = Session::new(engine, settings);
    println!("Type 'help' for commands.\n");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("preview> ");
        stdout.flush().ok();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).is_err() || line.is_empty() {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (cmd, rest) = match line.split_once(char::is_whitespace) {
            Some((cmd, rest)) => (cmd.to_lowercase(), rest.trim()),
            None => (line.to_lowercase(), ""),
        };

        match cmd.as_str() {
            "quit" | "exit" | "q" => {
                println!("Goodbye.");
                break;
            }
            "help" | "h" | "?" => print_help(),
            "load" => {
                if rest.is_empty() {
                    println!("Usage: load <file>");
                    continue;
                }
                match std::fs::read_to_string(rest) {
                    Ok(text) => {
                        println!("Loaded file: {} ({} chars)", rest, text.chars().count());
                        story = text;
                    }
                    Err(e) => println!("ERROR: cannot read '{}': {}", rest, e),
                }
            }
            "demo" => {
                story = DEMO_STORY.to_string();
                println!("Demo story loaded.");
            }
            "generate" | "gen" => match session.generate(&story) {
                Ok(count) => {
                    println!("Generated {} scenes.", count);
                    print_frame(&session);
                }
                Err(e) => println!("ERROR: {}", e),
            },
            "show" => print_frame(&session),
            "list" => {
                if session.is_empty() {
                    println!("No storyboard yet.");
                }
                for sc in session.scenes() {
                    let marker = if sc.index == session.current_index() + 1 { '>' } else { ' ' };
                    println!("{} Scene {}: {}  [{}]", marker, sc.index, sc.title, sc.visual);
                    println!("    {}", sc.summary.replace('\n', " "));
                }
            }
            "next" | "n" => {
                session.next();
                print_frame(&session);
            }
            "prev" | "p" => {
                session.previous();
                print_frame(&session);
            }
            "goto" => match rest.parse::<usize>() {
                Ok(n) if n >= 1 => {
                    session.go_to(n - 1);
                    print_frame(&session);
                }
                _ => println!("Usage: goto <scene number>"),
            },
            "play" => play(&mut session),
            "stop" => {
                session.stop();
                print_frame(&session);
            }
            "narrate" => match session.narration(&[]) {
                Some(req) => {
                    println!("\n--- Narration (rate {:.2}) ---", req.rate);
                    println!("{}", req.text);
                    println!("--- End ---\n");
                }
                None => println!("Nothing to narrate. Generate scenes first."),
            },
            "shotlist" => {
                if session.is_empty() {
                    println!("No storyboard yet.");
                } else {
                    println!("{}", session.shot_list());
                }
            }
            "json" => match session.export_json() {
                Ok(json) => println!("{}", json),
                Err(e) => println!("ERROR: {}", e),
            },
            "style" => {
                if rest.is_empty() {
                    println!("Current style: {}", session.settings().style);
                    continue;
                }
                let settings = Settings {
                    style: Style::new(rest),
                    ..session.settings().clone()
                };
                apply(&mut session, settings);
            }
            "pacing" => match rest.parse::<f64>() {
                Ok(secs) => {
                    let settings = Settings {
                        pacing_seconds: secs,
                        ..session.settings().clone()
                    };
                    apply(&mut session, settings);
                }
                Err(_) => println!(
                    "Usage: pacing <seconds> (current: {})",
                    session.settings().pacing_seconds
                ),
            },
            "length" => {
                if rest.is_empty() {
                    println!("Current length: {}", session.settings().scene_length);
                    continue;
                }
                let settings = Settings {
                    scene_length: SceneLength::from_name(rest),
                    ..session.settings().clone()
                };
                apply(&mut session, settings);
                println!("Run 'generate' to re-split the story.");
            }
            "reset" => {
                session.reset();
                println!("Reset.");
            }
            _ => println!("Unknown command '{}'. Type 'help' for commands.", cmd),
        }
    }

    Ok(())
}

fn apply(session: &mut Session, settings: Settings) {
    match session.set_settings(settings) {
        Ok(()) => {
            let s = session.settings();
            println!(
                "Settings: style={} pacing={}s length={}",
                s.style, s.pacing_seconds, s.scene_length
            );
        }
        Err(e) => println!("ERROR: {}", e),
    }
}

/// Run playback to the end, sleeping one pacing interval per scene.
fn play(session: &mut Session) {
    if session.is_empty() {
        println!("Nothing to play. Generate scenes first.");
        return;
    }
    let interval = match session.settings().pacing_interval() {
        Ok(interval) => interval,
        Err(e) => {
            println!("Cannot play: {e}");
            return;
        }
    };
    session.play();
    print_frame(session);
    while session.playback() == PlaybackState::Playing {
        std::thread::sleep(interval);
        if session.tick() {
            print_frame(session);
        }
    }
    println!("(end of storyboard)");
}

fn print_frame(session: &Session) {
    let frame = session.frame();
    println!();
    println!("[{}]  {}", frame.style_tag, frame.meta);
    println!("  {}", frame.title);
    println!("  {}", frame.description);
    println!("  \"{}\"", frame.caption);
    println!();
}

fn print_help() {
    println!("Commands:");
    println!("  load <file>       Load story text from a file");
    println!("  demo              Load the bundled demo story");
    println!("  generate          Build the storyboard from the loaded text");
    println!("  show              Print the current frame");
    println!("  list              List all scenes");
    println!("  next / prev       Step through scenes");
    println!("  goto <n>          Jump to scene n");
    println!("  play              Play to the end at the configured pacing");
    println!("  stop              Rewind to the first scene");
    println!("  narrate           Print the narration for the current scene");
    println!("  shotlist          Print the shot list");
    println!("  json              Print the JSON export");
    println!("  style <name>      Set the presentation style");
    println!("  pacing <secs>     Set seconds per scene");
    println!("  length <mode>     Set scene length (short, medium, long)");
    println!("  reset             Drop the storyboard");
    println!("  help              Show this help");
    println!("  quit              Exit");
}
