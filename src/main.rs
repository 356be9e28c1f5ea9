use anyhow::{Context, Result, bail};
use clap::{CommandFactory, Parser};
use owo_colors::OwoColorize;
use signtext::cli::{Cli, Commands, ConfigAction};
use signtext::clock::{Clock, ManualClock};
use signtext::config::Config;
use signtext::gesture::{FrameInput, GestureType};
use signtext::output;
use signtext::pipeline::{ChannelSink, PipelineEvent, PipelineMode, SignPipeline};
use signtext::replay;
use signtext::text_to_sign::TextToSignTranslator;
use signtext::vocabulary::SignVocabulary;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    tracing::debug!(version = %signtext::version_string(), "signtext starting");

    if let Err(e) = run(cli) {
        eprintln!("{} {e:#}", "Error:".red().bold());
        std::process::exit(1);
    }
}

/// `-v` enables debug, `-vv` trace; `RUST_LOG` wins when set.
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "signtext=debug",
        _ => "signtext=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    match &cli.command {
        Commands::Replay { input, json } => {
            let config = load_config(&cli)?;
            run_replay(&config, input, *json, cli.quiet)
        }
        Commands::Live {
            once,
            continuous,
            json,
        } => {
            let config = load_config(&cli)?;
            let mode = if *continuous {
                PipelineMode::LiveContinuous
            } else {
                PipelineMode::LiveAccumulate
            };
            run_live(&config, mode, *once, *json, cli.quiet)
        }
        Commands::Gestures { gestures } => {
            let config = load_config(&cli)?;
            run_gestures(&config, gestures, cli.quiet)
        }
        Commands::Sign {
            text,
            bundled,
            json,
        } => {
            let config = load_config(&cli)?;
            let expand = config.translation.expand_fingerspelling && !*bundled;
            run_sign(&text.join(" "), expand, *json, cli.quiet)
        }
        Commands::Vocab { query, json } => list_vocabulary(query.as_deref(), *json),
        Commands::Config { action } => handle_config_command(action, &cli),
        Commands::Completions { shell } => {
            clap_complete::generate(*shell, &mut Cli::command(), "signtext", &mut std::io::stdout());
            Ok(())
        }
    }
}

fn config_path(cli: &Cli) -> Result<PathBuf> {
    match &cli.config {
        Some(path) => Ok(path.clone()),
        None => Ok(Config::default_path()?),
    }
}

/// File (or defaults), then environment, then command-line flags.
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default(&Config::default_path()?)?,
    }
    .with_env_overrides();

    if let Some(mode) = cli.mode {
        config.translation.mode = mode;
    }
    if let Some(timeout) = cli.word_timeout {
        config.sentence.word_timeout_secs = timeout.as_secs_f64();
    }
    if let Some(timeout) = cli.sentence_timeout {
        config.sentence.sentence_timeout_secs = timeout.as_secs_f64();
    }
    if let Some(confidence) = cli.min_confidence {
        config.aggregation.min_confidence = confidence;
    }

    config.validate()?;
    Ok(config)
}

fn print_json_event(event: &PipelineEvent) {
    match serde_json::to_string(event) {
        Ok(line) => println!("{line}"),
        Err(e) => tracing::warn!("Failed to serialize event: {e}"),
    }
}

fn attach_output<C: Clock + Clone>(pipeline: &mut SignPipeline<C>, json: bool, quiet: bool) {
    if json {
        pipeline.on_event(print_json_event);
    } else if !quiet {
        pipeline.on_event(output::render_event);
    }
}

fn run_replay(config: &Config, input: &Path, json: bool, quiet: bool) -> Result<()> {
    let reader = replay::open(input)?;
    let frames = replay::read_frames(reader)
        .with_context(|| format!("Failed to read recording {}", input.display()))?;
    tracing::debug!(frames = frames.len(), "Recording loaded");

    let mut pipeline = SignPipeline::with_clock(
        config.pipeline_config(),
        Arc::new(SignVocabulary::new()),
        ManualClock::new(),
    );
    attach_output(&mut pipeline, json, quiet);

    let outcome = replay::run(&mut pipeline, frames);
    if json {
        return Ok(());
    }

    output::clear_line();
    if outcome.translations.is_empty() {
        if !quiet {
            eprintln!(
                "{}",
                format!("No gestures recognized in {} frames", outcome.frames).yellow()
            );
        }
        return Ok(());
    }
    println!("{}", outcome.text());
    Ok(())
}

/// Reads frames from stdin on a separate thread and polls timeouts on a
/// ticker, so sentences complete even while no frames arrive.
fn run_live(config: &Config, mode: PipelineMode, once: bool, json: bool, quiet: bool) -> Result<()> {
    let (frame_tx, frame_rx) = crossbeam_channel::bounded::<signtext::Result<FrameInput>>(256);
    let reader = std::thread::Builder::new()
        .name("frame-reader".to_string())
        .spawn(move || {
            let stdin = std::io::stdin();
            for frame in replay::frame_lines(stdin.lock()) {
                if frame_tx.send(frame).is_err() {
                    break;
                }
            }
        })
        .context("Failed to start frame reader")?;

    let (event_tx, event_rx) = crossbeam_channel::unbounded();
    let mut pipeline = SignPipeline::new(config.pipeline_config());
    pipeline.add_sink(Box::new(ChannelSink::new(event_tx)));

    let ticker = crossbeam_channel::tick(config.poll_interval());
    let show = |event: &PipelineEvent| -> bool {
        if json {
            print_json_event(event);
        } else if !quiet {
            output::render_event(event);
        }
        match event {
            PipelineEvent::TranslationComplete(result) => {
                if !json {
                    output::render_translation(result, true);
                }
                true
            }
            _ => false,
        }
    };

    if !quiet && !json {
        eprintln!("{}", "Reading frames from stdin (Ctrl-D to finish)".dimmed());
    }
    pipeline.start(mode);

    loop {
        crossbeam_channel::select! {
            recv(frame_rx) -> message => match message {
                Ok(Ok(frame)) => {
                    if !pipeline.state().is_processing {
                        pipeline.start(mode);
                    }
                    pipeline.process_frame(frame);
                }
                Ok(Err(e)) => tracing::warn!("Skipping frame: {e}"),
                Err(_) => break,
            },
            recv(ticker) -> _ => {
                pipeline.check_timeouts();
            }
        }

        let completed = event_rx.try_iter().fold(false, |done, event| show(&event) || done);
        if completed && once {
            tracing::debug!("First sentence complete, exiting");
            return Ok(());
        }
    }

    pipeline.stop_and_translate();
    for event in event_rx.try_iter() {
        show(&event);
    }
    if reader.join().is_err() {
        bail!("Frame reader thread panicked");
    }
    Ok(())
}

fn run_gestures(config: &Config, gestures: &[(String, f32)], quiet: bool) -> Result<()> {
    let mut pipeline = SignPipeline::new(config.pipeline_config());
    attach_output(&mut pipeline, false, quiet);
    pipeline.start(PipelineMode::LiveAccumulate);

    for (label, confidence) in gestures {
        if pipeline
            .process_gesture(label, *confidence, GestureType::Static)
            .is_none()
            && !quiet
        {
            eprintln!(
                "{}",
                format!("Ignored {label} ({:.0}%)", confidence * 100.0).yellow()
            );
        }
    }

    let result = pipeline.stop_and_translate();
    output::render_translation(&result, quiet);
    Ok(())
}

fn run_sign(text: &str, expand: bool, json: bool, quiet: bool) -> Result<()> {
    let translator = TextToSignTranslator::new(Arc::new(SignVocabulary::new()));
    let result = translator.translate(text, expand);
    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        output::render_sign_sequence(&result, quiet);
    }
    Ok(())
}

fn list_vocabulary(query: Option<&str>, json: bool) -> Result<()> {
    let vocabulary = SignVocabulary::new();
    let signs = match query {
        Some(query) => vocabulary.search(query),
        None => vocabulary.iter().collect(),
    };

    if json {
        let mut exported = vocabulary.export();
        exported.retain(|id, _| signs.iter().any(|s| &s.id == id));
        println!("{}", serde_json::to_string_pretty(&exported)?);
        return Ok(());
    }

    if signs.is_empty() {
        eprintln!("No signs match");
        return Ok(());
    }

    let mut by_category: BTreeMap<&str, Vec<_>> = BTreeMap::new();
    for sign in &signs {
        by_category.entry(sign.category.as_str()).or_default().push(*sign);
    }
    for (category, signs) in by_category {
        println!("{}", category.bold());
        for sign in signs {
            let dynamic = if sign.is_dynamic { " (dynamic)" } else { "" };
            println!(
                "  {:<18} {}{}  {}",
                sign.id,
                sign.display_text,
                dynamic.yellow(),
                sign.gesture_labels.join(", ").dimmed()
            );
        }
    }
    Ok(())
}

fn handle_config_command(action: &ConfigAction, cli: &Cli) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let config = load_config(cli)?;
            print!("{}", config.to_toml()?);
        }
        ConfigAction::Path => {
            let path = config_path(cli)?;
            let marker = if path.exists() { "" } else { " (not created)" };
            println!("{}{}", path.display(), marker.dimmed());
        }
        ConfigAction::Init { force } => {
            let path = config_path(cli)?;
            if path.exists() && !force {
                bail!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                );
            }
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            std::fs::write(&path, Config::default().to_toml()?)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("{} {}", "Wrote".green(), path.display());
        }
    }
    Ok(())
}
