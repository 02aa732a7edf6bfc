//! Developer utility that analyses a generated VOR trial and prints the result.

use std::path::PathBuf;

use vor_analysis::{
    AnalysisConfig, AnalysisWindow, TestSubtype, logging,
    report::{TrialSummary, saccade_markers},
    synth::{SaccadeInjection, SyntheticTrial},
};

fn main() {
    if let Err(err) = logging::init() {
        eprintln!("Logging disabled: {err}");
    }
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

struct CliOptions {
    trial: SyntheticTrial,
    subtype: TestSubtype,
    config_path: Option<PathBuf>,
    window: Option<(f64, f64)>,
    json: bool,
}

fn run() -> Result<(), String> {
    let Some(options) = parse_args(std::env::args().skip(1).collect())? else {
        return Ok(());
    };
    let config = match &options.config_path {
        Some(path) => AnalysisConfig::load(path).map_err(|err| err.to_string())?,
        None => AnalysisConfig::default(),
    };
    let trial = SyntheticTrial {
        sample_rate_hz: config.sample_rate_hz,
        ..options.trial
    };
    let mut trace = trial.build().map_err(|err| err.to_string())?;
    if let Some((start, end)) = options.window {
        trace = trace.window(&AnalysisWindow::new(start, end)).normalized();
    }
    let metrics = trace.analyze(options.subtype, &config);

    if options.json {
        let text = serde_json::to_string_pretty(&metrics).map_err(|err| err.to_string())?;
        println!("{text}");
        return Ok(());
    }
    println!("Trial: {} | {} samples", options.subtype, trace.len());
    println!("{}", TrialSummary::new(&trace, &metrics));
    let markers = saccade_markers(
        trace.time(),
        trace.eye(),
        &metrics.saccades.saccade_timestamps,
    );
    if !markers.is_empty() {
        println!();
        println!("Saccades:");
        for marker in markers {
            println!("- {:.3} s at {:.1} °/s", marker.time, marker.eye_velocity);
        }
    }
    Ok(())
}

fn parse_args(args: Vec<String>) -> Result<Option<CliOptions>, String> {
    let mut trial = SyntheticTrial::default();
    let mut subtype = TestSubtype::Vvor;
    let mut config_path = None;
    let mut window = None;
    let mut json = false;
    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "-h" | "--help" => {
                println!("{}", help_text());
                return Ok(None);
            }
            "--frequency" => trial.frequency_hz = parse_number(&args, &mut idx, "--frequency")?,
            "--amplitude" => trial.amplitude = parse_number(&args, &mut idx, "--amplitude")?,
            "--gain" => trial.gain = parse_number(&args, &mut idx, "--gain")?,
            "--seconds" => trial.duration_seconds = parse_number(&args, &mut idx, "--seconds")?,
            "--saccades" => {
                let peak = parse_number(&args, &mut idx, "--saccades")?;
                trial.saccades = Some(SaccadeInjection {
                    left_latencies: vec![20, 30, 40, 50, 60],
                    right_latencies: vec![30, 35, 40],
                    ..SaccadeInjection::fixed(peak, 30)
                });
            }
            "--subtype" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| "--subtype requires a value".to_string())?;
                subtype = value.parse().map_err(|err: vor_analysis::TraceError| err.to_string())?;
            }
            "--window" => {
                let start = parse_number(&args, &mut idx, "--window")?;
                let end = parse_number(&args, &mut idx, "--window")?;
                window = Some((start, end));
            }
            "--config" => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| "--config requires a value".to_string())?;
                config_path = Some(PathBuf::from(value));
            }
            "--json" => json = true,
            unknown => return Err(format!("Unknown argument: {unknown}\n\n{}", help_text())),
        }
        idx += 1;
    }
    Ok(Some(CliOptions {
        trial,
        subtype,
        config_path,
        window,
        json,
    }))
}

fn parse_number(args: &[String], idx: &mut usize, flag: &str) -> Result<f64, String> {
    *idx += 1;
    let value = args
        .get(*idx)
        .ok_or_else(|| format!("{flag} requires a value"))?;
    value
        .parse::<f64>()
        .map_err(|err| format!("Invalid value for {flag}: {value} ({err})"))
}

fn help_text() -> String {
    [
        "vor-synth",
        "",
        "Usage:",
        "  vor-synth [--frequency <hz>] [--amplitude <deg/s>] [--gain <ratio>] [--seconds <s>]",
        "            [--saccades <peak deg/s>] [--subtype <vvor|vors>] [--window <start> <end>]",
        "            [--config <analysis.toml>] [--json]",
    ]
    .join("\n")
}
