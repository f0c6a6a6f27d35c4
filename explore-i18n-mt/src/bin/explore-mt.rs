use clap::{Arg, Command};
use explore_i18n::{CorrectionPipeline, is_default_language, load_pipeline};
use explore_i18n_mt::{
    GatewayClient, GatewayConfig, MockMode, MockTranslator, TranslationCache, TranslationGateway,
    TranslationSource,
};
use std::path::Path;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = Command::new("explore-mt")
        .version("0.1.0")
        .about("Translate portal text through the Explore Maharashtra translation gateway")
        .arg(
            Arg::new("text")
                .help("English text to translate")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("target-lang")
                .help("Target language code (e.g., mr, hi)")
                .required(true)
                .index(2),
        )
        .arg(
            Arg::new("mock")
                .long("mock")
                .short('m')
                .help("Use mock providers instead of MyMemory / LibreTranslate")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("gateway")
                .long("gateway")
                .short('g')
                .help("Base URL of a running gateway (e.g., http://127.0.0.1:3000)"),
        )
        .arg(
            Arg::new("corrections")
                .long("corrections")
                .short('c')
                .help("JSON correction table replacing the built-in Marathi one"),
        )
        .arg(
            Arg::new("raw")
                .long("raw")
                .short('r')
                .help("Print the provider output without corrections")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log gateway activity")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let text = matches
        .get_one::<String>("text")
        .map(String::as_str)
        .unwrap_or_default();
    let target_lang = matches
        .get_one::<String>("target-lang")
        .map(String::as_str)
        .unwrap_or_default();
    let verbose = matches.get_flag("verbose");

    let default_directive = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_directive)),
        )
        .with_writer(std::io::stderr)
        .init();

    if is_default_language(target_lang) {
        println!("{}", text);
        return Ok(());
    }

    let config = GatewayConfig::from_env()?;
    let gateway_url = matches.get_one::<String>("gateway");
    let source: Arc<dyn TranslationSource> = if let Some(base) = gateway_url {
        Arc::new(GatewayClient::new(base, config.request_timeout_secs)?)
    } else if matches.get_flag("mock") {
        Arc::new(TranslationGateway::new(
            config,
            Arc::new(MockTranslator::new(MockMode::Suffix)),
            Arc::new(MockTranslator::new(MockMode::NoOp)),
            Arc::new(TranslationCache::new()),
        ))
    } else {
        Arc::new(TranslationGateway::from_config(config)?)
    };

    let pipeline = match matches.get_one::<String>("corrections") {
        Some(path) => load_pipeline(target_lang, Path::new(path))?,
        None => CorrectionPipeline::marathi(),
    };

    let translated = match source.fetch_translation(text, target_lang).await {
        Ok(translated) => translated,
        Err(e) => {
            eprintln!("❌ Translation failed: {}", e);
            return Err(e.into());
        }
    };

    if verbose {
        eprintln!("🌍 {} → {}", text, translated);
    }

    if matches.get_flag("raw") {
        println!("{}", translated);
    } else {
        println!("{}", pipeline.apply(target_lang, &translated));
    }

    Ok(())
}
