use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info};
mod config;
mod error;
mod model;
mod services;
mod utils;

use config::Config;
use model::MetadataRecord;
use services::{create_selection_detector, MetadataExtractor, PopupPresenter};

#[derive(Parser, Debug)]
#[command(name = "file-stats")]
#[command(about = "Показывает метаданные файла, выделенного в файловом менеджере")]
struct Args {
    /// Файл для анализа (без него файл определяется автоматически)
    path: Option<PathBuf>,

    /// Путь к файлу конфигурации
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Уровень логирования (перекрывает конфигурацию)
    #[arg(long)]
    log_level: Option<String>,

    /// Вывести метаданные в stdout в формате JSON вместо окна
    #[arg(long)]
    print: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<ExitCode> {
    let config = Config::load(args.config.as_deref())?;

    let level = args.log_level.as_deref().unwrap_or(&config.logging.level);
    init_tracing(level, &config.logging.format)?;

    info!("Запуск file-stats v{}", env!("CARGO_PKG_VERSION"));

    // Всё асинхронное заканчивается до запуска главного цикла GTK
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let record = runtime.block_on(collect(&args, &config));
    drop(runtime);

    let Some(record) = record else {
        info!("Выделенный файл не найден, выходим");
        return Ok(ExitCode::SUCCESS);
    };

    debug!("Собрано полей: {}", record.len());
    if record.is_empty() {
        return Ok(ExitCode::SUCCESS);
    }

    if args.print {
        println!("{}", serde_json::to_string_pretty(&record)?);
        return Ok(ExitCode::SUCCESS);
    }

    let code = PopupPresenter::new(config.popup.clone()).present(&record);
    debug!("GTK завершился с кодом {:?}", code);
    Ok(if code == gtk4::glib::ExitCode::SUCCESS {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

async fn collect(args: &Args, config: &Config) -> Option<MetadataRecord> {
    let path = match &args.path {
        Some(path) => path.clone(),
        None => create_selection_detector(&config.detection)
            .selected_file()
            .await?,
    };

    info!("Анализируем {}", path.display());
    Some(MetadataExtractor::new(config.probe.clone()).extract(&path).await)
}

fn init_tracing(level: &str, format: &str) -> Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))?;

    // stdout занят выводом --print
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        "pretty" => registry.with(fmt_layer.pretty()).try_init()?,
        _ => registry.with(fmt_layer.compact()).try_init()?,
    }

    Ok(())
}
