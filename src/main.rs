use app::App;
use asset_fetcher::impl_http::AssetFetcherHttp;
use assets::store::AssetStore;
use config::Config;
use image_classifier::impl_tract_onnx::LayeredModelLoader;
use image_classifier::impl_tract_tensorflow::FrozenGraphLoader;
use labels::impl_slim_imagenet::SlimImagenetLabels;
use library::logger::impl_console::LoggerConsole;
use library::logger::interface::Logger;
use results::write_results;
use std::process::ExitCode;
use std::sync::Arc;

mod app;
mod asset_fetcher;
mod assets;
mod comparator;
mod config;
mod image_classifier;
mod labels;
mod library;
mod preprocess;
mod results;

/// Runs the configured variants and writes `test_results.p`.
///
/// The layered path expects an ONNX export of the Keras MobileNetV2 at
/// `models/layered/mobilenet_v2_{alpha}_{rows}.onnx` unless
/// `Config::layered_model_base_url` points at a host serving it.
fn run(
    config: &Config,
    logger: Arc<dyn Logger + Send + Sync>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let fetcher = Arc::new(AssetFetcherHttp::new(logger.clone())?);

    let store = Arc::new(AssetStore::new(config, fetcher, logger.clone()));
    store.prepare()?;

    let labels = Arc::new(SlimImagenetLabels::load(&store, &config.labels)?);

    let layered = Box::new(LayeredModelLoader::new(
        store.clone(),
        config.layered_model_base_url.clone(),
        logger.clone(),
    ));

    let frozen_graph = Box::new(FrozenGraphLoader::new(logger.clone()));

    let app = App::new(
        config.clone(),
        logger.clone(),
        store,
        labels,
        layered,
        frozen_graph,
    );

    let results = app.run()?;

    write_results(&config.results_path, &results)?;
    logger.info(&format!(
        "Wrote {} result(s) to {}",
        results.len(),
        config.results_path.display()
    ))?;

    Ok(())
}

/// Reports a failed run once, through the logger when it can. Returns whether the run succeeded.
fn report_outcome(
    outcome: Result<(), Box<dyn std::error::Error + Send + Sync>>,
    logger: &dyn Logger,
) -> bool {
    match outcome {
        Ok(()) => true,
        Err(e) => {
            if logger.error(&e.to_string()).is_err() {
                eprintln!("{}", e);
            }
            false
        }
    }
}

fn main() -> ExitCode {
    let config = Config::default();

    let logger: Arc<dyn Logger + Send + Sync> =
        Arc::new(LoggerConsole::new(config.logger_timezone));

    if report_outcome(run(&config, logger.clone()), logger.as_ref()) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
