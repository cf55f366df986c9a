//! Startup sequence and the terminal event loop.

use std::future::Future;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::controller::{Command, InteractionController};
use crate::display::TerminalSurface;
use crate::error::{LocationError, WidgetError};
use crate::location::LocationProvider;
use crate::models::{RawWeatherRecord, UnitPreference};
use crate::service::ForecastClient;

/// Resolves the position, then fetches the forecast. Both steps run once.
pub async fn load_record(
    location: &dyn LocationProvider,
    client: &ForecastClient,
    days: u8,
) -> Result<RawWeatherRecord, WidgetError> {
    let coords = location.current_position().await?;
    tracing::info!(
        "Resolved position: {:.4}, {:.4}",
        coords.latitude,
        coords.longitude
    );

    let record = client.fetch_forecast(coords, days).await?;
    Ok(record)
}

/// Logs a startup failure. Returns the notice to show the user when the
/// failure needs one (geolocation missing entirely).
pub fn report_startup_error(err: &WidgetError) -> Option<&'static str> {
    match err {
        WidgetError::Location(loc) => {
            tracing::error!("ERROR({}): {}", loc.code(), loc);
            matches!(loc, LocationError::Unsupported).then(|| loc.user_message())
        }
        other => {
            tracing::error!("ERROR: {} ({})", other, other.user_message());
            None
        }
    }
}

/// Shows the loading frame while `load` runs, then either drives the widget
/// on the record or, after a failed startup, stays in the loading state until
/// `quit` or end of input.
pub async fn run<F, R, W>(
    load: F,
    input: R,
    surface: &mut TerminalSurface<W>,
) -> anyhow::Result<()>
where
    F: Future<Output = Result<RawWeatherRecord, WidgetError>>,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    surface.flush_frame(UnitPreference::default())?;

    match load.await {
        Ok(record) => run_interactive(record, input, surface).await,
        Err(e) => {
            if let Some(notice) = report_startup_error(&e) {
                eprintln!("{}", notice);
            }
            wait_for_quit(input).await
        }
    }
}

/// Drives the widget from line-oriented input until `quit` or end of input
pub async fn run_interactive<R, W>(
    record: RawWeatherRecord,
    input: R,
    surface: &mut TerminalSurface<W>,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut controller = InteractionController::new(record);
    if let Err(e) = controller.start(surface) {
        report_startup_error(&WidgetError::Selection(e));
        return wait_for_quit(input).await;
    }
    surface.flush_frame(controller.session().unit)?;

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        let event = match Command::parse(&line) {
            Ok(Some(Command::Event(event))) => event,
            Ok(Some(Command::Quit)) => break,
            Ok(None) => {
                tracing::debug!("Ignoring input: {:?}", line);
                continue;
            }
            Err(e) => {
                let err = WidgetError::from(e);
                tracing::warn!("{} ({})", err.user_message(), err);
                continue;
            }
        };

        if let Err(e) = controller.handle(event, surface) {
            let err = WidgetError::from(e);
            tracing::warn!("{} ({})", err.user_message(), err);
            continue;
        }
        surface.flush_frame(controller.session().unit)?;
    }

    tracing::info!("Widget closed");
    Ok(())
}

/// Consumes input without rendering; nothing but `quit` has an effect
async fn wait_for_quit<R>(input: R) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        if matches!(Command::parse(&line), Ok(Some(Command::Quit))) {
            break;
        }
        tracing::debug!("Still loading, ignoring input: {:?}", line);
    }
    Ok(())
}
