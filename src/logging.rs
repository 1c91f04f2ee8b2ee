use owo_colors::OwoColorize;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::{self, Writer};
use tracing_subscriber::fmt::{FmtContext, FormatEvent};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::EnvFilter;

/// One line per event, prefixed with a level marker: `[+] loaded config`.
pub struct ShipFeeFormatter {
    use_colors: bool,
}

fn level_symbol(level: &Level) -> &'static str {
    match *level {
        Level::TRACE => "[ ]",
        Level::DEBUG => "[?]",
        Level::INFO => "[+]",
        Level::WARN => "[*]",
        Level::ERROR => "[-]",
    }
}

impl<S, N> FormatEvent<S, N> for ShipFeeFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> format::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let level = event.metadata().level();
        let symbol = level_symbol(level);

        if self.use_colors {
            match *level {
                Level::TRACE => write!(writer, "{} ", symbol.dimmed())?,
                Level::DEBUG => write!(writer, "{} ", symbol.blue())?,
                Level::INFO => write!(writer, "{} ", symbol.green().bold())?,
                Level::WARN => write!(writer, "{} ", symbol.yellow().bold())?,
                Level::ERROR => write!(writer, "{} ", symbol.red().bold())?,
            }
        } else {
            write!(writer, "{} ", symbol)?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}

/// Install the stderr subscriber.
///
/// `RUST_LOG` wins when set; otherwise `warn`, or `debug` with `verbose`.
/// Calling it again leaves the installed subscriber in place.
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let use_colors = std::io::IsTerminal::is_terminal(&std::io::stderr());

    let result = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .event_format(ShipFeeFormatter { use_colors })
        .try_init();

    if let Err(e) = result {
        // Reported through whichever subscriber is already installed
        tracing::debug!("logging already initialized: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_symbols() {
        assert_eq!(level_symbol(&Level::INFO), "[+]");
        assert_eq!(level_symbol(&Level::WARN), "[*]");
        assert_eq!(level_symbol(&Level::ERROR), "[-]");
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init(false);
        init(true);
        tracing::debug!("still alive");
    }
}
