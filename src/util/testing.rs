use std::collections::VecDeque;
use std::env;
use std::io;
use std::sync::Once;
use tracing::{debug, info};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::domain::RandomSource;
use crate::infrastructure::traits::Console;

static TEST_SETUP: Once = Once::new();

pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        // global logging subscriber, used by all tracing log macros
        setup_test_logging();
        info!("Test Setup complete");
    });
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");

    let env_filter = match env::var("RUST_LOG") {
        Ok(_) => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        Err(_) => EnvFilter::new("debug"),
    };

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}

/// Random source replaying a fixed sequence of draws.
///
/// Each `rn2(bound)` call consumes the next scripted value and reduces it
/// modulo `bound`. Once the script runs out every draw yields 0.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRng {
    draws: Vec<u32>,
    position: usize,
}

impl ScriptedRng {
    pub fn new(draws: Vec<u32>) -> Self {
        Self { draws, position: 0 }
    }

    /// Number of draws made so far, including those past the end of the script.
    pub fn consumed(&self) -> usize {
        self.position
    }
}

impl RandomSource for ScriptedRng {
    fn rn2(&mut self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        let value = self.draws.get(self.position).copied().unwrap_or(0);
        self.position += 1;
        value % bound
    }
}

/// Console fed from a fixed list of input lines, capturing all output.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    inputs: VecDeque<String>,
    output: String,
    clears: usize,
}

impl ScriptedConsole {
    pub fn new<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn clears(&self) -> usize {
        self.clears
    }

    /// Input lines not consumed yet.
    pub fn remaining(&self) -> usize {
        self.inputs.len()
    }
}

impl Console for ScriptedConsole {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        Ok(self.inputs.pop_front())
    }

    fn write(&mut self, text: &str) -> io::Result<()> {
        self.output.push_str(text);
        Ok(())
    }

    fn clear(&mut self) -> io::Result<()> {
        self.clears += 1;
        Ok(())
    }
}

// test
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_test_setup() {
        init_test_setup();
        init_test_setup();
    }

    #[test]
    fn test_scripted_rng_replays_then_yields_zero() {
        let mut rng = ScriptedRng::new(vec![3, 7]);
        assert_eq!(rng.rn2(5), 3);
        assert_eq!(rng.rn2(5), 2);
        assert_eq!(rng.rn2(5), 0);
        assert_eq!(rng.rn2(0), 0);
        assert_eq!(rng.consumed(), 3);
    }

    #[test]
    fn test_scripted_console_reads_then_reports_eof() {
        let mut console = ScriptedConsole::new(["l"]);
        console.write("hello").unwrap();
        assert_eq!(console.read_line().unwrap(), Some("l".to_string()));
        assert_eq!(console.read_line().unwrap(), None);
        assert_eq!(console.output(), "hello");
        assert_eq!(console.remaining(), 0);
    }
}
