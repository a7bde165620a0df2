//! Formatter selection based on sink kind and color capability

use super::formatter::Formatter;
use super::sink::Sink;
use serde::{Deserialize, Serialize};

/// Tri-state color preference
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorChoice {
    /// Color iff the environment supports it
    #[default]
    Auto,
    /// Color if the environment supports it (still probed)
    Always,
    /// Never color
    Never,
}

impl From<Option<bool>> for ColorChoice {
    fn from(value: Option<bool>) -> Self {
        match value {
            None => ColorChoice::Auto,
            Some(true) => ColorChoice::Always,
            Some(false) => ColorChoice::Never,
        }
    }
}

/// Environment questions asked before emitting color codes.
pub trait ColorProbe: Send + Sync {
    fn is_color_capability_available(&self) -> bool;
    fn is_no_color_override_set(&self) -> bool;
    fn is_target_interactive(&self, target: &dyn Sink) -> bool;

    /// All three conditions must hold.
    fn supports_color(&self, target: &dyn Sink) -> bool {
        self.is_color_capability_available()
            && !self.is_no_color_override_set()
            && self.is_target_interactive(target)
    }
}

/// Probe backed by the process environment
///
/// - capability: the `console` feature is compiled in
/// - override: `NO_COLOR` is set to a non-empty value
/// - interactive: the sink reports a terminal
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvColorProbe;

impl ColorProbe for EnvColorProbe {
    fn is_color_capability_available(&self) -> bool {
        cfg!(feature = "console")
    }

    fn is_no_color_override_set(&self) -> bool {
        std::env::var_os("NO_COLOR").is_some_and(|value| !value.is_empty())
    }

    fn is_target_interactive(&self, target: &dyn Sink) -> bool {
        target.is_terminal()
    }
}

/// Pick the formatter for `target`.
///
/// File-backed targets always get the plain formatter, whatever the probe
/// says. Otherwise color is used only when it is not refused by `choice`
/// and the probe succeeds.
pub fn select_formatter(target: &dyn Sink, choice: ColorChoice, probe: &dyn ColorProbe) -> Formatter {
    if target.is_file_backed() {
        return Formatter::plain();
    }

    let use_color = match choice {
        ColorChoice::Never => false,
        ColorChoice::Auto | ColorChoice::Always => probe.supports_color(target),
    };

    if use_color {
        Formatter::colored()
    } else {
        Formatter::plain()
    }
}

/// Default formatter for the process standard error stream.
pub fn create_default_formatter(choice: ColorChoice) -> Formatter {
    select_formatter(&crate::sinks::StreamSink::stderr(), choice, &EnvColorProbe)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::Result;
    use crate::core::formatter::FormatStyle;

    struct FixedProbe {
        capable: bool,
        no_color: bool,
    }

    impl ColorProbe for FixedProbe {
        fn is_color_capability_available(&self) -> bool {
            self.capable
        }

        fn is_no_color_override_set(&self) -> bool {
            self.no_color
        }

        fn is_target_interactive(&self, target: &dyn Sink) -> bool {
            target.is_terminal()
        }
    }

    struct FakeSink {
        file: bool,
        tty: bool,
    }

    impl Sink for FakeSink {
        fn write(&mut self, _rendered: &str) -> Result<()> {
            Ok(())
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "fake"
        }

        fn is_file_backed(&self) -> bool {
            self.file
        }

        fn is_terminal(&self) -> bool {
            self.tty
        }
    }

    const CAPABLE: FixedProbe = FixedProbe {
        capable: true,
        no_color: false,
    };

    #[test]
    fn test_file_sink_is_always_plain() {
        let sink = FakeSink { file: true, tty: true };
        for choice in [ColorChoice::Auto, ColorChoice::Always, ColorChoice::Never] {
            assert_eq!(select_formatter(&sink, choice, &CAPABLE).style(), FormatStyle::Plain);
        }
    }

    #[test]
    fn test_terminal_stream_gets_color() {
        let sink = FakeSink { file: false, tty: true };
        assert!(select_formatter(&sink, ColorChoice::Auto, &CAPABLE).is_colored());
        assert!(select_formatter(&sink, ColorChoice::Always, &CAPABLE).is_colored());
        assert!(!select_formatter(&sink, ColorChoice::Never, &CAPABLE).is_colored());
    }

    #[test]
    fn test_forced_color_still_requires_probe() {
        let not_tty = FakeSink { file: false, tty: false };
        assert!(!select_formatter(&not_tty, ColorChoice::Always, &CAPABLE).is_colored());

        let tty = FakeSink { file: false, tty: true };
        let no_color = FixedProbe {
            capable: true,
            no_color: true,
        };
        assert!(!select_formatter(&tty, ColorChoice::Always, &no_color).is_colored());

        let incapable = FixedProbe {
            capable: false,
            no_color: false,
        };
        assert!(!select_formatter(&tty, ColorChoice::Auto, &incapable).is_colored());
    }

    #[test]
    fn test_choice_from_option() {
        assert_eq!(ColorChoice::from(None), ColorChoice::Auto);
        assert_eq!(ColorChoice::from(Some(true)), ColorChoice::Always);
        assert_eq!(ColorChoice::from(Some(false)), ColorChoice::Never);
    }
}
