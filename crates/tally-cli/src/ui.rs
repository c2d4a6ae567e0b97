//! Terminal presentation of table output: whether status words are tinted
//! and how wide a table may grow.

use std::io::IsTerminal;
use std::sync::OnceLock;

use crate::cli::{ColorMode, GlobalFlags, OutputFormat};

/// Narrower `COLUMNS` values are ignored; tables render at natural width.
const MIN_TABLE_WIDTH: usize = 40;

/// ANSI tint for a status, band, or flag cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tint {
    Green,
    Yellow,
    Red,
}

impl Tint {
    /// Tint for a schedule status (`completed`, `in_progress`, `pending`,
    /// `overdue`), an accuracy band (`good`, `fair`, `poor`), or a `true`
    /// completion flag. Anything else stays plain.
    #[must_use]
    pub fn for_cell(text: &str) -> Option<Self> {
        match text.trim().to_ascii_lowercase().as_str() {
            "completed" | "good" | "true" => Some(Self::Green),
            "in_progress" | "fair" | "pending" => Some(Self::Yellow),
            "overdue" | "poor" => Some(Self::Red),
            _ => None,
        }
    }

    const fn code(self) -> &'static str {
        match self {
            Self::Green => "32",
            Self::Yellow => "33",
            Self::Red => "31",
        }
    }

    #[must_use]
    pub fn paint(self, cell: &str) -> String {
        format!("\u{1b}[{}m{cell}\u{1b}[0m", self.code())
    }
}

/// What the process knows about its terminal.
#[derive(Clone, Debug, Default)]
pub struct Terminal {
    pub is_tty: bool,
    pub no_color: bool,
    pub columns: Option<String>,
}

impl Terminal {
    fn detect() -> Self {
        Self {
            is_tty: std::io::stdout().is_terminal(),
            no_color: std::env::var_os("NO_COLOR").is_some(),
            columns: std::env::var("COLUMNS").ok(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UiPrefs {
    pub tint_statuses: bool,
    pub term_width: Option<usize>,
}

impl UiPrefs {
    /// Tinting applies to table output only. `--color always` forces it,
    /// `auto` needs a TTY, no `--quiet`, and no `NO_COLOR`.
    #[must_use]
    pub fn resolve(flags: &GlobalFlags, terminal: &Terminal) -> Self {
        let table = flags.format == OutputFormat::Table;
        let tint_statuses = match flags.color {
            ColorMode::Always => table,
            ColorMode::Never => false,
            ColorMode::Auto => table && terminal.is_tty && !flags.quiet && !terminal.no_color,
        };
        let term_width = terminal
            .columns
            .as_deref()
            .and_then(|value| value.trim().parse::<usize>().ok())
            .filter(|width| *width >= MIN_TABLE_WIDTH);
        Self {
            tint_statuses,
            term_width,
        }
    }
}

static UI_PREFS: OnceLock<UiPrefs> = OnceLock::new();

pub fn init(flags: &GlobalFlags) {
    let prefs = UiPrefs::resolve(flags, &Terminal::detect());
    tracing::trace!(?prefs, "table presentation resolved");
    let _ = UI_PREFS.set(prefs);
}

/// Resolved preferences; plain and unbounded before [`init`].
#[must_use]
pub fn prefs() -> UiPrefs {
    UI_PREFS.get().copied().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::{Terminal, Tint, UiPrefs};
    use crate::cli::{ColorMode, GlobalFlags, OutputFormat};

    fn flags(format: OutputFormat, color: ColorMode, quiet: bool) -> GlobalFlags {
        GlobalFlags {
            format,
            color,
            limit: None,
            quiet,
            verbose: false,
            project: None,
            data_dir: None,
        }
    }

    fn terminal(is_tty: bool, no_color: bool) -> Terminal {
        Terminal {
            is_tty,
            no_color,
            columns: None,
        }
    }

    #[rstest]
    #[case(OutputFormat::Table, ColorMode::Auto, false, terminal(true, false), true)]
    #[case(OutputFormat::Table, ColorMode::Auto, false, terminal(false, false), false)]
    #[case(OutputFormat::Table, ColorMode::Auto, false, terminal(true, true), false)]
    #[case(OutputFormat::Table, ColorMode::Auto, true, terminal(true, false), false)]
    #[case(OutputFormat::Json, ColorMode::Auto, false, terminal(true, false), false)]
    #[case(OutputFormat::Table, ColorMode::Never, false, terminal(true, false), false)]
    #[case(OutputFormat::Table, ColorMode::Always, true, terminal(false, true), true)]
    #[case(OutputFormat::Raw, ColorMode::Always, false, terminal(true, false), false)]
    fn tinting_follows_mode_format_and_terminal(
        #[case] format: OutputFormat,
        #[case] color: ColorMode,
        #[case] quiet: bool,
        #[case] terminal: Terminal,
        #[case] expected: bool,
    ) {
        let prefs = UiPrefs::resolve(&flags(format, color, quiet), &terminal);
        assert_eq!(prefs.tint_statuses, expected);
    }

    #[rstest]
    #[case(Some("120"), Some(120))]
    #[case(Some("39"), None)]
    #[case(Some("wide"), None)]
    #[case(None, None)]
    fn columns_bound_table_width(#[case] columns: Option<&str>, #[case] expected: Option<usize>) {
        let terminal = Terminal {
            columns: columns.map(str::to_string),
            ..Terminal::default()
        };
        let prefs = UiPrefs::resolve(&flags(OutputFormat::Table, ColorMode::Auto, false), &terminal);
        assert_eq!(prefs.term_width, expected);
    }

    #[rstest]
    #[case("completed", Some(Tint::Green))]
    #[case(" Good ", Some(Tint::Green))]
    #[case("in_progress", Some(Tint::Yellow))]
    #[case("pending", Some(Tint::Yellow))]
    #[case("overdue", Some(Tint::Red))]
    #[case("poor", Some(Tint::Red))]
    #[case("false", None)]
    #[case("Rua 25", None)]
    fn status_words_pick_their_tint(#[case] text: &str, #[case] expected: Option<Tint>) {
        assert_eq!(Tint::for_cell(text), expected);
    }

    #[test]
    fn paint_wraps_cell_in_ansi_codes() {
        assert_eq!(Tint::Red.paint("overdue "), "\u{1b}[31moverdue \u{1b}[0m");
    }
}
