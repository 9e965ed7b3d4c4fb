use crate::config::RunnerConfig;
use crate::shell::{escape_plus_sign, escape_single_quotes, normalize_path, quote};
use std::fmt;

/// A run invocation: the jest command plus its final argument sequence.
///
/// Built once per request and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunCommand {
    program: String,
    args: Vec<String>,
}

impl RunCommand {
    /// Executable or command prefix
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Argument tokens in final order
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for RunCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.program, self.args.join(" "))
    }
}

/// Builds ordered, correctly escaped argument sequences from a file path,
/// an optional test name, the static configuration, and per-call options.
pub struct ArgBuilder<'a> {
    config: &'a RunnerConfig,
}

impl<'a> ArgBuilder<'a> {
    /// Create a builder over a configuration
    #[must_use]
    pub fn new(config: &'a RunnerConfig) -> Self {
        Self { config }
    }

    /// Build the argument sequence.
    ///
    /// With `with_quotes` the tokens are shell-quoted for a text terminal;
    /// without, they are discrete array elements for a debugger launch. A
    /// missing config path or empty test name omits its token pair.
    #[must_use]
    pub fn build(
        &self,
        file_path: &str,
        test_name: Option<&str>,
        with_quotes: bool,
        extra_options: &[String],
    ) -> Vec<String> {
        let quoter = |token: String| if with_quotes { quote(&token) } else { token };

        let mut args = Vec::new();
        args.push(quoter(escape_plus_sign(&normalize_path(file_path))));

        if let Some(config_path) = &self.config.config_path {
            args.push("-c".to_string());
            args.push(quoter(normalize_path(&config_path.to_string_lossy())));
        }

        if let Some(name) = test_name.filter(|n| !n.is_empty()) {
            args.push("-t".to_string());
            args.push(quoter(escape_single_quotes(name)));
        }

        args.extend(merge_options(&self.config.run_options, extra_options));
        args
    }

    /// Build the complete shell command for a run
    #[must_use]
    pub fn command(
        &self,
        file_path: &str,
        test_name: Option<&str>,
        extra_options: &[String],
    ) -> RunCommand {
        RunCommand {
            program: self.config.jest_command.clone(),
            args: self.build(file_path, test_name, true, extra_options),
        }
    }
}

/// Merge static options with per-call extras: static first, then extras,
/// first-seen order kept, duplicates by exact value dropped.
fn merge_options(static_options: &[String], extra_options: &[String]) -> Vec<String> {
    let mut merged: Vec<String> = Vec::with_capacity(static_options.len() + extra_options.len());
    for option in static_options.iter().chain(extra_options) {
        if !merged.contains(option) {
            merged.push(option.clone());
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn opts(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_quoted_token_order() {
        let config = RunnerConfig {
            config_path: Some(PathBuf::from("jest.config.js")),
            ..Default::default()
        };
        let args = ArgBuilder::new(&config).build("/a/b.test.js", Some("foo bar"), true, &[]);
        assert_eq!(
            args,
            vec![
                "'/a/b.test.js'",
                "-c",
                "'jest.config.js'",
                "-t",
                "'foo bar'",
            ]
        );
    }

    #[test]
    fn test_unquoted_structured_args() {
        let config = RunnerConfig::default();
        let args = ArgBuilder::new(&config).build("/a/b.test.js", Some("foo bar"), false, &[]);
        assert_eq!(args, vec!["/a/b.test.js", "-t", "foo bar"]);
    }

    #[test]
    fn test_missing_config_and_name_omit_pairs() {
        let config = RunnerConfig::default();
        let args = ArgBuilder::new(&config).build("/a/b.test.js", None, true, &[]);
        assert_eq!(args, vec!["'/a/b.test.js'"]);

        let args = ArgBuilder::new(&config).build("/a/b.test.js", Some(""), true, &[]);
        assert_eq!(args, vec!["'/a/b.test.js'"]);
    }

    #[test]
    fn test_option_merge_order_stable_dedup() {
        assert_eq!(
            merge_options(&opts(&["a", "b"]), &opts(&["b", "c"])),
            opts(&["a", "b", "c"])
        );
    }

    #[test]
    fn test_options_appended_after_name() {
        let config = RunnerConfig {
            run_options: opts(&["--watch"]),
            ..Default::default()
        };
        let args =
            ArgBuilder::new(&config).build("/a/b.test.js", Some("t"), true, &opts(&["--coverage"]));
        assert_eq!(args, vec!["'/a/b.test.js'", "-t", "'t'", "--watch", "--coverage"]);
    }

    #[test]
    fn test_plus_sign_and_separator_normalization() {
        let config = RunnerConfig::default();
        let args = ArgBuilder::new(&config).build("C:\\work\\c++\\a.test.js", None, false, &[]);
        assert_eq!(args, vec!["C:/work/c\\+\\+/a.test.js"]);
    }

    #[test]
    fn test_single_quote_in_name_stays_valid() {
        let config = RunnerConfig::default();
        let args = ArgBuilder::new(&config).build("/a/b.test.js", Some("it's here"), true, &[]);
        assert_eq!(args[2], "'it'\\''s here'");
    }

    #[test]
    fn test_full_command_rendering() {
        let config = RunnerConfig::default();
        let command = ArgBuilder::new(&config).command("/a/b.test.js", Some("A B"), &[]);
        assert_eq!(command.to_string(), "npx jest '/a/b.test.js' -t 'A B'");
    }
}
