use std::collections::HashMap;

use crate::errors::CliError;

/// Positional arguments plus `--flag value` options.
#[derive(Debug, Default)]
pub struct ParsedArgs {
    pub positional: Vec<String>,
    options: HashMap<String, String>,
}

impl ParsedArgs {
    /// Splits `args` into positionals and `--name value` / `--name=value` options.
    pub fn parse(args: &[String], known: &[&str]) -> Result<Self, CliError> {
        let mut parsed = Self::default();
        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            let Some(flag) = arg.strip_prefix("--") else {
                parsed.positional.push(arg.clone());
                continue;
            };
            let (name, inline) = match flag.split_once('=') {
                Some((name, value)) => (name, Some(value.to_string())),
                None => (flag, None),
            };
            if !known.contains(&name) {
                return Err(CliError::Input(format!("unknown option `--{name}`")));
            }
            let value = match inline {
                Some(value) => value,
                None => iter
                    .next()
                    .cloned()
                    .ok_or_else(|| CliError::Input(format!("option `--{name}` needs a value")))?,
            };
            parsed.options.insert(name.to_string(), value);
        }
        Ok(parsed)
    }

    pub fn option(&self, name: &str) -> Option<&str> {
        self.options.get(name).map(String::as_str)
    }

    pub fn usize_option(&self, name: &str) -> Result<Option<usize>, CliError> {
        self.option(name)
            .map(|raw| {
                raw.parse::<usize>().map_err(|_| {
                    CliError::Input(format!("`--{name}` expects a number, got `{raw}`"))
                })
            })
            .transpose()
    }

    pub fn positional(&self, index: usize) -> Option<&str> {
        self.positional.get(index).map(String::as_str)
    }
}
