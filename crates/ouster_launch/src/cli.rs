//! Command-line interface for ouster_launch

use argh::FromArgs;
use std::collections::HashMap;
use std::str::FromStr;

/// Compose the ouster sensor launch plan
#[derive(FromArgs, Debug)]
pub struct LaunchArgs {
    /// composition config file (YAML); built-in defaults when omitted
    #[argh(option, short = 'c')]
    pub config: Option<String>,

    /// install prefix to search for packages (repeatable, default: $AMENT_PREFIX_PATH)
    #[argh(option, short = 'p')]
    pub prefix: Vec<String>,

    /// override launch arguments (format: key:=value)
    #[argh(option, short = 'a', from_str_fn(parse_arg_override))]
    pub arg: Vec<(String, String)>,

    /// output format (text, yaml, json)
    #[argh(option, short = 'f', default = "OutputFormat::Text")]
    pub format: OutputFormat,

    /// print the declarative plan with conditions attached instead of evaluating it
    #[argh(switch)]
    pub declarative: bool,

    /// validate the composition and exit
    #[argh(switch)]
    pub validate: bool,

    /// log level (error, warn, info, debug, trace)
    #[argh(option, short = 'l', default = "String::from(\"info\")")]
    pub log_level: String,
}

/// How the plan is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Yaml,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "yaml" => Ok(OutputFormat::Yaml),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!(
                "Invalid format '{}'. Expected one of: text, yaml, json",
                s
            )),
        }
    }
}

/// Parse argument override in format "key:=value"
fn parse_arg_override(s: &str) -> Result<(String, String), String> {
    let parts: Vec<&str> = s.splitn(2, ":=").collect();
    if parts.len() != 2 || parts[0].is_empty() {
        return Err(format!(
            "Invalid argument format '{}'. Expected 'key:=value'",
            s
        ));
    }
    Ok((parts[0].to_string(), parts[1].to_string()))
}

impl LaunchArgs {
    /// Convert argument overrides to a HashMap; later overrides win
    pub fn arg_overrides(&self) -> HashMap<String, String> {
        self.arg.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_arg_override() {
        let result = parse_arg_override("ouster_ns:=robotA");
        assert_eq!(result, Ok(("ouster_ns".to_string(), "robotA".to_string())));
    }

    #[test]
    fn test_parse_arg_override_with_separator_in_value() {
        let result = parse_arg_override("ouster_ns:=a:=b");
        assert_eq!(result, Ok(("ouster_ns".to_string(), "a:=b".to_string())));
    }

    #[test]
    fn test_parse_arg_override_invalid() {
        assert!(parse_arg_override("viz=False").is_err());
        assert!(parse_arg_override(":=False").is_err());
    }

    #[test]
    fn test_output_format() {
        assert_eq!("YAML".parse::<OutputFormat>(), Ok(OutputFormat::Yaml));
        assert_eq!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_from_args() {
        let args = LaunchArgs::from_args(
            &["ouster_launch"],
            &["-a", "ouster_ns:=robotA", "-a", "viz:=False", "-p", "/opt/ros/humble", "-f", "json"],
        )
        .unwrap();

        let overrides = args.arg_overrides();
        assert_eq!(overrides["ouster_ns"], "robotA");
        assert_eq!(overrides["viz"], "False");
        assert_eq!(args.prefix, vec!["/opt/ros/humble".to_string()]);
        assert_eq!(args.format, OutputFormat::Json);
        assert!(!args.declarative);
    }
}
